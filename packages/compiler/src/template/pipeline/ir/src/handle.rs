//! IR Handles
//!
//! Defines the ids used to address nodes and descriptors inside a document arena.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in a [`Document`](super::document::Document) arena.
///
/// Ids are stable for the lifetime of the document: nodes that are detached from
/// the tree keep their slot, so an id collected before a rewrite still points at
/// the same node afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Index of a descriptor registered on a document.
///
/// Two tag attributes are bound to the same descriptor exactly when their
/// `DescriptorId`s are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorId(pub usize);

impl DescriptorId {
    pub fn new(index: usize) -> Self {
        DescriptorId(index)
    }

    pub fn as_usize(&self) -> usize {
        self.0
    }
}

impl fmt::Display for DescriptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "descriptor#{}", self.0)
    }
}
