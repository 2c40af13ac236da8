//! Node Lists
//!
//! Ordered child lists of IR nodes. Order is significant: it is the order in
//! which the code generator emits construction calls.

use crate::template::pipeline::ir::handle::NodeId;
use serde::{Deserialize, Serialize};

/// An ordered list of child node ids.
///
/// Mutation is index based. Callers that remove entries while scanning must walk
/// from the highest index to the lowest so that entries not yet visited keep
/// their positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeList {
    ids: Vec<NodeId>,
}

impl NodeList {
    pub fn new() -> Self {
        NodeList { ids: Vec::new() }
    }

    /// Push a node to the tail of the list.
    pub fn push(&mut self, id: NodeId) {
        self.ids.push(id);
    }

    /// Insert a node at `index`, shifting later entries towards the tail.
    /// An index past the end appends.
    pub fn insert_at(&mut self, index: usize, id: NodeId) {
        if index <= self.ids.len() {
            self.ids.insert(index, id);
        } else {
            self.ids.push(id);
        }
    }

    /// Remove the node at `index` and return it.
    pub fn remove_at(&mut self, index: usize) -> Option<NodeId> {
        if index < self.ids.len() {
            Some(self.ids.remove(index))
        } else {
            None
        }
    }

    /// Replace the node at `index`, returning the previous occupant.
    pub fn replace_at(&mut self, index: usize, id: NodeId) -> Option<NodeId> {
        self.ids
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, id))
    }

    /// Take every entry out of the list, leaving it empty.
    pub fn take(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.ids)
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.ids.get(index).copied()
    }

    pub fn first(&self) -> Option<NodeId> {
        self.ids.first().copied()
    }

    pub fn last(&self) -> Option<NodeId> {
        self.ids.last().copied()
    }

    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.ids.iter().position(|candidate| *candidate == id)
    }

    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, NodeId>> {
        self.ids.iter().copied()
    }

    pub fn reversed(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.ids.iter().rev().copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn as_slice(&self) -> &[NodeId] {
        &self.ids
    }
}

impl From<Vec<NodeId>> for NodeList {
    fn from(ids: Vec<NodeId>) -> Self {
        NodeList { ids }
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = NodeId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, NodeId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.ids.iter().copied()
    }
}
