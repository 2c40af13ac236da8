//! Compiler Errors
//!
//! Errors raised for malformed IR handed to the compiler. User-facing
//! problems in the markup are never errors; they are recorded as
//! diagnostics on the document instead.

use crate::template::pipeline::ir::{DescriptorId, NodeId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoweringError {
    #[error("node {0} is not part of the document")]
    UnknownNode(NodeId),

    #[error("node {child} is listed under {parent} but its parent link is {actual:?}")]
    ParentMismatch {
        parent: NodeId,
        child: NodeId,
        actual: Option<NodeId>,
    },

    #[error("node {0} is reachable more than once from the document root")]
    SharedNode(NodeId),

    #[error("descriptor {0} is not registered in the document")]
    UnknownDescriptor(DescriptorId),

    #[error("invalid IR document: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid compiler configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LoweringError>;
