//! Intermediate Representation
//!
//! Arena-backed document tree consumed and rewritten by the pipeline passes.

pub mod src {
    pub mod builder;
    pub mod document;
    pub mod handle;
    pub mod node;
    pub mod node_list;
}

pub use src::builder;
pub use src::document;
pub use src::handle;
pub use src::node;
pub use src::node_list;

pub use builder::{DocumentBuilder, Segment};
pub use document::Document;
pub use handle::{DescriptorId, NodeId};
pub use node::*;
pub use node_list::NodeList;
