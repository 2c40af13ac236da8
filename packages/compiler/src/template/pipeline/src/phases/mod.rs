//! Pipeline Phases Module
//!
//! Each phase rewrites a document in place and reports problems through the
//! document's diagnostic sink.

pub mod component_lowering;

pub use component_lowering::ComponentLoweringPass;
