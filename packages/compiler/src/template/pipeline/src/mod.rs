//! Pipeline Source Module
//!
//! Pass orchestration and the individual lowering phases.

pub mod compilation;
pub mod phases;

pub use compilation::*;
