#![deny(clippy::all)]

/**
 * Razor Component Compiler
 *
 * Lowers component tag usages in the markup IR into the open / attribute /
 * body / close structure consumed by the code generator.
 */

// Core modules
pub mod config;
pub mod descriptor;
pub mod diagnostics;
pub mod error;
pub mod logging;
pub mod parse_util;
mod version;

// Compilation pipeline
pub mod template;

// Re-exports
pub use config::CompilerConfig;
pub use descriptor::{Descriptor, DescriptorResolver, COMPONENT_KIND};
pub use diagnostics::{Diagnostic, DiagnosticKind, DiagnosticSink};
pub use error::{LoweringError, Result};
pub use template::pipeline::ir::{Document, DocumentBuilder, NodeId, NodeKind};
pub use template::pipeline::src::phases::ComponentLoweringPass;
pub use template::pipeline::src::{lower_documents, DocumentPass, PassPipeline};
pub use version::{Version, VERSION};

/// Lower a single document with the default pass configuration.
pub fn lower_document(document: &mut Document) {
    ComponentLoweringPass::new().execute(document);
}
