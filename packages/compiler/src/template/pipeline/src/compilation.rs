//! Compilation Module
//!
//! A compilation runs an ordered list of document passes over one or more
//! independent IR documents.

use crate::config::CompilerConfig;
use crate::logging::{Logger, NullLogger};
use crate::template::pipeline::ir::Document;
use crate::template::pipeline::src::phases::component_lowering::ComponentLoweringPass;
use rayon::prelude::*;
use std::sync::Arc;

/// A transformation applied to a whole document.
///
/// Passes may run on worker threads, one document per thread, so they must
/// not keep per-document state between calls.
pub trait DocumentPass: Send + Sync {
    /// Name used in log output.
    fn name(&self) -> &'static str;
    /// Passes run in ascending order; ties keep registration order.
    fn order(&self) -> i32;
    fn execute(&self, document: &mut Document);
}

/// Ordered set of passes.
pub struct PassPipeline {
    passes: Vec<Box<dyn DocumentPass>>,
    logger: Arc<dyn Logger>,
    /// Lower batches on the rayon thread pool.
    parallel: bool,
}

impl Default for PassPipeline {
    fn default() -> Self {
        PassPipeline::new(Arc::new(NullLogger::new()))
    }
}

impl PassPipeline {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        PassPipeline {
            passes: Vec::new(),
            logger,
            parallel: true,
        }
    }

    /// The standard lowering pipeline for `config`.
    pub fn with_defaults(config: &CompilerConfig) -> Self {
        let logger = config.logger();
        let mut pipeline = PassPipeline::new(logger.clone()).with_parallel(config.parallel);
        pipeline.add(ComponentLoweringPass::from_config(config, logger));
        pipeline
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn add(&mut self, pass: impl DocumentPass + 'static) -> &mut Self {
        self.passes.push(Box::new(pass));
        // Stable sort keeps registration order for equal priorities.
        self.passes.sort_by_key(|pass| pass.order());
        self
    }

    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|pass| pass.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }

    pub fn run(&self, document: &mut Document) {
        for pass in &self.passes {
            self.logger.debug(&format!(
                "running {} on {}",
                pass.name(),
                document.file_path.as_deref().unwrap_or("<anonymous document>")
            ));
            pass.execute(document);
        }
    }
}

/// Lower every document in `documents`.
///
/// Documents share nothing, so when the pipeline is parallel each one is
/// handed to a rayon worker; the result is identical to the sequential run.
pub fn lower_documents(pipeline: &PassPipeline, documents: &mut [Document]) {
    if pipeline.parallel {
        documents
            .par_iter_mut()
            .for_each(|document| pipeline.run(document));
    } else {
        documents.iter_mut().for_each(|document| pipeline.run(document));
    }
    pipeline.logger.info(&format!(
        "lowered {} document(s) through {} pass(es)",
        documents.len(),
        pipeline.len()
    ));
}
