//! Compiler Configuration
//!
//! Options read from a JSON file such as `razor.config.json`:
//!
//! ```json
//! { "logLevel": "debug", "componentKind": "Components.Component", "parallel": true }
//! ```

use crate::descriptor::COMPONENT_KIND;
use crate::error::{LoweringError, Result};
use crate::logging::{ConsoleLogger, LogLevel, Logger};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerConfig {
    pub log_level: LogLevel,
    /// Descriptor kind treated as a component by the lowering pass.
    pub component_kind: String,
    /// Lower independent documents on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        CompilerConfig {
            log_level: LogLevel::default(),
            component_kind: COMPONENT_KIND.to_string(),
            parallel: true,
        }
    }
}

impl CompilerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read compiler config {}", path.display()))?;
        let config = CompilerConfig::from_json(&content)
            .with_context(|| format!("failed to parse compiler config {}", path.display()))?;
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: CompilerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.component_kind.trim().is_empty() {
            return Err(LoweringError::Config(
                "componentKind must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Console logger at the configured level.
    pub fn logger(&self) -> Arc<dyn Logger> {
        Arc::new(ConsoleLogger::new(self.log_level))
    }
}
