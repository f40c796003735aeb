//! CLI command implementations.
//!
//! - **generate**: run the orchestrator for one file and print or write the suite
//! - **analyze**: print the facts extracted from one file
//! - **init**: write a default `.testforge.toml`

pub mod analyze;
pub mod generate;
pub mod init;

pub use analyze::handle_analyze;
pub use generate::{handle_generate, GenerateConfig};
pub use init::init_config;

use anyhow::{Context, Result};
use std::path::Path;

/// Source text and the `/`-separated path used for naming
pub(crate) fn read_source(file: &Path) -> Result<(String, String)> {
    let source = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let path = file.to_string_lossy().replace('\\', "/");
    Ok((source, path))
}
