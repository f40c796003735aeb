//! Configuration
//!
//! `.testforge.toml` is discovered by walking up from the working directory,
//! then `TESTFORGE_API_KEY` / `TESTFORGE_MODEL` are overlaid. The resulting
//! [`TestForgeConfig`] is passed explicitly to the orchestrator.
//!
//! ```toml
//! [service]
//! endpoint = "https://api.openai.com/v1/chat/completions"
//! model = "gpt-4o-mini"
//! max_tokens = 4000
//! timeout_secs = 60
//!
//! [generation]
//! framework = "jest"
//! test_type = "unit"
//! coverage_target = 80
//! ```

mod core;
mod loader;

pub use core::{GenerationDefaults, ServiceConfig, TestForgeConfig};
pub use loader::{
    apply_env_overrides, directory_ancestors, discover_config, load_config,
    parse_and_validate_config, API_KEY_ENV, CONFIG_FILE_NAME, MODEL_ENV,
};
