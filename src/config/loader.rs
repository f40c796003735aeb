use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::TestForgeConfig;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".testforge.toml";
pub const API_KEY_ENV: &str = "TESTFORGE_API_KEY";
pub const MODEL_ENV: &str = "TESTFORGE_MODEL";

/// Pure function to read and parse config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<TestForgeConfig> {
    let config = toml::from_str::<TestForgeConfig>(contents)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &TestForgeConfig) -> Result<()> {
    if config.generation.coverage_target > 100 {
        return Err(Error::Configuration(format!(
            "generation.coverage_target must be between 0 and 100, got {}",
            config.generation.coverage_target
        )));
    }
    if config.service.max_tokens == 0 {
        return Err(Error::Configuration(
            "service.max_tokens must be greater than zero".into(),
        ));
    }
    if config.service.timeout_secs == 0 {
        return Err(Error::Configuration(
            "service.timeout_secs must be greater than zero".into(),
        ));
    }
    Ok(())
}

/// Try loading config from a specific path; `None` when missing or invalid
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<TestForgeConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!(
                "Ignoring {}: {}. Using defaults.",
                config_path.display(),
                e
            );
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.testforge.toml`
pub fn discover_config(start: PathBuf) -> TestForgeConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            TestForgeConfig::default()
        })
}

/// Load configuration from an explicit path, or discover it from the current
/// directory, then apply environment overrides.
pub fn load_config(explicit: Option<&Path>) -> Result<TestForgeConfig> {
    let config = match explicit {
        Some(path) => {
            let contents = read_config_file(path).map_err(|e| {
                Error::Configuration(format!("failed to read {}: {e}", path.display()))
            })?;
            parse_and_validate_config(&contents)?
        }
        None => match std::env::current_dir() {
            Ok(dir) => discover_config(dir),
            Err(e) => {
                log::warn!(
                    "Failed to get current directory: {}. Using default config.",
                    e
                );
                TestForgeConfig::default()
            }
        },
    };

    Ok(apply_env_overrides(config, |name| std::env::var(name).ok()))
}

/// Overlay credential and model from the environment
pub fn apply_env_overrides(
    mut config: TestForgeConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> TestForgeConfig {
    if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
        config.service.api_key = Some(key);
    }
    if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
        config.service.model = model;
    }
    config
}
