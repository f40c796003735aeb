use serde::{Deserialize, Serialize};

use crate::core::{Framework, GenerationOptions, TestType};

/// Root configuration structure for testforge
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct TestForgeConfig {
    /// Generative-text service settings
    #[serde(default)]
    pub service: ServiceConfig,

    /// Defaults applied to requests built by the CLI
    #[serde(default)]
    pub generation: GenerationDefaults,
}

/// Connection settings for the generative-text service.
///
/// Without an `api_key` the service is never called and every suite comes
/// from the template synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// Token budget for one reply (default: 4000)
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Request timeout in seconds (default: 60)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

impl ServiceConfig {
    pub fn has_credential(&self) -> bool {
        self.api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_tokens() -> u32 {
    4000
}

fn default_timeout_secs() -> u64 {
    60
}

/// Request defaults used when the CLI flags leave a value unset
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenerationDefaults {
    #[serde(default)]
    pub framework: Framework,

    #[serde(default)]
    pub test_type: TestType,

    #[serde(default = "default_coverage_target")]
    pub coverage_target: u8,

    #[serde(default = "default_true")]
    pub include_edge_cases: bool,

    #[serde(default = "default_true")]
    pub mock_dependencies: bool,

    #[serde(default)]
    pub generate_documentation: bool,
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            framework: Framework::default(),
            test_type: TestType::default(),
            coverage_target: default_coverage_target(),
            include_edge_cases: true,
            mock_dependencies: true,
            generate_documentation: false,
        }
    }
}

impl GenerationDefaults {
    pub fn to_options(&self) -> GenerationOptions {
        GenerationOptions {
            coverage_target: self.coverage_target,
            include_edge_cases: self.include_edge_cases,
            mock_dependencies: self.mock_dependencies,
            generate_documentation: self.generate_documentation,
            force_template: false,
        }
    }
}

fn default_coverage_target() -> u8 {
    80
}

fn default_true() -> bool {
    true
}
