//! Error types for analysis and generation
//!
//! Only [`Error::Analysis`], configuration and I/O errors ever reach a caller of
//! [`crate::orchestrator::TestGenerator::generate_tests`]. Parse failures and
//! service failures are absorbed by the fallback paths and only logged.

use thiserror::Error;

/// Main error type for testforge operations
#[derive(Debug, Error)]
pub enum Error {
    /// The structural parser could not produce a clean syntax tree
    #[error("Parse error in {path}: {message}")]
    Parse { path: String, message: String },

    /// Neither the AST walker nor the regex fallback produced facts
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Generative-text service failures
    #[error("External service error: {0}")]
    ExternalService(#[from] ServiceError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

impl Error {
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Why a call to the generative-text service did not yield usable test code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("no service credential configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("service responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed reply: {0}")]
    MalformedReply(String),

    #[error("reply contained no code block")]
    MissingCodeBlock,
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
