//! Test code generation: prompt text for the generative service, the service
//! client itself, and the offline template synthesizer.

pub mod prompt;
pub mod service;
pub mod template;

pub use prompt::build_prompt;
pub use service::{extract_test_code, CompletionRequest, HttpTextGenerator, TextGenerator};
pub use template::{synthesize, TemplateKind};
