// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod commands;
pub mod complexity;
pub mod config;
pub mod core;
pub mod errors;
pub mod generation;
pub mod naming;
pub mod orchestrator;
pub mod scoring;
pub mod suggestions;

// Re-export commonly used types
pub use crate::core::{
    AnalysisMode, AnalysisRequest, AnalysisResult, AnalysisSummary, ClassInfo, CodeFacts,
    ComplexityLevel, ComplexityMetrics, ComponentInfo, Exports, FileType, Framework, FunctionInfo,
    GeneratedTest, GenerationMode, GenerationOptions, ImportInfo, ImportKind, PatternFlags,
    TestType, VariableInfo,
};

pub use crate::analyzers::{analyze_source, ExtractedFacts, FactExtractor};
pub use crate::config::{load_config, TestForgeConfig};
pub use crate::errors::{Error, Result, ServiceError};
pub use crate::generation::{synthesize, TextGenerator};
pub use crate::orchestrator::TestGenerator;
