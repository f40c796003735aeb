pub mod ast;
pub mod types;

pub use types::{
    AnalysisMode, AnalysisRequest, AnalysisResult, AnalysisSummary, ClassInfo, CodeFacts,
    ComplexityLevel, ComplexityMetrics, ComponentInfo, Exports, FileType, Framework,
    FunctionInfo, GeneratedTest, GenerationMode, GenerationOptions, ImportInfo, ImportKind,
    PatternFlags, TestType, VariableInfo,
};
