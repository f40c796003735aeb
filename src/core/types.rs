//! Request, fact and result types shared by the analysis pipeline
//!
//! Every value here is built fresh for a single `generate_tests` call and is
//! never mutated once handed to the next stage.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of test suite to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TestType {
    #[default]
    Unit,
    Integration,
    Component,
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unit => "unit",
            Self::Integration => "integration",
            Self::Component => "component",
        };
        f.write_str(name)
    }
}

/// Target test runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    #[default]
    Jest,
    Cypress,
    Playwright,
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Jest => "jest",
            Self::Cypress => "cypress",
            Self::Playwright => "playwright",
        };
        f.write_str(name)
    }
}

/// Caller-tunable knobs for a single generation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    /// Desired coverage percentage (0-100). Only surfaces in the prompt text.
    pub coverage_target: u8,
    pub include_edge_cases: bool,
    pub mock_dependencies: bool,
    pub generate_documentation: bool,
    /// Skip the generative service even when a credential is configured
    pub force_template: bool,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            coverage_target: 80,
            include_edge_cases: true,
            mock_dependencies: true,
            generate_documentation: false,
            force_template: false,
        }
    }
}

/// Input to the orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub source_code: String,
    pub file_path: String,
    pub test_type: TestType,
    pub framework: Framework,
    #[serde(default)]
    pub options: GenerationOptions,
}

impl AnalysisRequest {
    /// Unit tests for jest with default options
    pub fn new(source_code: impl Into<String>, file_path: impl Into<String>) -> Self {
        Self {
            source_code: source_code.into(),
            file_path: file_path.into(),
            test_type: TestType::default(),
            framework: Framework::default(),
            options: GenerationOptions::default(),
        }
    }

    pub fn with_test_type(mut self, test_type: TestType) -> Self {
        self.test_type = test_type;
        self
    }

    pub fn with_framework(mut self, framework: Framework) -> Self {
        self.framework = framework;
        self
    }

    pub fn with_options(mut self, options: GenerationOptions) -> Self {
        self.options = options;
        self
    }
}

/// Coarse file classification derived from the extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    TypeScript,
    #[serde(rename = "react-component")]
    ReactComponent,
    JavaScript,
    Unknown,
}

impl FileType {
    pub fn from_path(path: &str) -> Self {
        match extension_of(path).map(|ext| ext.to_ascii_lowercase()).as_deref() {
            Some("tsx") | Some("jsx") => Self::ReactComponent,
            Some("ts") | Some("mts") | Some("cts") => Self::TypeScript,
            Some("js") | Some("mjs") | Some("cjs") => Self::JavaScript,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::TypeScript => "typescript",
            Self::ReactComponent => "react-component",
            Self::JavaScript => "javascript",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Extension of the final path segment, without the dot
pub(crate) fn extension_of(path: &str) -> Option<&str> {
    let basename = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match basename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => Some(ext),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionInfo {
    pub name: String,
    pub is_async: bool,
    pub params: Vec<String>,
    pub return_type: Option<String>,
    pub is_exported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub name: String,
    pub methods: Vec<String>,
    pub superclass: Option<String>,
    pub is_exported: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableInfo {
    pub name: String,
    pub type_annotation: Option<String>,
    pub is_exported: bool,
}

/// A UI component candidate. `hooks` lists the `useX` calls made in its body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInfo {
    pub name: String,
    pub props: Vec<String>,
    pub hooks: Vec<String>,
    pub is_exported: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exports {
    pub functions: Vec<FunctionInfo>,
    pub classes: Vec<ClassInfo>,
    pub variables: Vec<VariableInfo>,
    pub components: Vec<ComponentInfo>,
    /// Binding name of `export default X`, when it names one
    pub default_export: Option<String>,
}

impl Exports {
    /// True when there is nothing a generated suite could exercise
    pub fn has_testable_items(&self) -> bool {
        !self.functions.is_empty() || !self.classes.is_empty() || !self.components.is_empty()
    }

    /// Flag the module-level declaration called `name` as exported, for
    /// `export { name }`, `export default name` and CommonJS assignments that
    /// name a binding declared elsewhere. Returns false when no collected
    /// declaration has that name.
    pub fn mark_exported(&mut self, name: &str) -> bool {
        let mut found = false;
        for function in self.functions.iter_mut().filter(|f| f.name == name) {
            function.is_exported = true;
            found = true;
        }
        for class in self.classes.iter_mut().filter(|c| c.name == name) {
            class.is_exported = true;
            found = true;
        }
        for component in self.components.iter_mut().filter(|c| c.name == name) {
            component.is_exported = true;
            found = true;
        }
        for variable in self.variables.iter_mut().filter(|v| v.name == name) {
            variable.is_exported = true;
            found = true;
        }
        found
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportKind {
    Default,
    Named,
    Namespace,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportInfo {
    pub source: String,
    pub names: Vec<String>,
    pub kind: ImportKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplexityMetrics {
    pub cyclomatic: u32,
    pub cognitive: u32,
    pub lines: usize,
    pub level: ComplexityLevel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternFlags {
    pub has_async_code: bool,
    pub has_hooks: bool,
    pub has_api: bool,
    pub has_error_handling: bool,
    pub has_validation: bool,
    pub has_domain_context: bool,
}

/// Structural facts about one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeFacts {
    pub file_type: FileType,
    pub exports: Exports,
    pub imports: Vec<ImportInfo>,
    pub complexity: ComplexityMetrics,
    pub patterns: PatternFlags,
    pub testing_suggestions: Vec<String>,
}

impl CodeFacts {
    pub fn empty(file_type: FileType) -> Self {
        Self {
            file_type,
            exports: Exports::default(),
            imports: Vec::new(),
            complexity: ComplexityMetrics::default(),
            patterns: PatternFlags::default(),
            testing_suggestions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedTest {
    pub test_code: String,
    pub test_file_name: String,
    pub description: String,
    pub coverage_areas: Vec<String>,
    pub dependencies: Vec<String>,
    pub confidence: f64,
    pub suggestions: Vec<String>,
}

/// Which extractor produced the facts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisMode {
    Ast,
    Regex,
}

/// Which generator produced the test code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationMode {
    Ai,
    Template,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_tests: usize,
    pub estimated_coverage: u32,
    /// Wall-clock milliseconds spent inside `generate_tests`
    pub generation_time: u64,
    pub framework: Framework,
    pub analysis_mode: AnalysisMode,
    pub generation_mode: GenerationMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub tests: Vec<GeneratedTest>,
    pub summary: AnalysisSummary,
    pub recommendations: Vec<String>,
}
