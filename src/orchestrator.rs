//! Orchestration of one test-generation run
//!
//! [`TestGenerator::generate_tests`] always extracts facts (AST walker with the
//! regex fallback), then asks the generative service for a suite when one is
//! configured and the caller has not forced templates. Any service failure is
//! logged and replaced by the template synthesizer's output.

use crate::analyzers::{
    extract_with_fallback, ExtractedFacts, FactExtractor, RegexFactExtractor, TypeScriptAnalyzer,
};
use crate::config::TestForgeConfig;
use crate::core::{
    AnalysisRequest, AnalysisResult, AnalysisSummary, CodeFacts, GeneratedTest, GenerationMode,
};
use crate::errors::{Result, ServiceError};
use crate::generation::{
    build_prompt, extract_test_code, synthesize, CompletionRequest, HttpTextGenerator,
    TextGenerator,
};
use crate::naming::{module_stem, test_file_name};
use crate::scoring::{
    coverage_areas, estimated_coverage, template_confidence, test_dependencies, AI_CONFIDENCE,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info_span, Instrument};

pub struct TestGenerator {
    config: TestForgeConfig,
    service: Option<Arc<dyn TextGenerator>>,
    primary: Box<dyn FactExtractor>,
    fallback: Box<dyn FactExtractor>,
}

impl TestGenerator {
    /// Build a generator from `config`. An HTTP service client is created only
    /// when a credential is configured.
    pub fn new(config: TestForgeConfig) -> Self {
        let service = match HttpTextGenerator::from_config(&config.service) {
            Ok(client) => Some(Arc::new(client) as Arc<dyn TextGenerator>),
            Err(ServiceError::NotConfigured) => None,
            Err(e) => {
                log::warn!("Generative service unavailable, using templates only: {e}");
                None
            }
        };
        Self {
            config,
            service,
            primary: Box::new(TypeScriptAnalyzer),
            fallback: Box::new(RegexFactExtractor),
        }
    }

    /// Template-only generator with default configuration
    pub fn offline() -> Self {
        Self::new(TestForgeConfig::default())
    }

    /// Replace the service client, e.g. with a test double
    pub fn with_service(mut self, service: Arc<dyn TextGenerator>) -> Self {
        self.service = Some(service);
        self
    }

    pub fn config(&self) -> &TestForgeConfig {
        &self.config
    }

    pub fn has_service(&self) -> bool {
        self.service.is_some()
    }

    /// Fact extraction alone: parse, walk, classify, suggest
    pub fn analyze(&self, source: &str, path: &str) -> Result<ExtractedFacts> {
        let _span = info_span!("analyze", file = %path).entered();
        extract_with_fallback(self.primary.as_ref(), self.fallback.as_ref(), source, path)
    }

    pub async fn generate_tests(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let span = info_span!(
            "generate_tests",
            file = %request.file_path,
            test_type = %request.test_type,
            framework = %request.framework,
        );
        self.generate_tests_inner(request).instrument(span).await
    }

    async fn generate_tests_inner(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let start = Instant::now();

        let ExtractedFacts { facts, mode } = self.analyze(&request.source_code, &request.file_path)?;
        log::debug!(
            "Extracted facts from {} via {:?}: {} functions, {} classes, {} components",
            request.file_path,
            mode,
            facts.exports.functions.len(),
            facts.exports.classes.len(),
            facts.exports.components.len()
        );

        let (test_code, generation_mode) = match self.ai_test_code(request, &facts).await {
            Some(code) => (code, GenerationMode::Ai),
            None => {
                let _span = info_span!("template_synthesis").entered();
                (synthesize(request, &facts), GenerationMode::Template)
            }
        };

        let confidence = match generation_mode {
            GenerationMode::Ai => AI_CONFIDENCE,
            GenerationMode::Template => template_confidence(&facts),
        };

        let test = GeneratedTest {
            test_code,
            test_file_name: test_file_name(&request.file_path),
            description: describe_suite(request, &facts),
            coverage_areas: coverage_areas(&facts),
            dependencies: test_dependencies(request.framework, &facts),
            confidence,
            suggestions: facts.testing_suggestions.clone(),
        };

        let summary = AnalysisSummary {
            total_tests: 1,
            estimated_coverage: estimated_coverage(&facts),
            generation_time: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            framework: request.framework,
            analysis_mode: mode,
            generation_mode,
        };

        Ok(AnalysisResult {
            tests: vec![test],
            summary,
            recommendations: facts.testing_suggestions,
        })
    }

    /// Test code from the generative service, or `None` when the template path
    /// should be used instead
    async fn ai_test_code(&self, request: &AnalysisRequest, facts: &CodeFacts) -> Option<String> {
        if request.options.force_template {
            log::debug!("Template generation forced for {}", request.file_path);
            return None;
        }
        let service = self.service.as_ref()?;

        let completion = CompletionRequest {
            prompt: build_prompt(request, facts),
            model: self.config.service.model.clone(),
            max_tokens: self.config.service.max_tokens,
        };

        let reply = service
            .generate(&completion)
            .instrument(info_span!("service_call", model = %completion.model))
            .await
            .and_then(|reply| extract_test_code(&reply));

        match reply {
            Ok(code) => Some(code),
            Err(e) => {
                log::warn!(
                    "Generative service failed for {}: {e}. Falling back to templates.",
                    request.file_path
                );
                None
            }
        }
    }
}

fn describe_suite(request: &AnalysisRequest, facts: &CodeFacts) -> String {
    let exports = &facts.exports;
    let mut parts = Vec::new();
    for (count, label) in [
        (exports.functions.iter().filter(|f| f.is_exported).count(), "function"),
        (exports.classes.len(), "class"),
        (exports.components.len(), "component"),
    ] {
        match count {
            0 => {}
            1 => parts.push(format!("1 {label}")),
            n if label == "class" => parts.push(format!("{n} classes")),
            n => parts.push(format!("{n} {label}s")),
        }
    }

    let subject = module_stem(&request.file_path);
    if parts.is_empty() {
        format!(
            "{} {} tests for {subject}",
            capitalize(&request.test_type.to_string()),
            request.framework
        )
    } else {
        format!(
            "{} {} tests for {subject} covering {}",
            capitalize(&request.test_type.to_string()),
            request.framework,
            parts.join(", ")
        )
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
