//! Fact extraction
//!
//! Two extractors produce the same [`CodeFacts`] shape: the tree-sitter walker
//! and the pattern-based fallback. [`analyze_source`] runs the first, falls back
//! to the second on a parse failure, then classifies complexity and attaches
//! testing suggestions.

pub mod domain;
pub mod regex_fallback;
pub mod typescript;

use crate::complexity::classify_metrics;
use crate::core::{AnalysisMode, CodeFacts};
use crate::errors::{Error, Result};
use crate::suggestions::generate_suggestions;

pub use typescript::TypeScriptAnalyzer;

pub trait FactExtractor: Send + Sync {
    fn mode(&self) -> AnalysisMode;
    fn extract(&self, source: &str, path: &str) -> Result<CodeFacts>;
}

/// Pattern-based extractor used when parsing fails
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexFactExtractor;

impl FactExtractor for RegexFactExtractor {
    fn mode(&self) -> AnalysisMode {
        AnalysisMode::Regex
    }

    fn extract(&self, source: &str, path: &str) -> Result<CodeFacts> {
        Ok(regex_fallback::basic_analysis(source, path))
    }
}

/// Completed facts plus the extractor that produced them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFacts {
    pub facts: CodeFacts,
    pub mode: AnalysisMode,
}

/// Run the primary extractor, falling back to the secondary on failure
pub fn extract_with_fallback(
    primary: &dyn FactExtractor,
    fallback: &dyn FactExtractor,
    source: &str,
    path: &str,
) -> Result<ExtractedFacts> {
    let (mut facts, mode) = match primary.extract(source, path) {
        Ok(facts) => (facts, primary.mode()),
        Err(primary_err) => {
            log::debug!("{primary_err}; falling back to pattern analysis");
            let facts = fallback.extract(source, path).map_err(|fallback_err| {
                Error::Analysis(format!(
                    "no facts could be extracted from {path}: {primary_err}; {fallback_err}"
                ))
            })?;
            (facts, fallback.mode())
        }
    };

    classify_metrics(&mut facts.complexity);
    facts.testing_suggestions = generate_suggestions(&facts);

    Ok(ExtractedFacts { facts, mode })
}

/// AST analysis with the regex fallback
pub fn analyze_source(source: &str, path: &str) -> Result<ExtractedFacts> {
    extract_with_fallback(&TypeScriptAnalyzer, &RegexFactExtractor, source, path)
}
