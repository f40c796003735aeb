//! Testing recommendations derived from extracted facts
//!
//! Rules fire in a fixed order; callers and generated prompts rely on it.

use crate::core::{CodeFacts, ComplexityLevel};

pub const ASYNC_SUGGESTION: &str =
    "Test async operations comprehensively: resolved values, rejected promises and error propagation";
pub const HOOKS_SUGGESTION: &str =
    "Use hook testing utilities (renderHook, act) to verify state transitions and effects";
pub const API_SUGGESTION: &str =
    "Mock API calls and cover success, failure and empty-response scenarios";
pub const DOMAIN_SUGGESTION: &str =
    "Add domain-specific test cases for business identifiers and regional formats";
pub const DECOMPOSITION_SUGGESTION: &str =
    "Consider breaking complex logic into smaller, independently testable functions";
pub const ERROR_PATH_SUGGESTION: &str =
    "Add tests for error paths; the code has no explicit error handling";

/// Ordered recommendations for `facts`. Only `patterns` and
/// `complexity.level` are consulted.
pub fn generate_suggestions(facts: &CodeFacts) -> Vec<String> {
    let patterns = &facts.patterns;
    let rules = [
        (patterns.has_async_code, ASYNC_SUGGESTION),
        (patterns.has_hooks, HOOKS_SUGGESTION),
        (patterns.has_api, API_SUGGESTION),
        (patterns.has_domain_context, DOMAIN_SUGGESTION),
        (
            facts.complexity.level == ComplexityLevel::High,
            DECOMPOSITION_SUGGESTION,
        ),
        (!patterns.has_error_handling, ERROR_PATH_SUGGESTION),
    ];

    rules
        .into_iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, text)| text.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FileType, PatternFlags};
    use pretty_assertions::assert_eq;

    fn facts_with(patterns: PatternFlags, level: ComplexityLevel) -> CodeFacts {
        let mut facts = CodeFacts::empty(FileType::TypeScript);
        facts.patterns = patterns;
        facts.complexity.level = level;
        facts
    }

    #[test]
    fn test_all_rules_in_order() {
        let facts = facts_with(
            PatternFlags {
                has_async_code: true,
                has_hooks: true,
                has_api: true,
                has_error_handling: false,
                has_validation: true,
                has_domain_context: true,
            },
            ComplexityLevel::High,
        );
        assert_eq!(
            generate_suggestions(&facts),
            vec![
                ASYNC_SUGGESTION,
                HOOKS_SUGGESTION,
                API_SUGGESTION,
                DOMAIN_SUGGESTION,
                DECOMPOSITION_SUGGESTION,
                ERROR_PATH_SUGGESTION,
            ]
        );
    }

    #[test]
    fn test_quiet_file_with_error_handling() {
        let facts = facts_with(
            PatternFlags {
                has_error_handling: true,
                ..PatternFlags::default()
            },
            ComplexityLevel::Medium,
        );
        assert!(generate_suggestions(&facts).is_empty());
    }

    #[test]
    fn test_plain_file_gets_error_path_only() {
        let facts = facts_with(PatternFlags::default(), ComplexityLevel::Low);
        assert_eq!(generate_suggestions(&facts), vec![ERROR_PATH_SUGGESTION]);
    }
}
