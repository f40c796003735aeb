//! Confidence, coverage and dependency heuristics for a generated suite

use crate::core::{CodeFacts, ComplexityLevel, FileType, Framework};

/// Confidence assigned to suites returned by the generative service
pub const AI_CONFIDENCE: f64 = 0.9;

/// Ceiling for the coverage estimate
pub const MAX_ESTIMATED_COVERAGE: u32 = 95;

/// Confidence for a template-built suite, in `[0, 1]`
pub fn template_confidence(facts: &CodeFacts) -> f64 {
    let level_bonus: f64 = match facts.complexity.level {
        ComplexityLevel::Low => 0.2,
        ComplexityLevel::Medium => 0.1,
        ComplexityLevel::High => 0.0,
    };
    let exports = &facts.exports;
    let bonuses = [
        (!exports.functions.is_empty(), 0.1),
        (!exports.classes.is_empty(), 0.05),
        (!exports.components.is_empty(), 0.05),
        (facts.patterns.has_error_handling, 0.05),
        (facts.patterns.has_validation, 0.05),
    ];

    let score: f64 = bonuses
        .iter()
        .filter(|(applies, _)| *applies)
        .fold(0.5 + level_bonus, |acc, (_, bonus)| acc + bonus);
    score.clamp(0.0, 1.0)
}

/// Rough coverage percentage the generated suite should reach
pub fn estimated_coverage(facts: &CodeFacts) -> u32 {
    let mut coverage: u32 = 60;
    if !facts.exports.functions.is_empty() {
        coverage += 20;
    }
    if facts.patterns.has_async_code {
        coverage += 10;
    }
    coverage += match facts.complexity.level {
        ComplexityLevel::Low => 15,
        ComplexityLevel::Medium => 10,
        ComplexityLevel::High => 0,
    };
    if facts.patterns.has_error_handling {
        coverage += 5;
    }
    if facts.patterns.has_validation {
        coverage += 5;
    }
    coverage.min(MAX_ESTIMATED_COVERAGE)
}

/// Behaviour areas the suite exercises
pub fn coverage_areas(facts: &CodeFacts) -> Vec<String> {
    let patterns = &facts.patterns;
    let areas = [
        (true, "core functionality"),
        (patterns.has_async_code, "async operations"),
        (patterns.has_hooks, "hook state management"),
        (patterns.has_api, "API integration"),
        (patterns.has_error_handling, "error handling"),
        (patterns.has_validation, "input validation"),
        (patterns.has_domain_context, "domain rules"),
    ];
    areas
        .into_iter()
        .filter(|(applies, _)| *applies)
        .map(|(_, area)| area.to_string())
        .collect()
}

/// Packages the generated suite needs installed
pub fn test_dependencies(framework: Framework, facts: &CodeFacts) -> Vec<String> {
    let mut deps: Vec<&str> = match framework {
        Framework::Jest => vec!["jest"],
        Framework::Cypress => vec!["cypress"],
        Framework::Playwright => vec!["@playwright/test"],
    };

    if framework == Framework::Jest {
        if matches!(facts.file_type, FileType::TypeScript | FileType::ReactComponent) {
            deps.extend(["ts-jest", "@types/jest"]);
        }
        let renders_ui =
            facts.file_type == FileType::ReactComponent || !facts.exports.components.is_empty();
        if renders_ui || facts.patterns.has_hooks {
            deps.extend(["@testing-library/react", "@testing-library/jest-dom"]);
        }
        if renders_ui {
            deps.push("@testing-library/user-event");
        }
    }

    deps.into_iter().map(String::from).collect()
}
