//! Prompt text for the generative-text service
//!
//! Pure string building: the same request and facts always give the same
//! prompt.

use crate::core::{AnalysisRequest, CodeFacts, ImportKind};
use std::fmt::Write;

pub fn build_prompt(request: &AnalysisRequest, facts: &CodeFacts) -> String {
    let mut prompt = String::new();
    let options = &request.options;

    writeln!(
        prompt,
        "Generate {} tests using {} for the file `{}`.",
        request.test_type, request.framework, request.file_path
    )
    .unwrap();
    prompt.push('\n');

    prompt.push_str("## Code analysis\n");
    writeln!(prompt, "File type: {}", facts.file_type).unwrap();
    writeln!(prompt, "Functions: {}", list_or_none(function_lines(facts))).unwrap();
    writeln!(prompt, "Classes: {}", list_or_none(class_lines(facts))).unwrap();
    writeln!(prompt, "Components: {}", list_or_none(component_lines(facts))).unwrap();
    writeln!(prompt, "Imports: {}", list_or_none(import_lines(facts))).unwrap();
    prompt.push('\n');

    let complexity = &facts.complexity;
    writeln!(
        prompt,
        "Complexity: {} (cyclomatic {}, cognitive {}, {} lines)",
        complexity.level, complexity.cyclomatic, complexity.cognitive, complexity.lines
    )
    .unwrap();
    prompt.push('\n');

    let patterns = &facts.patterns;
    prompt.push_str("## Detected patterns\n");
    for (label, present) in [
        ("Async code", patterns.has_async_code),
        ("React hooks", patterns.has_hooks),
        ("API calls", patterns.has_api),
        ("Error handling", patterns.has_error_handling),
        ("Validation", patterns.has_validation),
        ("Domain context", patterns.has_domain_context),
    ] {
        writeln!(prompt, "- {label}: {}", if present { "yes" } else { "no" }).unwrap();
    }
    prompt.push('\n');

    if !facts.testing_suggestions.is_empty() {
        prompt.push_str("## Testing suggestions\n");
        for suggestion in &facts.testing_suggestions {
            writeln!(prompt, "- {suggestion}").unwrap();
        }
        prompt.push('\n');
    }

    prompt.push_str("## Requirements\n");
    writeln!(prompt, "- Target coverage: {}%", options.coverage_target).unwrap();
    writeln!(
        prompt,
        "- {}",
        if options.include_edge_cases {
            "Include edge cases (null, undefined, empty values, boundaries)"
        } else {
            "Focus on the main behaviour; edge cases are optional"
        }
    )
    .unwrap();
    writeln!(
        prompt,
        "- {}",
        if options.mock_dependencies {
            "Mock external dependencies and network calls"
        } else {
            "Use real dependencies where practical"
        }
    )
    .unwrap();
    if options.generate_documentation {
        prompt.push_str("- Document each test block with a short comment\n");
    }
    prompt.push_str("- Follow the conventions of the target framework\n");
    prompt.push_str("- Return only the complete test file inside a single fenced code block\n");
    prompt.push('\n');

    prompt.push_str("## Source code\n");
    writeln!(prompt, "```{}", fence_language(&request.file_path)).unwrap();
    prompt.push_str(&request.source_code);
    if !request.source_code.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str("```\n");

    prompt
}

fn list_or_none(items: Vec<String>) -> String {
    if items.is_empty() {
        "none".to_string()
    } else {
        items.join(", ")
    }
}

fn function_lines(facts: &CodeFacts) -> Vec<String> {
    facts
        .exports
        .functions
        .iter()
        .map(|f| {
            let prefix = if f.is_async { "async " } else { "" };
            let returns = f
                .return_type
                .as_ref()
                .map(|t| format!(": {t}"))
                .unwrap_or_default();
            format!("{prefix}{}({}){returns}", f.name, f.params.join(", "))
        })
        .collect()
}

fn class_lines(facts: &CodeFacts) -> Vec<String> {
    facts
        .exports
        .classes
        .iter()
        .map(|c| {
            let base = c
                .superclass
                .as_ref()
                .map(|s| format!(" extends {s}"))
                .unwrap_or_default();
            format!("{}{base} [{}]", c.name, c.methods.join(", "))
        })
        .collect()
}

fn component_lines(facts: &CodeFacts) -> Vec<String> {
    facts
        .exports
        .components
        .iter()
        .map(|c| {
            let mut line = format!("{} (props: {})", c.name, list_or_none(c.props.clone()));
            if !c.hooks.is_empty() {
                write!(line, " hooks: {}", c.hooks.join(", ")).unwrap();
            }
            line
        })
        .collect()
}

fn import_lines(facts: &CodeFacts) -> Vec<String> {
    facts
        .imports
        .iter()
        .map(|i| {
            let kind = match i.kind {
                ImportKind::Default => "default",
                ImportKind::Named => "named",
                ImportKind::Namespace => "namespace",
            };
            format!("{} ({kind}: {})", i.source, i.names.join(", "))
        })
        .collect()
}

fn fence_language(path: &str) -> &'static str {
    match crate::core::types::extension_of(path) {
        Some("ts") | Some("tsx") => "typescript",
        _ => "javascript",
    }
}
