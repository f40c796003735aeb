use super::read_source;
use crate::cli::OutputFormat;
use crate::core::{CodeFacts, ComplexityLevel};
use crate::orchestrator::TestGenerator;
use anyhow::Result;
use colored::*;
use std::path::Path;

pub fn handle_analyze(file: &Path, format: OutputFormat) -> Result<()> {
    let (source, path) = read_source(file)?;
    let extracted = TestGenerator::offline().analyze(&source, &path)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&extracted.facts)?),
        OutputFormat::Text => {
            println!(
                "{} {} ({:?} analysis)",
                "Facts for".bold(),
                path.cyan(),
                extracted.mode
            );
            print!("{}", render_facts(&extracted.facts));
        }
    }
    Ok(())
}

pub(crate) fn render_facts(facts: &CodeFacts) -> String {
    let exports = &facts.exports;
    let mut out = String::new();

    out.push_str(&format!("  File type:  {}\n", facts.file_type));
    let functions: Vec<String> = exports
        .functions
        .iter()
        .map(|f| {
            let marker = if f.is_async { "async " } else { "" };
            format!("{marker}{}({})", f.name, f.params.join(", "))
        })
        .collect();
    out.push_str(&format!("  Functions:  {}\n", join_or_dash(&functions)));
    let classes: Vec<String> = exports.classes.iter().map(|c| c.name.clone()).collect();
    out.push_str(&format!("  Classes:    {}\n", join_or_dash(&classes)));
    let components: Vec<String> = exports.components.iter().map(|c| c.name.clone()).collect();
    out.push_str(&format!("  Components: {}\n", join_or_dash(&components)));
    let imports: Vec<String> = facts.imports.iter().map(|i| i.source.clone()).collect();
    out.push_str(&format!("  Imports:    {}\n", join_or_dash(&imports)));

    let level = facts.complexity.level.to_string();
    let level = match facts.complexity.level {
        ComplexityLevel::Low => level.green(),
        ComplexityLevel::Medium => level.yellow(),
        ComplexityLevel::High => level.red(),
    };
    out.push_str(&format!(
        "  Complexity: {level} (cyclomatic {}, cognitive {}, {} lines)\n",
        facts.complexity.cyclomatic, facts.complexity.cognitive, facts.complexity.lines
    ));

    let patterns = &facts.patterns;
    let detected: Vec<String> = [
        (patterns.has_async_code, "async"),
        (patterns.has_hooks, "hooks"),
        (patterns.has_api, "api"),
        (patterns.has_error_handling, "error handling"),
        (patterns.has_validation, "validation"),
        (patterns.has_domain_context, "domain"),
    ]
    .into_iter()
    .filter(|(present, _)| *present)
    .map(|(_, label)| label.to_string())
    .collect();
    out.push_str(&format!("  Patterns:   {}\n", join_or_dash(&detected)));

    if !facts.testing_suggestions.is_empty() {
        out.push_str("  Suggestions:\n");
        for suggestion in &facts.testing_suggestions {
            out.push_str(&format!("    - {suggestion}\n"));
        }
    }
    out
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}
