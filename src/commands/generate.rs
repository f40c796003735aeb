use super::read_source;
use crate::cli::OutputFormat;
use crate::config::load_config;
use crate::core::{AnalysisRequest, AnalysisResult, Framework, GenerationMode, TestType};
use crate::orchestrator::TestGenerator;
use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;

/// Options collected from `testforge generate`
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub file: PathBuf,
    pub test_type: Option<TestType>,
    pub framework: Option<Framework>,
    pub template_only: bool,
    pub coverage_target: Option<u8>,
    pub no_edge_cases: bool,
    pub no_mocks: bool,
    pub docs: bool,
    pub write: bool,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
}

pub async fn handle_generate(config: GenerateConfig) -> Result<()> {
    let settings = load_config(config.config.as_deref())?;
    let (source, path) = read_source(&config.file)?;

    let request = build_request(&config, &settings.generation, source, path);
    let generator = TestGenerator::new(settings);
    let result = generator.generate_tests(&request).await?;

    if config.write {
        let written = write_test_file(&result)?;
        if config.format == OutputFormat::Text {
            println!("{} {}", "Wrote".green().bold(), written.display());
        }
    }

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Text => print_result(&result, !config.write),
    }
    Ok(())
}

/// Merge CLI flags over the configured defaults
pub(crate) fn build_request(
    config: &GenerateConfig,
    defaults: &crate::config::GenerationDefaults,
    source: String,
    path: String,
) -> AnalysisRequest {
    let mut options = defaults.to_options();
    if let Some(target) = config.coverage_target {
        options.coverage_target = target;
    }
    options.include_edge_cases &= !config.no_edge_cases;
    options.mock_dependencies &= !config.no_mocks;
    options.generate_documentation |= config.docs;
    options.force_template = config.template_only;

    AnalysisRequest::new(source, path)
        .with_test_type(config.test_type.unwrap_or(defaults.test_type))
        .with_framework(config.framework.unwrap_or(defaults.framework))
        .with_options(options)
}

fn write_test_file(result: &AnalysisResult) -> Result<PathBuf> {
    let test = result
        .tests
        .first()
        .context("Generation produced no test file")?;
    let target = PathBuf::from(&test.test_file_name);
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(&target, &test.test_code)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    Ok(target)
}

fn print_result(result: &AnalysisResult, include_code: bool) {
    let summary = &result.summary;
    for test in &result.tests {
        if include_code {
            println!("{}", format!("// {}", test.test_file_name).dimmed());
            print!("{}", test.test_code);
            println!();
        }
        println!("{} {}", "Test file:".bold(), test.test_file_name.cyan());
        println!("{} {}", "Description:".bold(), test.description);
        println!(
            "{} {:.2} ({})",
            "Confidence:".bold(),
            test.confidence,
            match summary.generation_mode {
                GenerationMode::Ai => "generative service",
                GenerationMode::Template => "template",
            }
        );
        println!("{} {}%", "Estimated coverage:".bold(), summary.estimated_coverage);
        println!("{} {}", "Coverage areas:".bold(), test.coverage_areas.join(", "));
        println!("{} {}", "Dependencies:".bold(), test.dependencies.join(" "));
    }

    if !result.recommendations.is_empty() {
        println!("{}", "Recommendations:".yellow().bold());
        for recommendation in &result.recommendations {
            println!("  - {recommendation}");
        }
    }
    println!(
        "{}",
        format!("Generated in {} ms", summary.generation_time).dimmed()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationDefaults;

    fn generate_config() -> GenerateConfig {
        GenerateConfig {
            file: PathBuf::from("src/math.ts"),
            test_type: None,
            framework: None,
            template_only: false,
            coverage_target: None,
            no_edge_cases: false,
            no_mocks: false,
            docs: false,
            write: false,
            format: OutputFormat::Text,
            config: None,
        }
    }

    #[test]
    fn test_defaults_come_from_config() {
        let defaults = GenerationDefaults {
            framework: Framework::Playwright,
            test_type: TestType::Integration,
            coverage_target: 70,
            generate_documentation: true,
            ..GenerationDefaults::default()
        };
        let request = build_request(
            &generate_config(),
            &defaults,
            String::new(),
            "src/math.ts".into(),
        );
        assert_eq!(request.framework, Framework::Playwright);
        assert_eq!(request.test_type, TestType::Integration);
        assert_eq!(request.options.coverage_target, 70);
        assert!(request.options.generate_documentation);
        assert!(!request.options.force_template);
    }

    #[test]
    fn test_flags_override_config() {
        let config = GenerateConfig {
            test_type: Some(TestType::Component),
            coverage_target: Some(95),
            no_edge_cases: true,
            no_mocks: true,
            template_only: true,
            ..generate_config()
        };
        let request = build_request(
            &config,
            &GenerationDefaults::default(),
            String::new(),
            "a.tsx".into(),
        );
        assert_eq!(request.test_type, TestType::Component);
        assert_eq!(request.framework, Framework::Jest);
        assert_eq!(request.options.coverage_target, 95);
        assert!(!request.options.include_edge_cases);
        assert!(!request.options.mock_dependencies);
        assert!(request.options.force_template);
    }
}
