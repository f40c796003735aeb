use crate::core::{Framework, TestType};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "testforge")]
#[command(about = "Generate test suites for TypeScript and JavaScript modules", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a test file for a source module
    Generate {
        /// Source file to generate tests for
        file: PathBuf,

        /// Kind of test suite (defaults to the configured value)
        #[arg(short = 't', long = "type", value_enum)]
        test_type: Option<TestType>,

        /// Target test framework (defaults to the configured value)
        #[arg(short, long, value_enum)]
        framework: Option<Framework>,

        /// Never call the generative service
        #[arg(long = "template-only")]
        template_only: bool,

        /// Desired coverage percentage mentioned in the prompt
        #[arg(long = "coverage-target", value_parser = clap::value_parser!(u8).range(0..=100))]
        coverage_target: Option<u8>,

        /// Skip null/undefined/empty-input tests
        #[arg(long = "no-edge-cases")]
        no_edge_cases: bool,

        /// Do not mock service-like imports
        #[arg(long = "no-mocks")]
        no_mocks: bool,

        /// Prepend a documentation header to the generated file
        #[arg(long)]
        docs: bool,

        /// Write the test file next to the source instead of printing it
        #[arg(long)]
        write: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Configuration file (defaults to the nearest .testforge.toml)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the facts extracted from a source module
    Analyze {
        /// Source file to analyze
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Write a default .testforge.toml in the current directory
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_flags() {
        let cli = Cli::try_parse_from([
            "testforge",
            "generate",
            "src/Widget.tsx",
            "--type",
            "component",
            "--framework",
            "jest",
            "--template-only",
            "--coverage-target",
            "90",
            "--format",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Generate {
                file,
                test_type,
                framework,
                template_only,
                coverage_target,
                format,
                ..
            } => {
                assert_eq!(file, PathBuf::from("src/Widget.tsx"));
                assert_eq!(test_type, Some(TestType::Component));
                assert_eq!(framework, Some(Framework::Jest));
                assert!(template_only);
                assert_eq!(coverage_target, Some(90));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_coverage_target_range() {
        let result = Cli::try_parse_from([
            "testforge",
            "generate",
            "a.ts",
            "--coverage-target",
            "120",
        ]);
        assert!(result.is_err());
    }
}
