use anyhow::Result;
use clap::Parser;
use testforge::cli::{Cli, Commands};
use testforge::commands::{handle_analyze, handle_generate, init_config, GenerateConfig};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "TESTFORGE_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            test_type,
            framework,
            template_only,
            coverage_target,
            no_edge_cases,
            no_mocks,
            docs,
            write,
            format,
            config,
        } => {
            handle_generate(GenerateConfig {
                file,
                test_type,
                framework,
                template_only,
                coverage_target,
                no_edge_cases,
                no_mocks,
                docs,
                write,
                format,
                config,
            })
            .await
        }
        Commands::Analyze { file, format } => handle_analyze(&file, format),
        Commands::Init { force } => init_config(&std::env::current_dir()?, force),
    }
}
