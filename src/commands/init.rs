use crate::config::CONFIG_FILE_NAME;
use anyhow::Result;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# testforge configuration

[service]
endpoint = "https://api.openai.com/v1/chat/completions"
model = "gpt-4o-mini"
max_tokens = 4000
timeout_secs = 60
# The API key is read from TESTFORGE_API_KEY.

[generation]
framework = "jest"
test_type = "unit"
coverage_target = 80
include_edge_cases = true
mock_dependencies = true
generate_documentation = false
"#;

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
