use anyhow::Result;
use clap::Parser;
use resume_analyzer::cli::{handle_command, AnalyzerCli};
use resume_analyzer::logging::init_logging;
use resume_analyzer::EnvironmentConfig;
use std::process::ExitCode;
use tracing::info;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = AnalyzerCli::parse();

    let config = cli.resolve_config(EnvironmentConfig::load()?);

    // Initialize logging before anything talks to the backend
    init_logging(&config.log_file)?;

    info!(
        "Configuration for environment {} from {}",
        EnvironmentConfig::get_environment(),
        config.describe_source()
    );
    info!("Backend: {}", config.base_url);
    match config.timeout_secs {
        Some(secs) => info!("Request timeout: {}s", secs),
        None => info!("Request timeout: none"),
    }

    handle_command(cli, config).await
}
