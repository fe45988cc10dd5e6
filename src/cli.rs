// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tokio::io::AsyncReadExt;
use tracing::info;

use crate::core::ServiceClient;
use crate::environment::EnvironmentConfig;
use crate::handler::{SubmissionHandler, SubmitOutcome};
use crate::presenter::TerminalPresenter;
use crate::types::{FormSnapshot, PromptType, ResumeFile};

#[derive(Parser, Debug)]
#[command(name = "resume-analyzer")]
#[command(about = "Send a resume and a job description to the analysis backend")]
pub struct AnalyzerCli {
    #[command(subcommand)]
    pub command: AnalyzerCommand,

    /// Backend base URL, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: Option<u64>,

    /// JSON log destination, truncated on startup
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum AnalyzerCommand {
    /// Submit a resume for analysis against a job description
    Analyze(AnalyzeArgs),
    /// Check that the backend is up
    Ping,
}

#[derive(Args, Debug)]
#[command(group(
    clap::ArgGroup::new("description")
        .required(true)
        .args(["job_description", "job_description_file"])
))]
pub struct AnalyzeArgs {
    /// Resume file (PDF)
    #[arg(long, short)]
    pub resume: PathBuf,

    /// Job description text
    #[arg(long, short)]
    pub job_description: Option<String>,

    /// Read the job description from a file, or `-` for stdin
    #[arg(long)]
    pub job_description_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = PromptType::Analysis)]
    pub prompt_type: PromptType,
}

impl AnalyzerCli {
    pub fn resolve_config(&self, base: EnvironmentConfig) -> EnvironmentConfig {
        base.with_overrides(
            self.base_url.clone(),
            self.timeout_secs,
            self.log_file.clone(),
        )
    }
}

pub async fn handle_command(cli: AnalyzerCli, config: EnvironmentConfig) -> Result<ExitCode> {
    let client = ServiceClient::new(config.base_url.clone(), config.timeout_secs)?;

    match cli.command {
        AnalyzerCommand::Ping => {
            let health = client.ping().await?;
            info!("Backend {} is {}", client.base_url(), health.status);
            println!("✅ {} is up ({})", client.base_url(), health.status);
            Ok(ExitCode::SUCCESS)
        }

        AnalyzerCommand::Analyze(args) => {
            let mut handler = SubmissionHandler::new(client, TerminalPresenter::stdio());
            handler.on_file_change(&[&args.resume]);

            let snapshot = capture_form(&args).await?;
            let outcome = handler.on_submit(snapshot).await;
            Ok(ExitCode::from(exit_status(&outcome)))
        }
    }
}

/// Read the form fields named on the command line
pub async fn capture_form(args: &AnalyzeArgs) -> Result<FormSnapshot> {
    let resume = ResumeFile::from_path(&args.resume).await?;

    let job_description = match (&args.job_description, &args.job_description_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => read_description(path).await?,
        (None, None) => String::new(),
    };

    Ok(FormSnapshot::new(resume, job_description).with_prompt_type(args.prompt_type))
}

async fn read_description(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read job description from stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read job description: {}", path.display()))
}

/// 0 completed, 1 failed, 2 rejected before sending
pub fn exit_status(outcome: &SubmitOutcome) -> u8 {
    match outcome {
        SubmitOutcome::Completed(_) => 0,
        SubmitOutcome::Failed(_) => 1,
        SubmitOutcome::Rejected(_) => 2,
    }
}
