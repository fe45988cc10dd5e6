// src/core/service_client.rs
//! HTTP client for the analysis backend - multipart upload in, JSON out

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::types::{AnalyzeResponse, HealthResponse};
use crate::validation::Submission;

pub const ANALYZE_ENDPOINT: &str = "/analyze";
const PING_ENDPOINT: &str = "/ping";

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";
const PROMPT_TYPE_FIELD: &str = "promptType";

/// Why a submission did not produce a response text.
/// Display is the bare message; callers add their own prefix.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can turn a validated submission into analysis text
#[async_trait]
pub trait AnalysisBackend: Send + Sync {
    async fn analyze(&self, submission: &Submission) -> Result<String, SubmitError>;
}

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    /// Create new service client. No timeout unless one is given.
    pub fn new(base_url: impl Into<String>, timeout_seconds: Option<u64>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Backend health check
    pub async fn ping(&self) -> Result<HealthResponse> {
        let url = format!("{}{}", self.base_url, PING_ENDPOINT);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to GET from {}", url))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            anyhow::bail!("HTTP {} error: {}", status, error_text)
        }

        let health: HealthResponse = response
            .json()
            .await
            .context("Failed to parse health response")?;

        if !health.is_ok() {
            anyhow::bail!("Backend reported status: {}", health.status)
        }
        Ok(health)
    }

    fn build_form(&self, submission: &Submission) -> Result<Form, SubmitError> {
        let resume = &submission.resume;
        let part = Part::bytes(resume.content.clone())
            .file_name(resume.name.clone())
            .mime_str(content_type(&resume.name))?;

        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JOB_DESCRIPTION_FIELD, submission.job_description.clone())
            .text(PROMPT_TYPE_FIELD, submission.prompt_type.as_str()))
    }
}

#[async_trait]
impl AnalysisBackend for ServiceClient {
    async fn analyze(&self, submission: &Submission) -> Result<String, SubmitError> {
        let url = format!("{}{}", self.base_url, ANALYZE_ENDPOINT);
        let form = self.build_form(submission)?;

        info!(
            "Submitting {} ({} bytes) to {} as {}",
            submission.resume.name,
            submission.resume.size(),
            url,
            submission.prompt_type.as_str()
        );

        let response = self.client.post(&url).multipart(form).send().await?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.bytes().await?;
        let outcome = interpret_response(status, &body);
        if let Err(e) = &outcome {
            error!("Analysis request failed: {}", e);
        }
        outcome
    }
}

/// The body is decoded as JSON whatever the status. A non-success status
/// uses the body's `error`, falling back to a generic message.
pub fn interpret_response(status: StatusCode, body: &[u8]) -> Result<String, SubmitError> {
    let decoded = AnalyzeResponse::from_body(serde_json::from_slice(body)?)?;

    if !status.is_success() {
        let message = decoded
            .error_message()
            .unwrap_or_else(|| format!("Server responded with status: {}", status.as_u16()));
        return Err(SubmitError::Status {
            status: status.as_u16(),
            message,
        });
    }

    Ok(decoded.response_text())
}

/// Content type for an uploaded file, by extension
pub fn content_type(file_name: &str) -> &'static str {
    let lower_name = file_name.to_lowercase();
    if lower_name.ends_with(".pdf") {
        "application/pdf"
    } else if lower_name.ends_with(".docx") {
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    } else if lower_name.ends_with(".doc") {
        "application/msword"
    } else if lower_name.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}
