// src/types/form.rs
//! Transient form fields captured for a single submission

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::Path;
use tracing::warn;

/// Which analysis the backend runs on the resume
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PromptType {
    #[default]
    Analysis,
    Match,
    Skills,
}

impl PromptType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptType::Analysis => "analysis",
            PromptType::Match => "match",
            PromptType::Skills => "skills",
        }
    }
}

/// Uploaded resume: original file name plus raw content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub name: String,
    pub content: Vec<u8>,
}

impl ResumeFile {
    pub fn new(name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    pub fn size(&self) -> usize {
        self.content.len()
    }

    /// Read a resume from disk. A path that does not exist counts as no file selected.
    pub async fn from_path(path: &Path) -> Result<Option<Self>> {
        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Resume file not found: {}", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read resume file: {}", path.display()))
            }
        };

        Ok(Some(Self::new(display_name(path), content)))
    }
}

/// Everything the form holds at the moment it is submitted
#[derive(Debug, Clone, Default)]
pub struct FormSnapshot {
    pub resume: Option<ResumeFile>,
    pub job_description: String,
    pub prompt_type: PromptType,
}

impl FormSnapshot {
    pub fn new(resume: Option<ResumeFile>, job_description: impl Into<String>) -> Self {
        Self {
            resume,
            job_description: job_description.into(),
            prompt_type: PromptType::default(),
        }
    }

    pub fn with_prompt_type(mut self, prompt_type: PromptType) -> Self {
        self.prompt_type = prompt_type;
        self
    }
}

/// Name shown for a selected file: its final path component
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_prompt_type_defaults_to_analysis() {
        assert_eq!(PromptType::default(), PromptType::Analysis);
        assert_eq!(FormSnapshot::default().prompt_type.as_str(), "analysis");
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/home/me/resume.pdf")), "resume.pdf");
        assert_eq!(display_name(Path::new("cv.docx")), "cv.docx");
    }

    #[tokio::test]
    async fn test_from_path_reads_content() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.4").unwrap();

        let resume = ResumeFile::from_path(file.path()).await.unwrap().unwrap();
        assert_eq!(resume.size(), 8);
        assert_eq!(resume.name, display_name(file.path()));
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.pdf");

        assert!(ResumeFile::from_path(&missing).await.unwrap().is_none());
    }
}
