// src/validation.rs
//! Presence checks run before anything touches the network

use thiserror::Error;

use crate::types::{FormSnapshot, PromptType, ResumeFile};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a resume file.")]
    MissingResume,

    #[error("Please enter a job description.")]
    MissingJobDescription,
}

/// A form snapshot that passed validation and is ready to be sent
#[derive(Debug, Clone)]
pub struct Submission {
    pub resume: ResumeFile,
    pub job_description: String,
    pub prompt_type: PromptType,
}

/// File first, then text. Whitespace-only text counts as blank.
pub fn validate(snapshot: FormSnapshot) -> Result<Submission, ValidationError> {
    let resume = match snapshot.resume {
        Some(resume) if resume.size() > 0 => resume,
        _ => return Err(ValidationError::MissingResume),
    };

    if snapshot.job_description.trim().is_empty() {
        return Err(ValidationError::MissingJobDescription);
    }

    Ok(Submission {
        resume,
        job_description: snapshot.job_description,
        prompt_type: snapshot.prompt_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(bytes: &[u8]) -> Option<ResumeFile> {
        Some(ResumeFile::new("resume.pdf", bytes.to_vec()))
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = validate(FormSnapshot::new(None, "Rust engineer")).unwrap_err();
        assert_eq!(err, ValidationError::MissingResume);
        assert_eq!(err.to_string(), "Please upload a resume file.");
    }

    #[test]
    fn test_zero_size_file_rejected() {
        let err = validate(FormSnapshot::new(resume(b""), "Rust engineer")).unwrap_err();
        assert_eq!(err, ValidationError::MissingResume);
    }

    #[test]
    fn test_blank_text_rejected() {
        for text in ["", "   ", "\n\t  "] {
            let err = validate(FormSnapshot::new(resume(b"pdf"), text)).unwrap_err();
            assert_eq!(err, ValidationError::MissingJobDescription);
            assert_eq!(err.to_string(), "Please enter a job description.");
        }
    }

    #[test]
    fn test_file_checked_before_text() {
        let err = validate(FormSnapshot::new(None, "  ")).unwrap_err();
        assert_eq!(err, ValidationError::MissingResume);
    }

    #[test]
    fn test_valid_snapshot_keeps_fields() {
        let snapshot = FormSnapshot::new(resume(b"pdf"), "  Senior Rust engineer ")
            .with_prompt_type(PromptType::Skills);

        let submission = validate(snapshot).unwrap();
        assert_eq!(submission.resume.name, "resume.pdf");
        assert_eq!(submission.job_description, "  Senior Rust engineer ");
        assert_eq!(submission.prompt_type, PromptType::Skills);
    }
}
