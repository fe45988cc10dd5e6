//! Client for a resume analysis backend: capture a resume and a job
//! description, validate them, post them as one multipart request and render
//! the answer or the error.

pub mod cli;
pub mod core;
pub mod environment;
pub mod handler;
pub mod logging;
pub mod presenter;
pub mod types;
pub mod validation;

pub use crate::core::{AnalysisBackend, ServiceClient, SubmitError};
pub use environment::EnvironmentConfig;
pub use handler::{SubmissionHandler, SubmitOutcome};
pub use presenter::{PageState, Presenter, TerminalPresenter};
pub use types::{FormSnapshot, PromptType, ResumeFile};
pub use validation::{validate, Submission, ValidationError};
