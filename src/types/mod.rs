pub mod form;
pub mod response;

pub use form::{FormSnapshot, PromptType, ResumeFile};
pub use response::{AnalyzeResponse, HealthResponse};
