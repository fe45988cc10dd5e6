// src/handler.rs
//! Submission handler: validate, submit once, render, always reset the loading state

use std::ops::{Deref, DerefMut};
use std::path::Path;
use tracing::{info, warn};

use crate::core::AnalysisBackend;
use crate::presenter::Presenter;
use crate::types::form::display_name;
use crate::types::FormSnapshot;
use crate::validation::{validate, ValidationError};

pub const ERROR_PREFIX: &str = "An error occurred: ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed, nothing was sent
    Rejected(ValidationError),
    /// Backend answered with analysis text
    Completed(String),
    /// Request was sent but failed; holds the message without prefix
    Failed(String),
}

/// Holds the presenter in loading state; leaving it in any way ends loading.
struct LoadingGuard<'a, P: Presenter> {
    presenter: &'a mut P,
}

impl<'a, P: Presenter> LoadingGuard<'a, P> {
    fn enter(presenter: &'a mut P) -> Self {
        presenter.begin_loading();
        Self { presenter }
    }
}

impl<P: Presenter> Deref for LoadingGuard<'_, P> {
    type Target = P;

    fn deref(&self) -> &P {
        self.presenter
    }
}

impl<P: Presenter> DerefMut for LoadingGuard<'_, P> {
    fn deref_mut(&mut self) -> &mut P {
        self.presenter
    }
}

impl<P: Presenter> Drop for LoadingGuard<'_, P> {
    fn drop(&mut self) {
        self.presenter.end_loading();
    }
}

/// Owns the backend and the page widgets for as long as the form is on screen
pub struct SubmissionHandler<B, P> {
    backend: B,
    presenter: P,
}

impl<B: AnalysisBackend, P: Presenter> SubmissionHandler<B, P> {
    pub fn new(backend: B, presenter: P) -> Self {
        Self { backend, presenter }
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }

    /// Show the first selected file's name, or clear the label
    pub fn on_file_change<S: AsRef<Path>>(&mut self, files: &[S]) {
        let label = files
            .first()
            .map(|f| display_name(f.as_ref()))
            .unwrap_or_default();
        self.presenter.set_file_label(&label);
    }

    /// One submit cycle. `&mut self` keeps a handler to one request at a time.
    pub async fn on_submit(&mut self, snapshot: FormSnapshot) -> SubmitOutcome {
        let submission = match validate(snapshot) {
            Ok(submission) => submission,
            Err(e) => {
                warn!("Submission rejected: {}", e);
                self.presenter.alert(&e.to_string());
                return SubmitOutcome::Rejected(e);
            }
        };

        let mut page = LoadingGuard::enter(&mut self.presenter);

        match self.backend.analyze(&submission).await {
            Ok(text) => {
                info!("Analysis received ({} chars)", text.len());
                page.show_response(&text);
                SubmitOutcome::Completed(text)
            }
            Err(e) => {
                let message = e.to_string();
                page.show_error(&format!("{}{}", ERROR_PREFIX, message));
                SubmitOutcome::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SubmitError;
    use crate::presenter::{PageState, SUBMIT_LABEL};
    use crate::types::ResumeFile;
    use crate::validation::Submission;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    enum Reply {
        Text(&'static str),
        Status(u16, &'static str),
        BadJson,
        Panic,
    }

    struct MockBackend {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl MockBackend {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl AnalysisBackend for MockBackend {
        async fn analyze(&self, _submission: &Submission) -> Result<String, SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Status(status, message) => Err(SubmitError::Status {
                    status,
                    message: message.to_string(),
                }),
                Reply::BadJson => Err(serde_json::from_str::<serde_json::Value>("{")
                    .unwrap_err()
                    .into()),
                Reply::Panic => panic!("backend blew up"),
            }
        }
    }

    /// Page shared with the test after the handler moves into a task
    #[derive(Clone, Default)]
    struct SharedPage(Arc<Mutex<PageState>>);

    impl Presenter for SharedPage {
        fn alert(&mut self, message: &str) {
            self.0.lock().unwrap().alert(message);
        }
        fn set_file_label(&mut self, name: &str) {
            self.0.lock().unwrap().set_file_label(name);
        }
        fn begin_loading(&mut self) {
            self.0.lock().unwrap().begin_loading();
        }
        fn show_response(&mut self, text: &str) {
            self.0.lock().unwrap().show_response(text);
        }
        fn show_error(&mut self, message: &str) {
            self.0.lock().unwrap().show_error(message);
        }
        fn end_loading(&mut self) {
            self.0.lock().unwrap().end_loading();
        }
    }

    fn valid_snapshot() -> FormSnapshot {
        FormSnapshot::new(
            Some(ResumeFile::new("resume.pdf", b"%PDF-1.4".to_vec())),
            "Backend engineer, Rust",
        )
    }

    fn handler(reply: Reply) -> SubmissionHandler<MockBackend, PageState> {
        SubmissionHandler::new(MockBackend::new(reply), PageState::new())
    }

    fn assert_idle(page: &PageState) {
        assert!(page.submit.enabled);
        assert_eq!(page.submit.label, SUBMIT_LABEL);
        assert!(!page.loader_visible);
    }

    #[tokio::test]
    async fn test_missing_file_alerts_without_request() {
        let mut handler = handler(Reply::Text("unused"));

        let outcome = handler
            .on_submit(FormSnapshot::new(None, "Backend engineer"))
            .await;

        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::MissingResume));
        assert_eq!(handler.backend().calls(), 0);
        assert_eq!(handler.presenter().alerts, vec!["Please upload a resume file."]);
        assert!(!handler.presenter().result_visible);
    }

    #[tokio::test]
    async fn test_zero_size_file_alerts_without_request() {
        let mut handler = handler(Reply::Text("unused"));
        let snapshot = FormSnapshot::new(Some(ResumeFile::new("empty.pdf", Vec::new())), "Role");

        let outcome = handler.on_submit(snapshot).await;

        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::MissingResume));
        assert_eq!(handler.backend().calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_description_alerts_without_request() {
        let mut handler = handler(Reply::Text("unused"));
        let mut snapshot = valid_snapshot();
        snapshot.job_description = " \t\n".to_string();

        let outcome = handler.on_submit(snapshot).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected(ValidationError::MissingJobDescription)
        );
        assert_eq!(handler.backend().calls(), 0);
        assert_eq!(
            handler.presenter().alerts,
            vec!["Please enter a job description."]
        );
    }

    #[tokio::test]
    async fn test_success_renders_text_verbatim() {
        let mut handler = handler(Reply::Text("<h1>85% match</h1>"));

        let outcome = handler.on_submit(valid_snapshot()).await;

        assert_eq!(outcome, SubmitOutcome::Completed("<h1>85% match</h1>".to_string()));
        assert_eq!(handler.backend().calls(), 1);
        let page = handler.presenter();
        assert_eq!(page.output.text, "<h1>85% match</h1>");
        assert!(!page.output.is_error);
        assert!(page.result_visible);
        assert_idle(page);
    }

    #[tokio::test]
    async fn test_status_error_with_message() {
        let mut handler = handler(Reply::Status(400, "Invalid analysis type specified."));

        let outcome = handler.on_submit(valid_snapshot()).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed("Invalid analysis type specified.".to_string())
        );
        let page = handler.presenter();
        assert_eq!(
            page.output.text,
            "An error occurred: Invalid analysis type specified."
        );
        assert!(page.output.is_error);
        assert_idle(page);
    }

    #[tokio::test]
    async fn test_generic_status_error() {
        let mut handler = handler(Reply::Status(500, "Server responded with status: 500"));

        handler.on_submit(valid_snapshot()).await;

        let page = handler.presenter();
        assert_eq!(
            page.output.text,
            "An error occurred: Server responded with status: 500"
        );
        assert!(page.output.is_error);
        assert_idle(page);
    }

    #[tokio::test]
    async fn test_decode_error_is_rendered() {
        let mut handler = handler(Reply::BadJson);

        let outcome = handler.on_submit(valid_snapshot()).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        let page = handler.presenter();
        assert!(page.output.text.starts_with(ERROR_PREFIX));
        assert!(page.output.is_error);
        assert_idle(page);
    }

    #[tokio::test]
    async fn test_transport_error_is_rendered() {
        let backend = crate::core::ServiceClient::new("http://127.0.0.1:1", Some(5)).unwrap();
        let mut handler = SubmissionHandler::new(backend, PageState::new());

        let outcome = handler.on_submit(valid_snapshot()).await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        let page = handler.presenter();
        assert!(page.output.text.starts_with(ERROR_PREFIX));
        assert!(page.output.is_error);
        assert_idle(page);
    }

    #[tokio::test]
    async fn test_new_attempt_clears_previous_error() {
        let mut handler = handler(Reply::Status(503, "busy"));
        handler.on_submit(valid_snapshot()).await;
        assert!(handler.presenter().output.is_error);

        handler.backend.reply = Reply::Text("second try");
        handler.on_submit(valid_snapshot()).await;

        let page = handler.presenter();
        assert_eq!(page.output.text, "second try");
        assert!(!page.output.is_error);
        assert_eq!(handler.backend().calls(), 2);
    }

    #[tokio::test]
    async fn test_loading_state_reset_when_backend_panics() {
        let page = SharedPage::default();
        let mut handler = SubmissionHandler::new(MockBackend::new(Reply::Panic), page.clone());

        let joined = tokio::spawn(async move { handler.on_submit(valid_snapshot()).await }).await;

        assert!(joined.unwrap_err().is_panic());
        let state = page.0.lock().unwrap();
        assert!(state.result_visible);
        assert_idle(&state);
    }

    #[test]
    fn test_file_change_updates_label() {
        let mut handler = handler(Reply::Text("unused"));

        handler.on_file_change(&["/tmp/uploads/resume.pdf", "/tmp/other.pdf"]);
        assert_eq!(handler.presenter().file_label, "resume.pdf");

        handler.on_file_change::<&str>(&[]);
        assert_eq!(handler.presenter().file_label, "");
    }
}
