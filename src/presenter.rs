// src/presenter.rs
//! UI state for the analysis form: file label, submit control, loader, output region

use std::io::Write;
use tracing::warn;

pub const SUBMIT_LABEL: &str = "Analyze Now";
pub const SUBMIT_BUSY_LABEL: &str = "Analyzing...";

/// Receives every visible state change the submission handler makes.
/// All text is plain text; nothing is interpreted as markup.
pub trait Presenter {
    /// Blocking user notice for validation failures
    fn alert(&mut self, message: &str);
    fn set_file_label(&mut self, name: &str);
    fn begin_loading(&mut self);
    fn show_response(&mut self, text: &str);
    fn show_error(&mut self, message: &str);
    fn end_loading(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: String,
}

impl Default for SubmitControl {
    fn default() -> Self {
        Self {
            enabled: true,
            label: SUBMIT_LABEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRegion {
    pub text: String,
    pub is_error: bool,
}

/// In-memory model of the page widgets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageState {
    pub file_label: String,
    pub submit: SubmitControl,
    pub loader_visible: bool,
    pub result_visible: bool,
    pub output: OutputRegion,
    pub alerts: Vec<String>,
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Presenter for PageState {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn set_file_label(&mut self, name: &str) {
        self.file_label = name.to_string();
    }

    fn begin_loading(&mut self) {
        self.submit.enabled = false;
        self.submit.label = SUBMIT_BUSY_LABEL.to_string();
        self.result_visible = true;
        self.output = OutputRegion::default();
        self.loader_visible = true;
    }

    fn show_response(&mut self, text: &str) {
        self.output.text = text.to_string();
    }

    fn show_error(&mut self, message: &str) {
        self.output.text = message.to_string();
        self.output.is_error = true;
    }

    fn end_loading(&mut self) {
        self.loader_visible = false;
        self.submit.enabled = true;
        self.submit.label = SUBMIT_LABEL.to_string();
    }
}

/// Renders the page to a terminal: the response text goes to `out` verbatim,
/// everything else (alerts, progress, errors) goes to `err`.
pub struct TerminalPresenter<O: Write, E: Write> {
    state: PageState,
    out: O,
    err: E,
}

impl TerminalPresenter<std::io::Stdout, std::io::Stderr> {
    pub fn stdio() -> Self {
        Self::new(std::io::stdout(), std::io::stderr())
    }
}

impl<O: Write, E: Write> TerminalPresenter<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            state: PageState::new(),
            out,
            err,
        }
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn into_parts(self) -> (PageState, O, E) {
        (self.state, self.out, self.err)
    }

    fn write_err(&mut self, line: &str) {
        if let Err(e) = writeln!(self.err, "{}", line).and_then(|_| self.err.flush()) {
            warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<O: Write, E: Write> Presenter for TerminalPresenter<O, E> {
    fn alert(&mut self, message: &str) {
        self.state.alert(message);
        self.write_err(&format!("⚠️  {}", message));
    }

    fn set_file_label(&mut self, name: &str) {
        self.state.set_file_label(name);
        if !name.is_empty() {
            self.write_err(&format!("📄 {}", name));
        }
    }

    fn begin_loading(&mut self) {
        self.state.begin_loading();
        let label = self.state.submit.label.clone();
        self.write_err(&format!("⏳ {}", label));
    }

    fn show_response(&mut self, text: &str) {
        self.state.show_response(text);
        let written = writeln!(self.out, "{}", text).and_then(|_| self.out.flush());
        if let Err(e) = written {
            warn!("Failed to write response: {}", e);
        }
    }

    fn show_error(&mut self, message: &str) {
        self.state.show_error(message);
        self.write_err(&format!("❌ {}", message));
    }

    fn end_loading(&mut self) {
        self.state.end_loading();
    }
}
