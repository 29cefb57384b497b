use strum::{AsRefStr, Display as StrumDisplay};

use crate::domain::conversation::ConversationEntry;
use crate::domain::errors::AppResult;
use crate::presentation::report::ReportDocument;

/// Toast severity; the lowercase name doubles as the CSS modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn new(level: ToastLevel, message: impl Into<String>) -> Self {
        Self { level, message: message.into() }
    }
}

/// Narrative text packaged as a file for the user to save.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDownload {
    pub file_name: String,
    pub contents: String,
    pub mime: &'static str,
}

/// Everything the orchestrator pushes out to the page.
///
/// Called synchronously from inside orchestrator operations; implementations
/// must not call back into the orchestrator.
pub trait PresentationSink {
    fn notify(&self, toast: Toast);

    fn conversation_changed(&self, _entries: &[ConversationEntry]) {}

    fn loading_changed(&self, _loading: bool) {}

    fn report_opened(&self, _document: &ReportDocument) {}

    fn report_closed(&self) {}

    /// Hand the file to the user.
    fn deliver_download(&self, download: &ReportDownload) -> AppResult<()>;
}
