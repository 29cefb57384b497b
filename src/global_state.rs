use leptos::*;
use once_cell::sync::OnceCell;

use crate::application::Toast;
use crate::domain::conversation::ConversationEntry;
use crate::global_signals;
use crate::presentation::report::ReportDocument;

/// A toast currently on screen. `id` lets its timer remove exactly it.
#[derive(Debug, Clone, PartialEq)]
pub struct ToastItem {
    pub id: u64,
    pub toast: Toast,
}

/// Process-wide reactive state the view renders from. Written only by the
/// orchestrator's sink and the input box.
pub struct Globals {
    pub conversation: RwSignal<Vec<ConversationEntry>>,
    pub is_loading: RwSignal<bool>,
    pub toasts: RwSignal<Vec<ToastItem>>,
    pub report_view: RwSignal<Option<ReportDocument>>,
    pub query_input: RwSignal<String>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        conversation: create_rw_signal(Vec::new()),
        is_loading: create_rw_signal(false),
        toasts: create_rw_signal(Vec::new()),
        report_view: create_rw_signal(None),
        query_input: create_rw_signal(String::new()),
    })
}

global_signals! {
    pub conversation => conversation: Vec<ConversationEntry>,
    pub is_loading => is_loading: bool,
    pub toasts => toasts: Vec<ToastItem>,
    pub report_view => report_view: Option<ReportDocument>,
    pub query_input => query_input: String,
}
