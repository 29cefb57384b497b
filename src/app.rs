use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::{callback::Timeout, future::TimeoutFuture};
use leptos::*;

use crate::{
    application::{Orchestrator, PresentationSink, ReportDownload, Toast},
    domain::{
        conversation::ConversationEntry,
        errors::AppResult,
        logging::LogComponent,
    },
    global_state::{ToastItem, conversation, is_loading, query_input, report_view, toasts},
    infrastructure::{
        BrowserTimeProvider, CanvasChartBackend, HttpQueryService, load_app_config, save_text_file,
    },
    log_warn,
    presentation::report::ReportDocument,
};

pub type AppOrchestrator = Orchestrator<HttpQueryService, CanvasChartBackend>;

const SUGGESTIONS: [&str; 4] = ["Apple", "Tesla", "Microsoft", "NVIDIA"];

thread_local! {
    static ORCHESTRATOR: RefCell<Option<Rc<AppOrchestrator>>> = const { RefCell::new(None) };
    static NEXT_TOAST_ID: Cell<u64> = const { Cell::new(0) };
}

fn orchestrator() -> Option<Rc<AppOrchestrator>> {
    ORCHESTRATOR.with(|slot| slot.borrow().clone())
}

/// Build the orchestrator once, wired to the global signals.
pub fn install_orchestrator() {
    let config = load_app_config();
    let service = HttpQueryService::new(config.report_url());
    let sink = Rc::new(SignalSink { toast_duration_ms: config.toast_duration_ms });
    let orchestrator = Orchestrator::new(
        service,
        CanvasChartBackend::default(),
        sink,
        Rc::new(BrowserTimeProvider::new()),
        config,
    );
    ORCHESTRATOR.with(|slot| *slot.borrow_mut() = Some(Rc::new(orchestrator)));
}

/// Bridge from orchestrator output to Leptos signals.
struct SignalSink {
    toast_duration_ms: u32,
}

impl PresentationSink for SignalSink {
    fn notify(&self, toast: Toast) {
        let id = NEXT_TOAST_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        toasts().update(|list| list.push(ToastItem { id, toast }));
        Timeout::new(self.toast_duration_ms, move || {
            toasts().update(|list| list.retain(|item| item.id != id));
        })
        .forget();
    }

    fn conversation_changed(&self, entries: &[ConversationEntry]) {
        conversation().set(entries.to_vec());
    }

    fn loading_changed(&self, loading: bool) {
        is_loading().set(loading);
    }

    fn report_opened(&self, document: &ReportDocument) {
        report_view().set(Some(document.clone()));
    }

    fn report_closed(&self) {
        report_view().set(None);
    }

    fn deliver_download(&self, download: &ReportDownload) -> AppResult<()> {
        save_text_file(download)
    }
}

fn submit_query(raw: String) {
    if is_loading().get_untracked() {
        return;
    }
    let Some(orchestrator) = orchestrator() else {
        return;
    };
    spawn_local(async move {
        orchestrator.submit(&raw).await;
    });
}

fn submit_input() {
    let raw = query_input().get_untracked();
    if is_loading().get_untracked() {
        return;
    }
    query_input().set(String::new());
    submit_query(raw);
}

fn open_report(index: usize) {
    let Some(orchestrator) = orchestrator() else {
        return;
    };
    let Some(document) = orchestrator.activate_teaser(index) else {
        return;
    };
    if document.has_chart() {
        let delay = orchestrator.config().chart_bind_delay_ms;
        spawn_local(async move {
            TimeoutFuture::new(delay).await;
            if let Err(e) = orchestrator.bind_active_chart() {
                log_warn!(LogComponent::Presentation("App"), "chart not bound: {}", e);
            }
        });
    }
}

fn close_report() {
    if let Some(orchestrator) = orchestrator() {
        orchestrator.close_report();
    }
}

fn download_report() {
    if let Some(orchestrator) = orchestrator() {
        orchestrator.download_report();
    }
}

/// Report chat root component
#[component]
pub fn App() -> impl IntoView {
    let _escape = window_event_listener(ev::keydown, |event| {
        if event.key() == "Escape" && report_view().get_untracked().is_some() {
            close_report();
        }
    });

    view! {
        <style>
            {r#"
            .report-chat-app { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; display: flex; flex-direction: column; height: 100vh; background: #f9fafb; color: #111827; }
            .messages-area { flex: 1; overflow-y: auto; padding: 24px; }
            .message-group { display: flex; margin-bottom: 16px; }
            .message-group.user { justify-content: flex-end; }
            .message-bubble { max-width: 70%; padding: 12px 16px; border-radius: 12px; background: #ffffff; border: 1px solid #e5e7eb; }
            .message-group.user .message-bubble { background: #4f46e5; color: #ffffff; border: none; }
            .analysis-card { background: #ffffff; border: 1px solid #e5e7eb; border-radius: 12px; padding: 16px; max-width: 80%; }
            .stock-info-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 12px; }
            .metric-label { font-size: 12px; color: #6b7280; }
            .metric-value { font-weight: 600; }
            .news-list { margin: 0; padding-left: 20px; }
            .report-preview { max-height: 160px; overflow: hidden; margin-bottom: 12px; }
            .empty-state { text-align: center; margin-top: 15vh; color: #6b7280; }
            .suggestion-chip { margin: 4px; padding: 6px 14px; border-radius: 16px; border: 1px solid #d1d5db; background: #ffffff; cursor: pointer; }
            .input-bar { display: flex; gap: 8px; padding: 16px 24px; border-top: 1px solid #e5e7eb; background: #ffffff; }
            .input-bar input { flex: 1; padding: 10px 14px; border-radius: 8px; border: 1px solid #d1d5db; }
            .btn { padding: 8px 16px; border-radius: 8px; border: 1px solid #d1d5db; background: #ffffff; cursor: pointer; }
            .btn-primary { background: #4f46e5; border-color: #4f46e5; color: #ffffff; }
            .toast-container { position: fixed; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 20; }
            .toast { padding: 10px 16px; border-radius: 8px; color: #ffffff; background: #374151; }
            .toast.success { background: #16a34a; }
            .toast.warning { background: #d97706; }
            .toast.error { background: #dc2626; }
            .modal { position: fixed; inset: 0; background: rgba(0, 0, 0, 0.5); display: flex; align-items: center; justify-content: center; z-index: 10; }
            .modal-content { background: #ffffff; border-radius: 12px; width: min(900px, 92vw); max-height: 90vh; display: flex; flex-direction: column; }
            .modal-header, .modal-footer { display: flex; justify-content: space-between; align-items: center; padding: 16px 20px; }
            .modal-body { overflow-y: auto; padding: 0 20px; }
            .price-chart { width: 100%; height: 320px; }
            .stock-metric-row { display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid #f3f4f6; }
            .report-formatter table { border-collapse: collapse; }
            .report-formatter th, .report-formatter td { border: 1px solid #e5e7eb; padding: 4px 8px; }
            "#}
        </style>
        <div class="report-chat-app">
            <Conversation/>
            <InputBar/>
            <Toasts/>
            <ReportModal/>
        </div>
    }
}

#[component]
fn Conversation() -> impl IntoView {
    let messages_ref = create_node_ref::<html::Div>();

    // Keep the newest entry in view once layout has settled.
    create_effect(move |_| {
        conversation().with(|_| ());
        Timeout::new(0, move || {
            if let Some(area) = messages_ref.get_untracked() {
                area.set_scroll_top(area.scroll_height());
            }
        })
        .forget();
    });

    view! {
        <div class="messages-area" node_ref=messages_ref>
            <Show when=move || conversation().with(|entries| entries.is_empty())>
                <EmptyState/>
            </Show>
            {move || {
                conversation()
                    .get()
                    .into_iter()
                    .enumerate()
                    .map(|(index, entry)| view! { <Entry index=index entry=entry/> })
                    .collect_view()
            }}
        </div>
    }
}

#[component]
fn EmptyState() -> impl IntoView {
    view! {
        <div class="empty-state">
            <h2>"Financial Report Assistant"</h2>
            <p>"Ask about a company to get stock metrics, recent news and a full analysis."</p>
            <div class="suggestions">
                {SUGGESTIONS
                    .iter()
                    .map(|suggestion| {
                        let query = suggestion.to_string();
                        view! {
                            <button
                                class="suggestion-chip"
                                on:click=move |_| {
                                    query_input().set(query.clone());
                                    submit_input();
                                }
                            >
                                {*suggestion}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
fn Entry(index: usize, entry: ConversationEntry) -> impl IntoView {
    match entry {
        ConversationEntry::UserMessage { text } => view! {
            <div class="message-group user"><div class="message-bubble">{text}</div></div>
        }
        .into_view(),
        ConversationEntry::SystemMessage { text } => view! {
            <div class="message-group assistant"><div class="message-bubble">{text}</div></div>
        }
        .into_view(),
        ConversationEntry::DataCard(card) => view! {
            <div class="message-group assistant" inner_html=card.html></div>
        }
        .into_view(),
        ConversationEntry::ReportTeaser(teaser) => view! {
            <div class="message-group assistant">
                <div class="analysis-card analysis-report">
                    <h3>"AI Analysis"</h3>
                    <div class="report-preview report-formatter" inner_html=teaser.preview_html></div>
                    <button class="btn btn-primary" on:click=move |_| open_report(index)>
                        "View Full Report"
                    </button>
                </div>
            </div>
        }
        .into_view(),
    }
}

#[component]
fn InputBar() -> impl IntoView {
    view! {
        <div class="input-bar">
            <input
                type="text"
                placeholder="Enter a company name or ask a question..."
                prop:value=move || query_input().get()
                on:input=move |event| query_input().set(event_target_value(&event))
                on:keydown=move |event: ev::KeyboardEvent| {
                    if event.key() == "Enter" {
                        submit_input();
                    }
                }
            />
            <button
                class="btn btn-primary"
                disabled=move || is_loading().get()
                on:click=move |_| submit_input()
            >
                {move || if is_loading().get() { "Analyzing..." } else { "Send" }}
            </button>
        </div>
    }
}

#[component]
fn Toasts() -> impl IntoView {
    view! {
        <div class="toast-container">
            <For
                each=move || toasts().get()
                key=|item| item.id
                children=move |item| {
                    let class = format!("toast {}", item.toast.level);
                    view! { <div class=class>{item.toast.message}</div> }
                }
            />
        </div>
    }
}

#[component]
fn ReportModal() -> impl IntoView {
    view! {
        {move || {
            report_view()
                .get()
                .map(|document| {
                    view! {
                        <div
                            class="modal active"
                            on:click=|event| {
                                if event.target() == event.current_target() {
                                    close_report();
                                }
                            }
                        >
                            <div class="modal-content">
                                <div class="modal-header">
                                    <h2>{document.title}</h2>
                                    <button class="btn modal-close" on:click=|_| close_report()>"×"</button>
                                </div>
                                <div class="modal-body" inner_html=document.html></div>
                                <div class="modal-footer">
                                    <button class="btn modal-close-btn" on:click=|_| close_report()>"Close"</button>
                                    <button class="btn btn-primary" on:click=|_| download_report()>
                                        "Download Report"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
