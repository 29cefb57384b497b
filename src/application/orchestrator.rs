use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::notifications::{PresentationSink, ReportDownload, Toast, ToastLevel};
use crate::config::AppConfig;
use crate::domain::{
    analysis::{AnalysisResult, Query, QueryService},
    chart::{ChartBackend, ChartBinding},
    conversation::{ActiveReport, ConversationEntry, ConversationStore, ReportTeaser},
    errors::AppResult,
    logging::{LogComponent, TimeProvider},
};
use crate::presentation::{
    cards::{news_card, stock_card},
    markup::convert,
    report::{ReportDocument, assemble},
};
use chrono::NaiveDate;

use crate::time_utils::{calendar_date, iso_date};
use crate::{log_debug, log_error, log_info, log_warn};

pub const ANALYSIS_COMPLETE: &str = "Analysis complete";
pub const ANALYSIS_FAILED: &str = "Failed to generate report. Please try again.";
pub const DOWNLOAD_COMPLETE: &str = "Report downloaded successfully";

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Blank query; the user was warned and nothing changed.
    Rejected,
    /// Another query is in flight; nothing changed.
    Busy,
    Completed,
    Failed,
}

/// Drives the conversation: `Idle --submit--> Loading --result--> Idle`.
///
/// All state sits behind `Cell`/`RefCell` so entry points take `&self` and the
/// orchestrator can be shared through an `Rc` by every event handler. No
/// borrow is ever held across the single await in [`Orchestrator::submit`].
pub struct Orchestrator<S: QueryService, B: ChartBackend> {
    service: S,
    sink: Rc<dyn PresentationSink>,
    clock: Rc<dyn TimeProvider>,
    config: AppConfig,
    loading: Cell<bool>,
    store: RefCell<ConversationStore>,
    active_report: RefCell<Option<ActiveReport>>,
    open_view: RefCell<Option<ReportDocument>>,
    chart: RefCell<ChartBinding<B>>,
}

impl<S: QueryService, B: ChartBackend> Orchestrator<S, B> {
    pub fn new(
        service: S,
        chart_backend: B,
        sink: Rc<dyn PresentationSink>,
        clock: Rc<dyn TimeProvider>,
        config: AppConfig,
    ) -> Self {
        log_info!(LogComponent::Application("Orchestrator"), "created, endpoint {}", config.report_url());
        Self {
            service,
            sink,
            clock,
            config,
            loading: Cell::new(false),
            store: RefCell::new(ConversationStore::new()),
            active_report: RefCell::new(None),
            open_view: RefCell::new(None),
            chart: RefCell::new(ChartBinding::new(chart_backend)),
        }
    }

    /// Submit a raw query. Ignored while loading; blank input only warns.
    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        if self.loading.get() {
            log_debug!(LogComponent::Application("Orchestrator"), "submit ignored, query in flight");
            return SubmitOutcome::Busy;
        }

        let query = match Query::new(raw) {
            Ok(query) => query,
            Err(e) => {
                log_debug!(LogComponent::Application("Orchestrator"), "rejected blank query");
                self.sink.notify(Toast::new(ToastLevel::Warning, e.message()));
                return SubmitOutcome::Rejected;
            }
        };

        self.set_loading(true);
        self.append(ConversationEntry::user(query.value()));
        self.append(ConversationEntry::system(self.config.placeholder_text.clone()));
        self.publish();
        log_info!(LogComponent::Application("Orchestrator"), "dispatching query '{}'", query);

        let result = self.service.analyze(&query).await;

        let outcome = match result {
            Ok(analysis) => {
                self.store.borrow_mut().remove_last();
                log_info!(
                    LogComponent::Application("Orchestrator"),
                    "analysis received for '{}'",
                    analysis.company
                );
                self.present(analysis);
                self.sink.notify(Toast::new(ToastLevel::Success, ANALYSIS_COMPLETE));
                SubmitOutcome::Completed
            }
            Err(e) => {
                log_error!(LogComponent::Application("Orchestrator"), "query failed: {}", e);
                self.append(ConversationEntry::system(format!("Error: {}", e.message())));
                self.sink.notify(Toast::new(ToastLevel::Error, ANALYSIS_FAILED));
                SubmitOutcome::Failed
            }
        };

        self.publish();
        self.set_loading(false);
        outcome
    }

    fn present(&self, analysis: AnalysisResult) {
        self.append(ConversationEntry::system(format!("Analyzing {}...", analysis.company)));

        let has_news = analysis.has_news();
        let preview_html = analysis.narrative().map(convert);
        let AnalysisResult { company, stock_info, news_summaries, detailed_report, chart_data } = analysis;

        if let Some(info) = stock_info.clone() {
            self.append(ConversationEntry::DataCard(stock_card(info)));
        }
        if has_news {
            self.append(ConversationEntry::DataCard(news_card(news_summaries)));
        }
        if let (Some(preview_html), Some(report_text)) = (preview_html, detailed_report) {
            self.append(ConversationEntry::ReportTeaser(ReportTeaser {
                report: ActiveReport { company, report_text, stock_info, chart_data },
                preview_html,
            }));
        }
    }

    /// Open the detailed view for the teaser at `index`.
    ///
    /// Replaces the active report wholesale. `None` if `index` is not a
    /// teaser. Binding the chart is a separate step, see
    /// [`Orchestrator::bind_active_chart`].
    pub fn activate_teaser(&self, index: usize) -> Option<ReportDocument> {
        let report = {
            let store = self.store.borrow();
            store.get(index)?.as_teaser()?.report.clone()
        };

        let now = self.clock.current_timestamp();
        let generated_on = calendar_date(now, self.clock.utc_offset_minutes(now));
        let document = assemble(&report, generated_on, &self.config.chart_canvas_id);
        log_info!(
            LogComponent::Application("Orchestrator"),
            "opening report for '{}' (chart: {})",
            report.company,
            document.has_chart()
        );

        *self.active_report.borrow_mut() = Some(report);
        *self.open_view.borrow_mut() = Some(document.clone());
        self.sink.report_opened(&document);
        Some(document)
    }

    /// Bind the active report's chart to its canvas.
    ///
    /// Meant to run after the view's markup is in the page. `Ok(false)` when
    /// there is nothing to bind (view closed, or no chart data).
    pub fn bind_active_chart(&self) -> AppResult<bool> {
        let canvas_id = match self.open_view.borrow().as_ref().and_then(|doc| doc.chart_canvas_id.clone()) {
            Some(id) => id,
            None => return Ok(false),
        };
        let active = self.active_report.borrow();
        let Some(report) = active.as_ref() else {
            return Ok(false);
        };

        let mut chart = self.chart.borrow_mut();
        match chart.bind(&canvas_id, &report.chart_data) {
            Ok(config) => {
                log_info!(
                    LogComponent::Application("Orchestrator"),
                    "chart bound for '{}' ({})",
                    report.company,
                    config.percent_change_label()
                );
                Ok(true)
            }
            Err(e) => {
                log_warn!(LogComponent::Application("Orchestrator"), "chart bind failed: {}", e);
                Err(e)
            }
        }
    }

    /// Close the detailed view. The active report stays for downloading.
    pub fn close_report(&self) {
        if self.open_view.borrow_mut().take().is_some() {
            log_debug!(LogComponent::Application("Orchestrator"), "report view closed");
            self.sink.report_closed();
        }
    }

    /// Offer the active report's narrative as a text file. No-op when no
    /// report has been opened yet.
    pub fn download_report(&self) -> Option<ReportDownload> {
        let download = {
            let active = self.active_report.borrow();
            let report = active.as_ref()?;
            let date = calendar_date(self.clock.current_timestamp(), 0);
            ReportDownload {
                file_name: download_file_name(&report.company, date),
                contents: report.report_text.clone(),
                mime: "text/plain",
            }
        };

        match self.sink.deliver_download(&download) {
            Ok(()) => {
                log_info!(LogComponent::Application("Orchestrator"), "downloaded {}", download.file_name);
                self.sink.notify(Toast::new(ToastLevel::Success, DOWNLOAD_COMPLETE));
            }
            Err(e) => {
                log_error!(LogComponent::Application("Orchestrator"), "download failed: {}", e);
                self.sink.notify(Toast::new(ToastLevel::Error, e.message()));
            }
        }
        Some(download)
    }

    pub fn entries(&self) -> Vec<ConversationEntry> {
        self.store.borrow().all().to_vec()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_report_open(&self) -> bool {
        self.open_view.borrow().is_some()
    }

    pub fn active_report(&self) -> Option<ActiveReport> {
        self.active_report.borrow().clone()
    }

    pub fn is_chart_bound(&self) -> bool {
        self.chart.borrow().is_bound()
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn append(&self, entry: ConversationEntry) {
        self.store.borrow_mut().append(entry);
    }

    fn publish(&self) {
        let store = self.store.borrow();
        self.sink.conversation_changed(store.all());
    }

    fn set_loading(&self, loading: bool) {
        self.loading.set(loading);
        self.sink.loading_changed(loading);
    }
}

/// `report_<company>_<YYYY-MM-DD>.txt` with a UTC date. Runs of
/// non-alphanumerics in the company name collapse to one `_`, none at either end.
pub fn download_file_name(company: &str, date: NaiveDate) -> String {
    let mut safe = String::with_capacity(company.len());
    let mut in_run = false;
    for c in company.chars() {
        if c.is_alphanumeric() {
            safe.push(c);
            in_run = false;
        } else if !in_run {
            safe.push('_');
            in_run = true;
        }
    }
    format!("report_{}_{}.txt", safe.trim_matches('_'), iso_date(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_collapses_separators() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(download_file_name("Apple Inc.", date), "report_Apple_Inc_2024-06-03.txt");
        assert_eq!(download_file_name("AT&T  Corp", date), "report_AT_T_Corp_2024-06-03.txt");
        assert_eq!(download_file_name("Nvidia", date), "report_Nvidia_2024-06-03.txt");
        assert_eq!(download_file_name("(Meta) Platforms!", date), "report_Meta_Platforms_2024-06-03.txt");
    }
}
