//! Report Assembler: the detailed view document.

use crate::domain::conversation::ActiveReport;
use crate::presentation::formatting::{format_currency_detailed, metric_label};
use crate::presentation::markup::{convert, escape_html};
use chrono::NaiveDate;

use crate::time_utils::display_date;

/// Assembled detailed view, ready to be handed to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: String,
    pub html: String,
    /// Set when the document contains a chart placeholder to bind.
    pub chart_canvas_id: Option<String>,
}

impl ReportDocument {
    pub fn has_chart(&self) -> bool {
        self.chart_canvas_id.is_some()
    }
}

/// Header, metrics widget, optional chart placeholder, then the narrative.
pub fn assemble(report: &ActiveReport, generated_on: NaiveDate, canvas_id: &str) -> ReportDocument {
    let company = escape_html(&report.company);
    let mut html = String::from(r#"<div class="dashboard-report">"#);

    html.push_str(&format!(
        r#"<div class="report-header-section"><div class="company-title">{company}</div><div class="report-timestamp">Generated {} • Financial Analysis</div></div>"#,
        display_date(generated_on)
    ));

    html.push_str(r#"<div class="metrics-section"><h3 class="section-title">Stock Information</h3><div class="stock-widget">"#);
    for (key, value) in report.stock_info.iter().flat_map(|info| info.present()) {
        html.push_str(&format!(
            r#"<div class="stock-metric-row"><span class="metric-row-label">{}</span><span class="metric-row-value">{}</span></div>"#,
            escape_html(&metric_label(key)),
            escape_html(&format_currency_detailed(value))
        ));
    }
    html.push_str("</div></div>");

    let chart_canvas_id = if report.chart_data.is_empty() {
        None
    } else {
        let id = escape_html(canvas_id);
        html.push_str(&format!(
            r#"<div class="chart-section"><h3 class="section-title">12-Month Price Performance</h3><canvas id="{id}" class="price-chart" height="80"></canvas></div>"#
        ));
        Some(canvas_id.to_string())
    };

    html.push_str(&format!(
        r#"<div class="report-content-section"><h3 class="section-title">Detailed Analysis</h3><div class="report-formatter">{}</div></div>"#,
        convert(&report.report_text)
    ));
    html.push_str("</div>");

    ReportDocument {
        title: format!("{} Financial Report", report.company),
        html,
        chart_canvas_id,
    }
}
