//! Card Renderer: inline data cards for the conversation.

use crate::domain::analysis::StockInfo;
use crate::domain::conversation::{Card, CardPayload};
use crate::presentation::formatting::{format_compact, metric_label};
use crate::presentation::markup::escape_html;

pub const STOCK_CARD_TITLE: &str = "Stock Information";
pub const NEWS_CARD_TITLE: &str = "Recent News";

/// Render a card for `payload`. The payload variant decides the card kind.
///
/// Absent metrics are skipped, news items are escaped, and an empty payload
/// renders an empty container.
pub fn render_card(title: &str, payload: CardPayload) -> Card {
    let body = match &payload {
        CardPayload::Stock(info) => stock_grid(info),
        CardPayload::News(items) => news_list(items),
    };
    let html = format!(
        r#"<div class="analysis-card" data-kind="{kind}"><h3>{title}</h3>{body}</div>"#,
        kind = payload.kind(),
        title = escape_html(title),
    );

    Card {
        title: title.to_string(),
        payload,
        html,
    }
}

pub fn stock_card(info: StockInfo) -> Card {
    render_card(STOCK_CARD_TITLE, CardPayload::Stock(info))
}

pub fn news_card(items: Vec<String>) -> Card {
    render_card(NEWS_CARD_TITLE, CardPayload::News(items))
}

/// Present metrics as `(label, compact value)`, in mapping order.
pub fn compact_rows(info: &StockInfo) -> Vec<(String, String)> {
    info.present()
        .map(|(key, value)| (metric_label(key), format_compact(value)))
        .collect()
}

fn stock_grid(info: &StockInfo) -> String {
    let mut html = String::from(r#"<div class="stock-info-grid">"#);
    for (label, value) in compact_rows(info) {
        html.push_str(&format!(
            r#"<div class="stock-metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
            escape_html(&label),
            escape_html(&value)
        ));
    }
    html.push_str("</div>");
    html
}

fn news_list(items: &[String]) -> String {
    let mut html = String::from(r#"<ul class="news-list">"#);
    for item in items {
        html.push_str(&format!(r#"<li class="news-item">{}</li>"#, escape_html(item)));
    }
    html.push_str("</ul>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::MetricValue;
    use crate::domain::conversation::CardKind;
    use insta::assert_snapshot;

    #[test]
    fn stock_card_skips_absent_metrics() {
        let info: StockInfo = [
            ("currentPrice", MetricValue::from(150.2)),
            ("sector", MetricValue::from("N/A")),
            ("peRatio", MetricValue::from(28.4)),
        ]
        .into_iter()
        .collect();
        let card = stock_card(info);

        assert_eq!(card.kind(), CardKind::Stock);
        assert_snapshot!(card.html, @r#"<div class="analysis-card" data-kind="stock"><h3>Stock Information</h3><div class="stock-info-grid"><div class="stock-metric"><div class="metric-label">Current Price</div><div class="metric-value">$150.20</div></div><div class="stock-metric"><div class="metric-label">Pe Ratio</div><div class="metric-value">$28.40</div></div></div></div>"#);
    }

    #[test]
    fn news_items_keep_order_and_are_escaped() {
        let card = news_card(vec!["A <b>".into(), "B".into()]);
        assert_eq!(card.kind(), CardKind::News);
        assert!(card.html.contains(
            r#"<ul class="news-list"><li class="news-item">A &lt;b&gt;</li><li class="news-item">B</li></ul>"#
        ));
    }

    #[test]
    fn empty_payloads_render_empty_containers() {
        assert!(stock_card(StockInfo::new())
            .html
            .contains(r#"<div class="stock-info-grid"></div>"#));
        assert!(news_card(Vec::new()).html.contains(r#"<ul class="news-list"></ul>"#));
    }

    #[test]
    fn text_metrics_pass_through() {
        let info: StockInfo = [("ticker", "AAPL")].into_iter().collect();
        assert_eq!(compact_rows(&info), vec![("Ticker".to_string(), "AAPL".to_string())]);
    }
}
