use serde::Deserialize;

use crate::domain::errors::AppError;

/// Runtime settings, read from an inline JSON element on the page.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Prefix for API calls; empty means same origin.
    pub api_base_url: String,
    pub report_endpoint: String,
    pub toast_duration_ms: u32,
    /// Pause between opening the detailed view and binding its chart.
    pub chart_bind_delay_ms: u32,
    pub chart_canvas_id: String,
    pub placeholder_text: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: String::new(),
            report_endpoint: "/api/report".to_string(),
            toast_duration_ms: 4_000,
            chart_bind_delay_ms: 100,
            chart_canvas_id: "priceChart".to_string(),
            placeholder_text: "Analyzing...".to_string(),
        }
    }
}

impl AppConfig {
    /// Id of the `<script type="application/json">` element holding overrides.
    pub const ELEMENT_ID: &'static str = "app-config";

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        serde_json::from_str(json).map_err(|e| AppError::Decode(format!("invalid app config: {e}")))
    }

    pub fn report_url(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.report_endpoint.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AppConfig::from_json(r#"{"toast_duration_ms": 1500}"#).unwrap();
        assert_eq!(config.toast_duration_ms, 1500);
        assert_eq!(config.chart_canvas_id, "priceChart");
        assert_eq!(config.report_url(), "/api/report");
    }

    #[test]
    fn base_url_is_joined_once() {
        let config = AppConfig {
            api_base_url: "http://127.0.0.1:8000/".into(),
            ..Default::default()
        };
        assert_eq!(config.report_url(), "http://127.0.0.1:8000/api/report");
    }

    #[test]
    fn malformed_json_is_a_decode_error() {
        assert!(matches!(AppConfig::from_json("{"), Err(AppError::Decode(_))));
    }
}
