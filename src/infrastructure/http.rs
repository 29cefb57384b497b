use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use serde::{Deserialize, Serialize};

use crate::domain::{
    analysis::{AnalysisResult, Query, QueryService},
    errors::{AppError, AppResult},
    logging::{LogComponent, LogEntry, LogLevel, logger},
};
use crate::{log_debug, log_info};

#[derive(Serialize)]
struct ReportRequest<'a> {
    query: &'a str,
}

/// Error body the backend sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    detail: String,
}

/// `QueryService` over `POST {query}` → `AnalysisResult` JSON.
#[derive(Debug, Clone)]
pub struct HttpQueryService {
    url: String,
}

impl HttpQueryService {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn post(&self, query: &Query) -> AppResult<AnalysisResult> {
        log_info!(LogComponent::Infrastructure("HttpQueryService"), "POST {} query='{}'", self.url, query);

        let response = Request::post(&self.url)
            .json(&ReportRequest { query: query.value() })
            .map_err(|e| AppError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;
        log_debug!(
            LogComponent::Infrastructure("HttpQueryService"),
            "status {} ({} bytes)",
            status,
            body.len()
        );

        if !response.ok() {
            let error = service_error(status, &response.status_text(), &body);
            logger().log(
                LogEntry::new(LogLevel::Warn, LogComponent::Infrastructure("HttpQueryService"), error.to_string())
                    .with_metadata(format!("status={status} url={}", self.url)),
            );
            return Err(error);
        }

        decode_analysis(&body)
    }
}

impl QueryService for HttpQueryService {
    fn analyze<'a>(&'a self, query: &'a Query) -> LocalBoxFuture<'a, Result<AnalysisResult, AppError>> {
        Box::pin(self.post(query))
    }
}

/// Non-2xx response → `Service` error, preferring the server's `detail`.
pub fn service_error(status: u16, status_text: &str, body: &str) -> AppError {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail }) if !detail.is_empty() => AppError::Service(detail),
        _ => AppError::Service(format!("HTTP {} {}", status, status_text).trim_end().to_string()),
    }
}

pub fn decode_analysis(body: &str) -> AppResult<AnalysisResult> {
    serde_json::from_str(body).map_err(|e| AppError::Decode(format!("malformed analysis response: {e}")))
}
