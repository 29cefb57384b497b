use derive_more::{Constructor, Deref, Display};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::errors::AppError;

/// Sentinel the backend uses for a metric it could not fetch.
pub const ABSENT_TEXT: &str = "N/A";

/// Value Object - a user query. Never empty or whitespace-only.
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display, Serialize)]
pub struct Query(String);

impl Query {
    pub fn new(raw: &str) -> Result<Self, AppError> {
        if raw.trim().is_empty() {
            return Err(AppError::Validation(
                "Please enter a company name or query".to_string(),
            ));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

/// Value Object - one stock metric value as delivered by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum MetricValue {
    Number(f64),
    Text(String),
    Absent,
}

impl MetricValue {
    /// `null` and `"N/A"` both mean "no value".
    pub fn is_absent(&self) -> bool {
        match self {
            MetricValue::Absent => true,
            MetricValue::Text(text) => text == ABSENT_TEXT,
            MetricValue::Number(_) => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Value> for MetricValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => MetricValue::Absent,
            Value::Number(n) => n
                .as_f64()
                .map(MetricValue::Number)
                .unwrap_or_else(|| MetricValue::Text(n.to_string())),
            Value::String(s) => MetricValue::Text(s),
            other => MetricValue::Text(other.to_string()),
        }
    }
}

impl From<MetricValue> for Value {
    fn from(value: MetricValue) -> Self {
        match value {
            MetricValue::Number(n) => serde_json::Number::from_f64(n)
                .map(Value::Number)
                .unwrap_or(Value::Null),
            MetricValue::Text(s) => Value::String(s),
            MetricValue::Absent => Value::Null,
        }
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        MetricValue::Number(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

/// Value Object - ordered metric name → value mapping.
///
/// Order is the order the backend sent, which is the order cards and the
/// report widget display.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct StockInfo(Vec<(String, MetricValue)>);

impl StockInfo {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a metric, replacing the value in place if the key exists.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<MetricValue>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Metrics with a real value, in mapping order.
    pub fn present(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.iter().filter(|(_, v)| !v.is_absent())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<MetricValue>> FromIterator<(K, V)> for StockInfo {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut info = StockInfo::new();
        for (k, v) in iter {
            info.insert(k, v);
        }
        info
    }
}

impl From<Map<String, Value>> for StockInfo {
    fn from(map: Map<String, Value>) -> Self {
        Self(map.into_iter().map(|(k, v)| (k, MetricValue::from(v))).collect())
    }
}

impl From<StockInfo> for Map<String, Value> {
    fn from(info: StockInfo) -> Self {
        info.0.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
    }
}

/// Value Object - one closing price on the chart series.
#[derive(Debug, Clone, PartialEq, Constructor, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: String,
    pub close: f64,
}

/// Aggregate response of the query service.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub company: String,
    #[serde(default)]
    pub stock_info: Option<StockInfo>,
    #[serde(default)]
    pub news_summaries: Vec<String>,
    #[serde(default)]
    pub detailed_report: Option<String>,
    #[serde(default)]
    pub chart_data: Vec<PricePoint>,
}

impl AnalysisResult {
    pub fn has_news(&self) -> bool {
        !self.news_summaries.is_empty()
    }

    /// Narrative text when the backend produced a non-empty one.
    pub fn narrative(&self) -> Option<&str> {
        self.detailed_report.as_deref().filter(|r| !r.is_empty())
    }
}
