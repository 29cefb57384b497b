use derive_more::Display;

/// Simplified error system - one enum, one layer tag per variant.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum AppError {
    #[display(fmt = "Network Error: {}", _0)]
    Network(String),
    #[display(fmt = "Service Error: {}", _0)]
    Service(String),
    #[display(fmt = "Decode Error: {}", _0)]
    Decode(String),
    #[display(fmt = "Rendering Error: {}", _0)]
    Rendering(String),
    #[display(fmt = "Validation Error: {}", _0)]
    Validation(String),
}

impl AppError {
    /// Bare description without the layer prefix. This is what the user sees.
    pub fn message(&self) -> &str {
        match self {
            AppError::Network(msg)
            | AppError::Service(msg)
            | AppError::Decode(msg)
            | AppError::Rendering(msg)
            | AppError::Validation(msg) => msg,
        }
    }
}

impl std::error::Error for AppError {}

impl From<wasm_bindgen::JsValue> for AppError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{value:?}"));
        AppError::Rendering(msg)
    }
}

// Simple convenience type aliases
pub type AppResult<T> = Result<T, AppError>;
