//! Browser-facing adapters for the domain and application ports.

pub mod config_loader;
pub mod download;
pub mod http;
pub mod rendering;
pub mod services;

pub use config_loader::load_app_config;
pub use download::save_text_file;
pub use http::HttpQueryService;
pub use rendering::{CanvasChart, CanvasChartBackend};
pub use services::{BrowserTimeProvider, ConsoleLogger};
