use crate::config::AppConfig;
use crate::domain::logging::LogComponent;
use crate::{log_info, log_warn};

/// Read `AppConfig` from the page's `#app-config` JSON element.
///
/// Missing element means defaults; an unreadable one logs and falls back.
pub fn load_app_config() -> AppConfig {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(AppConfig::ELEMENT_ID))
        .and_then(|el| el.text_content());

    match text {
        Some(json) if !json.trim().is_empty() => match AppConfig::from_json(&json) {
            Ok(config) => {
                log_info!(LogComponent::Infrastructure("Config"), "loaded config from #{}", AppConfig::ELEMENT_ID);
                config
            }
            Err(e) => {
                log_warn!(LogComponent::Infrastructure("Config"), "{}; using defaults", e);
                AppConfig::default()
            }
        },
        _ => AppConfig::default(),
    }
}
