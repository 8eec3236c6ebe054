//! Page-supplied configuration
//!
//! The server template may embed overrides:
//!
//! ```html
//! <script id="ecm-config" type="application/toml">
//! refresh_interval_ms = 60000
//! </script>
//! ```
//!
//! `type="application/json"` is accepted as well.

use escola_clima::{ConfigError, MonitorConfig};
use web_sys::Document;

pub const CONFIG_SCRIPT_ID: &str = "ecm-config";

/// Configuration embedded in the page, or defaults when there is none
pub fn page_config(document: &Document) -> Result<MonitorConfig, ConfigError> {
    let Some(script) = document.get_element_by_id(CONFIG_SCRIPT_ID) else {
        return Ok(MonitorConfig::default());
    };
    let text = script.text_content().unwrap_or_default();

    match script.get_attribute("type").as_deref() {
        Some("application/json") => MonitorConfig::from_json_str(&text),
        _ => MonitorConfig::from_toml_str(&text),
    }
}

/// `log` level matching the configured `tracing` level
pub fn log_level(config: &MonitorConfig) -> log::Level {
    match config.logging.tracing_level() {
        tracing::Level::ERROR => log::Level::Error,
        tracing::Level::WARN => log::Level::Warn,
        tracing::Level::INFO => log::Level::Info,
        tracing::Level::DEBUG => log::Level::Debug,
        _ => log::Level::Trace,
    }
}
