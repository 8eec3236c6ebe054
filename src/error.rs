//! Controller error types

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;

/// Errors surfaced by controller setup steps
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A browser API call failed or an expected global is missing
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Result type alias for controller operations
pub type MonitorResult<T> = Result<T, MonitorError>;
