//! Configuration System
//!
//! Controller configuration loaded from TOML (a file natively, or a
//! page-embedded `<script type="application/toml">` block in the browser)
//! with environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonitorConfig {
    /// Period of the dashboard statistics poll
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_ms: u32,

    /// Delay before non-permanent alerts present at load are closed
    #[serde(default = "default_alert_timeout")]
    pub alert_timeout_ms: u32,

    /// Length of the counter tween
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u32,

    /// Step of the counter tween (~60 steps per second)
    #[serde(default = "default_animation_frame")]
    pub animation_frame_ms: u32,

    /// Route on which polling is active
    #[serde(default = "default_dashboard_path")]
    pub dashboard_path: String,

    /// Statistics endpoint, relative to the page origin
    #[serde(default = "default_stats_endpoint")]
    pub stats_endpoint: String,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Fixed lifetime of a synthesized notification banner.
pub const NOTIFICATION_LIFETIME_MS: u32 = 5000;

fn default_refresh_interval() -> u32 {
    300_000 // 5 minutes
}

fn default_alert_timeout() -> u32 {
    5000
}

fn default_animation_duration() -> u32 {
    300
}

fn default_animation_frame() -> u32 {
    16
}

fn default_dashboard_path() -> String {
    "/dashboard".to_string()
}

fn default_stats_endpoint() -> String {
    "/api/dashboard/stats".to_string()
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: default_refresh_interval(),
            alert_timeout_ms: default_alert_timeout(),
            animation_duration_ms: default_animation_duration(),
            animation_frame_ms: default_animation_frame(),
            dashboard_path: default_dashboard_path(),
            stats_endpoint: default_stats_endpoint(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl LoggingConfig {
    /// Map the configured level onto a `tracing` level, falling back to INFO
    pub fn tracing_level(&self) -> tracing::Level {
        self.level
            .parse::<tracing::Level>()
            .unwrap_or(tracing::Level::INFO)
    }
}

impl MonitorConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: MonitorConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse {
                path: PathBuf::from("<inline>"),
                error: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: MonitorConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Defaults plus environment variable overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Some(ms) = env_u32("ECM_REFRESH_INTERVAL_MS") {
            self.refresh_interval_ms = ms;
        }
        if let Some(ms) = env_u32("ECM_ALERT_TIMEOUT_MS") {
            self.alert_timeout_ms = ms;
        }
        if let Some(ms) = env_u32("ECM_ANIMATION_DURATION_MS") {
            self.animation_duration_ms = ms;
        }
        if let Ok(path) = std::env::var("ECM_DASHBOARD_PATH") {
            self.dashboard_path = path;
        }
        if let Ok(level) = std::env::var("ECM_LOG_LEVEL") {
            self.logging.level = level;
        }
    }

    /// Reject values that would stall the timers
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.animation_frame_ms == 0 {
            return Err(ConfigError::Invalid(
                "animation_frame_ms must be greater than zero".to_string(),
            ));
        }
        if !self.dashboard_path.starts_with('/') {
            return Err(ConfigError::Invalid(format!(
                "dashboard_path must be absolute, got {:?}",
                self.dashboard_path
            )));
        }
        Ok(())
    }
}

fn env_u32(name: &str) -> Option<u32> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
