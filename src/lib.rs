//! # Escola Clima Monitor
//!
//! Client-side controller for the school climate monitoring dashboard. The
//! server renders the pages; this crate makes them live.
//!
//! ## Features
//!
//! - **Live counters**: polls the dashboard statistics and animates changes
//! - **Page behaviors**: alert auto-dismissal, form validation feedback,
//!   button loading states, keyboard shortcuts and smooth scrolling
//! - **Notifications**: transient corner banners
//! - **Helpers**: temperature/humidity/date formatting, debounce and throttle
//!
//! Everything here is decision logic over small traits and a [`Scheduler`],
//! so it runs natively under test. The `escola-clima-ui` crate binds those
//! traits to the browser DOM.
//!
//! ## Modules
//!
//! - [`api`]: JSON client for the backend endpoints
//! - [`context`]: lifecycle controller shared by every handler
//! - [`page`]: per-affordance page behaviors
//! - [`timing`]: scheduler abstraction, debounce and throttle
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use escola_clima::format::{format_humidity, format_temperature};
//! use escola_clima::MonitorConfig;
//!
//! let config = MonitorConfig::from_toml_str("refresh_interval_ms = 60000").unwrap();
//! assert_eq!(config.alert_timeout_ms, 5000);
//!
//! assert_eq!(format_temperature(&23.456), "23.5°C");
//! assert_eq!(format_humidity(&60), "60.0%");
//! ```

pub mod animation;
pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod extensions;
pub mod format;
pub mod page;
pub mod refresh;
pub mod stats;
pub mod timing;

// Re-export top-level types for convenience
pub use api::{ApiClient, ApiError, ApiResult, DashboardStats};

pub use animation::{Animator, NumberTween};

pub use config::{ConfigError, LoggingConfig, MonitorConfig, NOTIFICATION_LIFETIME_MS};

pub use context::{MonitorContext, PageSetup, Spawner};

pub use error::{MonitorError, MonitorResult};

pub use extensions::{Capability, Extension, ExtensionRegistry, Placeholder};

pub use format::{format_date, format_date_str, format_humidity, format_temperature};

pub use page::{Notification, NotificationKind, SubmitVerdict};

pub use refresh::{fetch_plan, RefreshState, Refresher, StatsSource};

pub use stats::{plan_updates, StatKey, StatUpdate, StatsView};

pub use timing::{Debounce, Scheduler, SharedScheduler, Throttle, TimerId, VirtualScheduler};
