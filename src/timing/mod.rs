//! Timers
//!
//! Scheduler abstraction plus the debounce/throttle helpers built on it.

pub mod rate_limit;
pub mod scheduler;

pub use rate_limit::{Debounce, Throttle};
pub use scheduler::{Scheduler, SharedScheduler, TimerId, VirtualScheduler};
