//! Alert auto-dismissal
//!
//! Banners present when the page loads close themselves after the configured
//! timeout unless they carry `alert-permanent`.

use crate::timing::{SharedScheduler, TimerId};

/// Banners eligible for auto-dismissal
pub const DISMISSIBLE_ALERT_SELECTOR: &str = ".alert:not(.alert-permanent)";
/// Class exempting a banner from auto-dismissal
pub const PERMANENT_CLASS: &str = "alert-permanent";

/// A closable banner on the page
pub trait DismissibleAlert {
    fn is_permanent(&self) -> bool;
    /// Whether the element is still in the document
    fn is_attached(&self) -> bool;
    fn close(&self);
}

/// Close `alert` after `timeout_ms` if it is still attached by then
pub fn schedule_close<A>(scheduler: &SharedScheduler, alert: A, timeout_ms: u32) -> TimerId
where
    A: DismissibleAlert + 'static,
{
    scheduler.set_timeout(
        timeout_ms,
        Box::new(move || {
            if alert.is_attached() {
                alert.close();
            }
        }),
    )
}

/// Schedule dismissal for every non-permanent alert
pub fn schedule_dismissals<A, I>(scheduler: &SharedScheduler, alerts: I, timeout_ms: u32) -> Vec<TimerId>
where
    A: DismissibleAlert + 'static,
    I: IntoIterator<Item = A>,
{
    alerts
        .into_iter()
        .filter(|alert| !alert.is_permanent())
        .map(|alert| schedule_close(scheduler, alert, timeout_ms))
        .collect()
}
