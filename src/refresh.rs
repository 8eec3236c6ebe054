//! Polling Refresher
//!
//! Periodic fetch of the dashboard counters. Two states: [`RefreshState::Idle`]
//! and [`RefreshState::Scheduled`]. Polling only starts on the dashboard
//! route and runs until [`Refresher::stop`]. A failed fetch is logged once and
//! left to the next tick; there is no retry.

use std::cell::Cell;

use async_trait::async_trait;

use crate::api::{ApiResult, DashboardStats};
use crate::stats::{plan_updates, StatUpdate, StatsView};
use crate::timing::{SharedScheduler, TimerId};

/// Anything that can produce a stats snapshot
#[async_trait(?Send)]
pub trait StatsSource {
    async fn fetch_stats(&self) -> ApiResult<DashboardStats>;
}

/// Refresher lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Scheduled,
}

/// Owns the polling interval handle
pub struct Refresher {
    scheduler: SharedScheduler,
    period_ms: u32,
    dashboard_path: String,
    handle: Cell<Option<TimerId>>,
}

impl Refresher {
    pub fn new(scheduler: SharedScheduler, period_ms: u32, dashboard_path: impl Into<String>) -> Self {
        Self {
            scheduler,
            period_ms,
            dashboard_path: dashboard_path.into(),
            handle: Cell::new(None),
        }
    }

    pub fn state(&self) -> RefreshState {
        if self.handle.get().is_some() {
            RefreshState::Scheduled
        } else {
            RefreshState::Idle
        }
    }

    pub fn is_dashboard(&self, path: &str) -> bool {
        path.trim_end_matches('/') == self.dashboard_path.trim_end_matches('/')
    }

    /// Begin polling if `path` is the dashboard route.
    ///
    /// Returns the resulting state; starting twice keeps the first interval.
    pub fn start(&self, path: &str, on_tick: impl FnMut() + 'static) -> RefreshState {
        if self.handle.get().is_some() {
            return RefreshState::Scheduled;
        }
        if !self.is_dashboard(path) {
            tracing::debug!(path, "not the dashboard route, auto-refresh stays idle");
            return RefreshState::Idle;
        }

        let id = self.scheduler.set_interval(self.period_ms, Box::new(on_tick));
        self.handle.set(Some(id));
        tracing::info!(period_ms = self.period_ms, "dashboard auto-refresh scheduled");
        RefreshState::Scheduled
    }

    /// Cancel polling
    pub fn stop(&self) {
        if let Some(id) = self.handle.take() {
            self.scheduler.clear(id);
            tracing::info!("dashboard auto-refresh stopped");
        }
    }
}

/// Fetch a snapshot and decide which counters to animate.
///
/// Any failure is logged as a single error and yields an empty plan, so the
/// displayed values stay as they are.
pub async fn fetch_plan<S, V>(source: &S, view: &V) -> Vec<StatUpdate>
where
    S: StatsSource + ?Sized,
    V: StatsView + ?Sized,
{
    match source.fetch_stats().await {
        Ok(stats) => plan_updates(&stats, view),
        Err(e) => {
            tracing::error!(error = %e, "Error refreshing dashboard data");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::stats::testing::FakeStatsView;
    use crate::stats::StatKey;
    use crate::timing::VirtualScheduler;
    use std::rc::Rc;

    struct FixedSource(Option<DashboardStats>);

    #[async_trait(?Send)]
    impl StatsSource for FixedSource {
        async fn fetch_stats(&self) -> ApiResult<DashboardStats> {
            self.0.clone().ok_or(ApiError::Http { status: 503 })
        }
    }

    #[test]
    fn test_idle_off_dashboard() {
        let scheduler = VirtualScheduler::shared();
        let refresher = Refresher::new(scheduler.clone(), 1000, "/dashboard");

        assert_eq!(refresher.start("/escolas", || {}), RefreshState::Idle);
        assert_eq!(refresher.state(), RefreshState::Idle);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_ticks_on_fixed_period_until_stopped() {
        let scheduler = VirtualScheduler::shared();
        let refresher = Refresher::new(scheduler.clone(), 1000, "/dashboard");
        let ticks = Rc::new(Cell::new(0));

        let t = Rc::clone(&ticks);
        assert_eq!(
            refresher.start("/dashboard/", move || t.set(t.get() + 1)),
            RefreshState::Scheduled
        );

        scheduler.advance(3500);
        assert_eq!(ticks.get(), 3);

        refresher.stop();
        assert_eq!(refresher.state(), RefreshState::Idle);
        scheduler.advance(5000);
        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn test_start_twice_keeps_single_interval() {
        let scheduler = VirtualScheduler::shared();
        let refresher = Refresher::new(scheduler.clone(), 1000, "/dashboard");

        refresher.start("/dashboard", || {});
        refresher.start("/dashboard", || {});
        assert_eq!(scheduler.pending(), 1);
    }

    #[tokio::test]
    async fn test_fetch_plan_success() {
        let view = FakeStatsView::with(&[(StatKey::CriticalAlerts, "0")]);
        let source = FixedSource(Some(DashboardStats {
            alertas_criticos: Some(2.0),
            ..Default::default()
        }));

        let plan = fetch_plan(&source, &view).await;
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].key, StatKey::CriticalAlerts);
    }

    #[tokio::test]
    async fn test_fetch_plan_failure_is_empty() {
        let view = FakeStatsView::with(&[(StatKey::CriticalAlerts, "0")]);
        let plan = fetch_plan(&FixedSource(None), &view).await;
        assert!(plan.is_empty());
        assert!(view.writes.borrow().is_empty());
    }
}
