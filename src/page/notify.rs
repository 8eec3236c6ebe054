//! Transient notifications
//!
//! A dismissible banner pinned to the top-right corner. It closes itself
//! after [`NOTIFICATION_LIFETIME_MS`]; callers cannot change that.

use std::fmt;
use std::str::FromStr;

use super::alerts::{schedule_close, DismissibleAlert};
use crate::config::NOTIFICATION_LIFETIME_MS;
use crate::timing::{SharedScheduler, TimerId};

/// Inline style of the banner
pub const NOTIFICATION_STYLE: &str = "top: 20px; right: 20px; z-index: 9999; min-width: 300px;";

/// Bootstrap contextual variant of a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationKind {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
    Primary,
    Secondary,
}

impl NotificationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Danger => "danger",
            NotificationKind::Primary => "primary",
            NotificationKind::Secondary => "secondary",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "warning" => Ok(NotificationKind::Warning),
            "danger" | "error" => Ok(NotificationKind::Danger),
            "primary" => Ok(NotificationKind::Primary),
            "secondary" => Ok(NotificationKind::Secondary),
            other => Err(format!("unknown notification type: {}", other)),
        }
    }
}

/// Message and variant of a banner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationKind::Info)
    }

    /// Class list of the banner element
    pub fn class_name(&self) -> String {
        format!(
            "alert alert-{} alert-dismissible fade show position-fixed",
            self.kind
        )
    }
}

/// Where banners get rendered
pub trait NotificationHost {
    type Banner: DismissibleAlert + 'static;

    /// Append a banner to the page; `None` when there is no body to append to
    fn append(&self, notification: &Notification) -> Option<Self::Banner>;
}

/// Render `notification` and schedule its removal
pub fn show_notification<H: NotificationHost + ?Sized>(
    host: &H,
    scheduler: &SharedScheduler,
    notification: &Notification,
) -> Option<TimerId> {
    let banner = host.append(notification)?;
    tracing::debug!(kind = %notification.kind, "notification shown");
    Some(schedule_close(scheduler, banner, NOTIFICATION_LIFETIME_MS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::alerts::testing::FakeAlert;
    use crate::timing::VirtualScheduler;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeHost {
        shown: RefCell<Vec<(Notification, FakeAlert)>>,
    }

    impl NotificationHost for FakeHost {
        type Banner = FakeAlert;

        fn append(&self, notification: &Notification) -> Option<FakeAlert> {
            let banner = FakeAlert::new(false);
            self.shown
                .borrow_mut()
                .push((notification.clone(), banner.clone()));
            Some(banner)
        }
    }

    #[test]
    fn test_class_name() {
        let n = Notification::new("Salvo", NotificationKind::Success);
        assert_eq!(
            n.class_name(),
            "alert alert-success alert-dismissible fade show position-fixed"
        );
        assert_eq!(Notification::info("x").kind, NotificationKind::Info);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("warning".parse(), Ok(NotificationKind::Warning));
        assert_eq!("error".parse(), Ok(NotificationKind::Danger));
        assert!("purple".parse::<NotificationKind>().is_err());
    }

    #[test]
    fn test_banner_removed_after_fixed_lifetime() {
        let scheduler = VirtualScheduler::shared();
        let shared: SharedScheduler = scheduler.clone();
        let host = FakeHost::default();

        show_notification(&host, &shared, &Notification::info("Dados atualizados"));
        let banner = host.shown.borrow()[0].1.clone();

        scheduler.advance(4999);
        assert!(banner.attached.get());
        scheduler.advance(1);
        assert!(!banner.attached.get());
    }
}
