//! Page behaviors
//!
//! Decisions behind each DOM affordance, written against small traits so the
//! browser crate supplies the elements and tests supply fakes.

pub mod alerts;
pub mod forms;
pub mod loading;
pub mod navigation;
pub mod notify;

pub use alerts::{schedule_close, schedule_dismissals, DismissibleAlert};
pub use forms::{on_field_blur, on_submit, on_submit_restoring, SubmitVerdict, ValidatableForm};
pub use loading::{
    click_starts_loading, on_delegated_submit, set_button_loading, with_loading, LoadingTarget,
};
pub use navigation::{fragment_target, shortcut_for, Connectivity, KeyChord, Shortcut};
pub use notify::{show_notification, Notification, NotificationHost, NotificationKind};

/// Elements receiving tooltip behavior
pub const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";
/// Dialogs whose first field is focused when shown
pub const MODAL_SELECTOR: &str = ".modal";
/// Event fired by a dialog once it is visible
pub const MODAL_SHOWN_EVENT: &str = "shown.bs.modal";
