//! Button loading states
//!
//! A button in loading state shows a spinner with "Carregando...", is
//! disabled, and keeps its original label in a stash until restored. A
//! button holds at most one stash: asking an already-loading button to load
//! again leaves the original label intact.

use std::future::Future;

/// Clicked elements that enter loading state
pub const LOADING_TRIGGER_SELECTOR: &str = "button[type=\"submit\"], a.btn";
/// A form's submit button
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
/// Label shown while loading
pub const LOADING_MARKUP: &str = "<i class=\"fas fa-spinner fa-spin me-1\"></i>Carregando...";
/// `data-*` key holding the stashed label
pub const ORIGINAL_LABEL_KEY: &str = "originalText";

/// A button-like element that can show a loading state
pub trait LoadingTarget {
    fn inner_html(&self) -> String;
    fn set_inner_html(&self, html: &str);
    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);
    fn stashed_label(&self) -> Option<String>;
    fn stash_label(&self, label: &str);
    fn clear_stash(&self);
}

/// Enter (`loading = true`) or leave loading state.
///
/// Returns whether the button changed state.
pub fn set_button_loading<B: LoadingTarget + ?Sized>(button: &B, loading: bool) -> bool {
    if loading {
        if button.stashed_label().is_some() {
            return false;
        }
        button.stash_label(&button.inner_html());
        button.set_inner_html(LOADING_MARKUP);
        button.set_disabled(true);
        true
    } else {
        let restored = match button.stashed_label() {
            Some(label) => {
                button.set_inner_html(&label);
                true
            }
            None => false,
        };
        button.set_disabled(false);
        button.clear_stash();
        restored
    }
}

/// Whether a click on this element should show the loading state
pub fn click_starts_loading<B: LoadingTarget + ?Sized>(button: &B) -> bool {
    !button.is_disabled()
}

/// Delegated submit handling: put the form's submit button into loading
/// unless another handler already cancelled the submit.
///
/// Returns whether the button changed state.
pub fn on_delegated_submit<B: LoadingTarget + ?Sized>(
    default_prevented: bool,
    submit_button: Option<&B>,
) -> bool {
    match submit_button {
        Some(button) if !default_prevented => set_button_loading(button, true),
        _ => false,
    }
}

/// Show the loading state for the duration of `action`.
///
/// The original label comes back whether the action succeeds or fails.
pub async fn with_loading<B, F, T>(button: &B, action: F) -> T
where
    B: LoadingTarget + ?Sized,
    F: Future<Output = T>,
{
    set_button_loading(button, true);
    let output = action.await;
    set_button_loading(button, false);
    output
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::{Cell, RefCell};

    pub struct FakeButton {
        pub html: RefCell<String>,
        pub disabled: Cell<bool>,
        pub stash: RefCell<Option<String>>,
    }

    impl FakeButton {
        pub fn new(label: &str) -> Self {
            Self {
                html: RefCell::new(label.to_string()),
                disabled: Cell::new(false),
                stash: RefCell::new(None),
            }
        }
    }

    impl LoadingTarget for FakeButton {
        fn inner_html(&self) -> String {
            self.html.borrow().clone()
        }

        fn set_inner_html(&self, html: &str) {
            *self.html.borrow_mut() = html.to_string();
        }

        fn is_disabled(&self) -> bool {
            self.disabled.get()
        }

        fn set_disabled(&self, disabled: bool) {
            self.disabled.set(disabled);
        }

        fn stashed_label(&self) -> Option<String> {
            self.stash.borrow().clone()
        }

        fn stash_label(&self, label: &str) {
            *self.stash.borrow_mut() = Some(label.to_string());
        }

        fn clear_stash(&self) {
            *self.stash.borrow_mut() = None;
        }
    }
}
