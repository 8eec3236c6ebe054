//! Form validation feedback
//!
//! Forms opting in with `.needs-validation` are checked against native
//! constraint validation on submit. A failing form is cancelled, its first
//! invalid field focused, and the form marked `was-validated`; from then on
//! blurring one of its fields re-runs the check.

use super::loading::{set_button_loading, LoadingTarget};

/// Forms opting into validation feedback
pub const VALIDATION_FORM_SELECTOR: &str = ".needs-validation";
/// Marker class enabling live validity styling
pub const VALIDATED_CLASS: &str = "was-validated";
/// Fields that take part in validation and focus handling
pub const FIELD_SELECTOR: &str = "input, select, textarea";
/// First field failing native validation
pub const INVALID_FIELD_SELECTOR: &str = ":invalid";

/// What to do with a submit event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitVerdict {
    Proceed,
    /// Prevent default, stop propagation and undo any loading state
    Cancel,
}

/// A form as seen by the validation handler
pub trait ValidatableForm {
    type Field;

    /// Run native constraint validation
    fn check_validity(&self) -> bool;
    fn first_invalid_field(&self) -> Option<Self::Field>;
    fn focus(&self, field: &Self::Field);
    fn mark_validated(&self);
    fn is_validated(&self) -> bool;
}

/// Decide a submit and apply its focus/marker effects
pub fn on_submit<F: ValidatableForm + ?Sized>(form: &F) -> SubmitVerdict {
    if form.check_validity() {
        return SubmitVerdict::Proceed;
    }

    if let Some(field) = form.first_invalid_field() {
        form.focus(&field);
    }
    form.mark_validated();
    SubmitVerdict::Cancel
}

/// [`on_submit`], then take a cancelled form's submit button out of the
/// loading state its click put it in
pub fn on_submit_restoring<F, B>(form: &F, submit_button: Option<&B>) -> SubmitVerdict
where
    F: ValidatableForm + ?Sized,
    B: LoadingTarget + ?Sized,
{
    let verdict = on_submit(form);
    if verdict == SubmitVerdict::Cancel {
        if let Some(button) = submit_button {
            set_button_loading(button, false);
        }
    }
    verdict
}

/// Re-check a field's form on blur once it has been validated.
///
/// Returns whether a check ran.
pub fn on_field_blur<F: ValidatableForm + ?Sized>(form: Option<&F>) -> bool {
    match form {
        Some(form) if form.is_validated() => {
            form.check_validity();
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::loading::testing::FakeButton;
    use crate::page::loading::{click_starts_loading, on_delegated_submit, LOADING_MARKUP};
    use std::cell::{Cell, RefCell};

    struct FakeForm {
        fields: Vec<(&'static str, bool)>,
        focused: RefCell<Option<&'static str>>,
        validated: Cell<bool>,
        checks: Cell<u32>,
    }

    impl FakeForm {
        fn new(fields: Vec<(&'static str, bool)>) -> Self {
            Self {
                fields,
                focused: RefCell::new(None),
                validated: Cell::new(false),
                checks: Cell::new(0),
            }
        }
    }

    impl ValidatableForm for FakeForm {
        type Field = &'static str;

        fn check_validity(&self) -> bool {
            self.checks.set(self.checks.get() + 1);
            self.fields.iter().all(|(_, valid)| *valid)
        }

        fn first_invalid_field(&self) -> Option<&'static str> {
            self.fields.iter().find(|(_, valid)| !valid).map(|(name, _)| *name)
        }

        fn focus(&self, field: &&'static str) {
            *self.focused.borrow_mut() = Some(*field);
        }

        fn mark_validated(&self) {
            self.validated.set(true);
        }

        fn is_validated(&self) -> bool {
            self.validated.get()
        }
    }

    #[test]
    fn test_invalid_submit_is_cancelled_and_focuses_first_invalid() {
        let form = FakeForm::new(vec![("nome", true), ("cidade", false), ("estado", false)]);

        assert_eq!(on_submit(&form), SubmitVerdict::Cancel);
        assert_eq!(*form.focused.borrow(), Some("cidade"));
        assert!(form.is_validated());
    }

    #[test]
    fn test_valid_submit_proceeds_untouched() {
        let form = FakeForm::new(vec![("nome", true)]);

        assert_eq!(on_submit(&form), SubmitVerdict::Proceed);
        assert!(form.focused.borrow().is_none());
        assert!(!form.is_validated());
    }

    #[test]
    fn test_cancelled_submit_restores_clicked_button() {
        let form = FakeForm::new(vec![("nome", false)]);
        let button = FakeButton::new("Cadastrar");

        assert!(click_starts_loading(&button));
        set_button_loading(&button, true);
        assert!(button.is_disabled());

        assert_eq!(on_submit_restoring(&form, Some(&button)), SubmitVerdict::Cancel);
        assert_eq!(button.inner_html(), "Cadastrar");
        assert!(!button.is_disabled());
        assert!(button.stashed_label().is_none());

        // the delegated handler sees the prevented submit and leaves the button alone
        assert!(!on_delegated_submit(true, Some(&button)));
        assert_eq!(button.inner_html(), "Cadastrar");
    }

    #[test]
    fn test_valid_submit_keeps_loading_state() {
        let form = FakeForm::new(vec![("nome", true)]);
        let button = FakeButton::new("Cadastrar");
        set_button_loading(&button, true);

        assert_eq!(on_submit_restoring(&form, Some(&button)), SubmitVerdict::Proceed);
        assert_eq!(button.inner_html(), LOADING_MARKUP);
        assert!(button.is_disabled());
        assert_eq!(
            on_submit_restoring::<_, FakeButton>(&form, None),
            SubmitVerdict::Proceed
        );
    }

    #[test]
    fn test_blur_rechecks_only_validated_forms() {
        let form = FakeForm::new(vec![("nome", false)]);
        assert!(!on_field_blur(Some(&form)));
        assert_eq!(form.checks.get(), 0);

        on_submit(&form);
        assert!(on_field_blur(Some(&form)));
        assert_eq!(form.checks.get(), 2);

        assert!(!on_field_blur::<FakeForm>(None));
    }
}
