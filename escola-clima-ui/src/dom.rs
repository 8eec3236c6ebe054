//! DOM adapters
//!
//! Bind the controller's element traits to real page elements.

use escola_clima::page::alerts::PERMANENT_CLASS;
use escola_clima::page::forms::{INVALID_FIELD_SELECTOR, VALIDATED_CLASS};
use escola_clima::page::loading::ORIGINAL_LABEL_KEY;
use escola_clima::page::notify::NOTIFICATION_STYLE;
use escola_clima::page::{
    show_notification, DismissibleAlert, LoadingTarget, Notification, NotificationHost,
    ValidatableForm,
};
use escola_clima::{MonitorError, SharedScheduler, StatKey, StatsView};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, HtmlFormElement};

use crate::bootstrap;

pub fn dom_err(e: JsValue) -> MonitorError {
    MonitorError::Dom(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

/// First element matching `selector`, ignoring invalid selectors
pub fn query(root: &Document, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Every element matching `selector`
pub fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn focus_first(root: &Element, selector: &str) -> bool {
    match root
        .query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    {
        Some(el) => el.focus().is_ok(),
        None => false,
    }
}

/// Live counters rendered in `[data-stat]` elements
pub struct DomStatsView {
    document: Document,
}

impl DomStatsView {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl StatsView for DomStatsView {
    fn stat_text(&self, key: StatKey) -> Option<String> {
        query(&self.document, &key.selector()).map(|el| el.text_content().unwrap_or_default())
    }

    fn set_stat_text(&self, key: StatKey, text: &str) {
        if let Some(el) = query(&self.document, &key.selector()) {
            el.set_text_content(Some(text));
        }
    }
}

/// An `.alert` banner
pub struct AlertElement(pub Element);

impl DismissibleAlert for AlertElement {
    fn is_permanent(&self) -> bool {
        self.0.class_list().contains(PERMANENT_CLASS)
    }

    fn is_attached(&self) -> bool {
        self.0.is_connected()
    }

    fn close(&self) {
        bootstrap::close_alert(&self.0);
    }
}

pub struct FormElement(pub HtmlFormElement);

impl ValidatableForm for FormElement {
    type Field = HtmlElement;

    fn check_validity(&self) -> bool {
        self.0.check_validity()
    }

    fn first_invalid_field(&self) -> Option<HtmlElement> {
        self.0
            .query_selector(INVALID_FIELD_SELECTOR)
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    }

    fn focus(&self, field: &HtmlElement) {
        let _ = field.focus();
    }

    fn mark_validated(&self) {
        let _ = self.0.class_list().add_1(VALIDATED_CLASS);
    }

    fn is_validated(&self) -> bool {
        self.0.class_list().contains(VALIDATED_CLASS)
    }
}

/// A `button` or `a.btn`. Disabled state goes through the attribute so
/// anchors carry it too.
pub struct ButtonElement(pub HtmlElement);

impl LoadingTarget for ButtonElement {
    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn is_disabled(&self) -> bool {
        self.0.has_attribute("disabled")
    }

    fn set_disabled(&self, disabled: bool) {
        let _ = if disabled {
            self.0.set_attribute("disabled", "")
        } else {
            self.0.remove_attribute("disabled")
        };
    }

    fn stashed_label(&self) -> Option<String> {
        self.0.dataset().get(ORIGINAL_LABEL_KEY)
    }

    fn stash_label(&self, label: &str) {
        let _ = self.0.dataset().set(ORIGINAL_LABEL_KEY, label);
    }

    fn clear_stash(&self) {
        self.0.dataset().delete(ORIGINAL_LABEL_KEY);
    }
}

/// Appends notification banners to `document.body`
pub struct BodyNotifications {
    document: Document,
}

impl BodyNotifications {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn build(&self, notification: &Notification) -> Result<Element, JsValue> {
        let banner = self.document.create_element("div")?;
        banner.set_class_name(&notification.class_name());
        banner.set_attribute("role", "alert")?;
        banner.set_attribute("style", NOTIFICATION_STYLE)?;

        let text = self.document.create_text_node(&notification.message);
        banner.append_child(&text)?;

        let close = self.document.create_element("button")?;
        close.set_attribute("type", "button")?;
        close.set_class_name("btn-close");
        close.set_attribute("data-bs-dismiss", "alert")?;
        close.set_attribute("aria-label", "Fechar")?;
        banner.append_child(&close)?;

        Ok(banner)
    }
}

impl NotificationHost for BodyNotifications {
    type Banner = AlertElement;

    fn append(&self, notification: &Notification) -> Option<AlertElement> {
        let body = self.document.body()?;
        let banner = match self.build(notification) {
            Ok(banner) => banner,
            Err(e) => {
                tracing::warn!(error = ?e, "could not build notification");
                return None;
            }
        };
        body.append_child(&banner).ok()?;
        Some(AlertElement(banner))
    }
}

/// Show a corner banner that closes itself
pub fn show_banner(document: &Document, scheduler: &SharedScheduler, notification: &Notification) {
    show_notification(&BodyNotifications::new(document.clone()), scheduler, notification);
}

#[cfg(test)]
mod tests {
    use super::*;
    use escola_clima::page::loading::LOADING_MARKUP;
    use escola_clima::page::{on_submit, set_button_loading, SubmitVerdict};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn mount(html: &str) -> Element {
        let doc = document();
        let root = doc.create_element("div").unwrap();
        root.set_inner_html(html);
        doc.body().unwrap().append_child(&root).unwrap();
        root
    }

    #[wasm_bindgen_test]
    fn test_button_loading_round_trip() {
        let root = mount(r#"<button type="submit"><i class="fas fa-save"></i> Salvar</button>"#);
        let button = ButtonElement(
            root.query_selector("button").unwrap().unwrap().dyn_into().unwrap(),
        );
        let original = button.inner_html();

        assert!(set_button_loading(&button, true));
        assert_eq!(button.inner_html(), LOADING_MARKUP);
        assert!(button.is_disabled());

        set_button_loading(&button, false);
        assert_eq!(button.inner_html(), original);
        assert!(!button.is_disabled());
        assert!(button.0.dataset().get(ORIGINAL_LABEL_KEY).is_none());
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_invalid_form_focuses_required_field() {
        let root = mount(
            r#"<form class="needs-validation" novalidate>
                 <input name="cidade" value="Recife">
                 <input name="nome" required>
               </form>"#,
        );
        let form = FormElement(root.query_selector("form").unwrap().unwrap().dyn_into().unwrap());

        assert_eq!(on_submit(&form), SubmitVerdict::Cancel);
        assert!(form.is_validated());
        let active = document().active_element().unwrap();
        assert_eq!(active.get_attribute("name").as_deref(), Some("nome"));
        root.remove();
    }

    #[wasm_bindgen_test]
    fn test_stats_view_reads_and_writes_counter() {
        let root = mount(r#"<span data-stat="alertas-ativos">7</span>"#);
        let view = DomStatsView::new(document());

        assert_eq!(view.stat_text(StatKey::ActiveAlerts).as_deref(), Some("7"));
        assert!(view.stat_text(StatKey::CriticalAlerts).is_none());

        view.set_stat_text(StatKey::ActiveAlerts, "9");
        assert_eq!(root.text_content().as_deref(), Some("9"));
        root.remove();
    }
}
