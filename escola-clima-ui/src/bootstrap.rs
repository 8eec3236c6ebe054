//! Bootstrap 5 bindings
//!
//! Only the handful of widget calls the page controller needs. Every entry
//! point checks that `window.bootstrap` is loaded first.

use wasm_bindgen::prelude::*;
use web_sys::Element;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Alert;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Alert, JsValue>;

    #[wasm_bindgen(method)]
    fn close(this: &Alert);
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Tooltip;

    #[wasm_bindgen(constructor, js_namespace = bootstrap, catch)]
    fn new(element: &Element) -> Result<Tooltip, JsValue>;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = bootstrap)]
    pub type Modal;

    #[wasm_bindgen(static_method_of = Modal, js_name = getInstance, js_namespace = bootstrap)]
    fn get_instance(element: &Element) -> Option<Modal>;

    #[wasm_bindgen(method)]
    fn hide(this: &Modal);
}

/// Whether the Bootstrap bundle is on the page
pub fn available() -> bool {
    web_sys::window()
        .and_then(|w| js_sys::Reflect::has(&w, &JsValue::from_str("bootstrap")).ok())
        .unwrap_or(false)
}

/// Close a banner with its fade-out, or remove it outright without Bootstrap
pub fn close_alert(element: &Element) {
    if available() {
        if let Ok(alert) = Alert::new(element) {
            alert.close();
            return;
        }
    }
    element.remove();
}

/// Attach tooltip behavior; returns whether Bootstrap accepted the element
pub fn attach_tooltip(element: &Element) -> bool {
    available() && Tooltip::new(element).is_ok()
}

/// Hide the dialog if Bootstrap manages one on `element`
pub fn hide_modal(element: &Element) -> bool {
    if !available() {
        return false;
    }
    match Modal::get_instance(element) {
        Some(modal) => {
            modal.hide();
            true
        }
        None => false,
    }
}
