//! Global handle
//!
//! Page scripts reach the controller through `window.EscolaClimaMonitor`
//! (alias `window.ECM`).

use std::rc::Rc;

use escola_clima::format::{
    format_date_millis, format_date_str, format_humidity, format_temperature, DEFAULT_DATE_PATTERN,
};
use escola_clima::page::{set_button_loading, Notification, NotificationKind};
use escola_clima::{ApiClient, ApiResult, Debounce, MonitorContext, SharedScheduler, Throttle};
use js_sys::{Array, Function, Object, Promise, Reflect};
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Document, HtmlElement, Window};

use crate::dom::{show_banner, ButtonElement};

pub const GLOBAL_NAMES: [&str; 2] = ["EscolaClimaMonitor", "ECM"];

#[wasm_bindgen]
pub struct MonitorHandle {
    ctx: Rc<MonitorContext>,
    api: ApiClient,
    document: Document,
}

#[wasm_bindgen]
impl MonitorHandle {
    /// Fetch the dashboard counters now
    pub fn refresh(&self) {
        self.ctx.refresh_in_background();
    }

    #[wasm_bindgen(js_name = stopAutoRefresh)]
    pub fn stop_auto_refresh(&self) {
        self.ctx.stop();
    }

    #[wasm_bindgen(getter, js_name = isInitialized)]
    pub fn is_initialized(&self) -> bool {
        self.ctx.is_initialized()
    }

    /// `notify(message, type = "info")`
    pub fn notify(&self, message: &str, kind: Option<String>) {
        let kind = kind
            .and_then(|k| k.parse::<NotificationKind>().ok())
            .unwrap_or_default();
        show_banner(
            &self.document,
            self.ctx.scheduler(),
            &Notification::new(message, kind),
        );
    }

    /// `setButtonLoading(button, loading = true)`
    #[wasm_bindgen(js_name = setButtonLoading)]
    pub fn set_button_loading(&self, button: HtmlElement, loading: Option<bool>) -> bool {
        set_button_loading(&ButtonElement(button), loading.unwrap_or(true))
    }

    #[wasm_bindgen(js_name = formatTemperature)]
    pub fn format_temperature(&self, value: JsValue) -> String {
        match value.as_f64() {
            Some(n) => format_temperature(&n),
            None => format_temperature(value.as_string().unwrap_or_default().as_str()),
        }
    }

    #[wasm_bindgen(js_name = formatHumidity)]
    pub fn format_humidity(&self, value: JsValue) -> String {
        match value.as_f64() {
            Some(n) => format_humidity(&n),
            None => format_humidity(value.as_string().unwrap_or_default().as_str()),
        }
    }

    /// `formatDate(dateOrMillis, pattern = "dd/MM/yyyy")`
    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(&self, value: JsValue, pattern: Option<String>) -> String {
        format_date_value(&value, pattern.as_deref().unwrap_or(DEFAULT_DATE_PATTERN))
    }

    /// `call(endpoint)`: GET a JSON endpoint, resolving to the parsed body
    pub fn call(&self, endpoint: String) -> Promise {
        let api = self.api.clone();
        future_to_promise(async move {
            to_js(api.call::<serde_json::Value>(&endpoint).await)
        })
    }

    /// `getSchools(params)`: a page of `/escolas/api`
    #[wasm_bindgen(js_name = getSchools)]
    pub fn get_schools(&self, params: JsValue) -> Promise {
        let api = self.api.clone();
        let params = js_params(&params);
        future_to_promise(async move { to_js(api.get_schools(params).await) })
    }

    /// `getAlerts(params)`: a page of `/alertas/api`
    #[wasm_bindgen(js_name = getAlerts)]
    pub fn get_alerts(&self, params: JsValue) -> Promise {
        let api = self.api.clone();
        let params = js_params(&params);
        future_to_promise(async move { to_js(api.get_alerts(params).await) })
    }

    /// `debounce(fn, wait)`
    pub fn debounce(&self, func: Function, wait: u32) -> Function {
        debounced(self.ctx.scheduler().clone(), func, wait)
    }

    /// `throttle(fn, limit)`
    pub fn throttle(&self, func: Function, limit: u32) -> Function {
        throttled(self.ctx.scheduler().clone(), func, limit)
    }
}

impl MonitorHandle {
    pub fn new(ctx: Rc<MonitorContext>, api: ApiClient, document: Document) -> Self {
        Self { ctx, api, document }
    }
}

/// Format a `Date`, epoch milliseconds or a date string
fn format_date_value(value: &JsValue, pattern: &str) -> String {
    if let Some(date) = value.dyn_ref::<js_sys::Date>() {
        return format_date_millis(date.get_time() as i64, pattern);
    }
    match value.as_f64() {
        Some(millis) => format_date_millis(millis as i64, pattern),
        None => format_date_str(&value.as_string().unwrap_or_default(), pattern),
    }
}

/// Resolve with the payload as a plain JS value, reject with an `Error`
fn to_js<T: Serialize>(result: ApiResult<T>) -> Result<JsValue, JsValue> {
    let payload = result.map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    let json = serde_json::to_string(&payload)
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
    js_sys::JSON::parse(&json)
}

/// Own enumerable properties as query parameters, stringified the way
/// `URLSearchParams` does. Anything but an object yields no parameters.
fn js_params(params: &JsValue) -> Vec<(String, String)> {
    let Some(object) = params.dyn_ref::<Object>() else {
        return Vec::new();
    };
    Object::entries(object)
        .iter()
        .filter_map(|entry| {
            let pair: Array = entry.dyn_into().ok()?;
            let key = pair.get(0).as_string()?;
            Some((key, js_string(&pair.get(1))))
        })
        .collect()
}

fn js_string(value: &JsValue) -> String {
    if let Some(s) = value.as_string() {
        s
    } else if let Some(n) = value.as_f64() {
        format!("{}", n)
    } else if let Some(b) = value.as_bool() {
        b.to_string()
    } else if value.is_null() {
        "null".to_string()
    } else if value.is_undefined() {
        "undefined".to_string()
    } else if let Some(object) = value.dyn_ref::<Object>() {
        object.to_string().into()
    } else {
        String::new()
    }
}

fn invoke(func: &Function, arg: &JsValue) {
    if let Err(e) = func.call1(&JsValue::NULL, arg) {
        tracing::warn!(error = ?e, "rate-limited callback failed");
    }
}

fn debounced(scheduler: SharedScheduler, func: Function, wait: u32) -> Function {
    let debounce = Debounce::new(scheduler, wait, move |arg: JsValue| invoke(&func, &arg));
    Closure::<dyn FnMut(JsValue)>::new(move |arg| debounce.call(arg))
        .into_js_value()
        .unchecked_into()
}

fn throttled(scheduler: SharedScheduler, func: Function, limit: u32) -> Function {
    let throttle = Throttle::new(scheduler, limit, move |arg: JsValue| invoke(&func, &arg));
    Closure::<dyn FnMut(JsValue)>::new(move |arg| {
        throttle.call(arg);
    })
    .into_js_value()
    .unchecked_into()
}

/// Publish `handle` under both global names
pub fn export(window: &Window, handle: MonitorHandle) -> Result<(), JsValue> {
    let value = JsValue::from(handle);
    for name in GLOBAL_NAMES {
        Reflect::set(window, &JsValue::from_str(name), &value)?;
    }
    Ok(())
}
