//! Event wiring
//!
//! Attaches every page listener. Listeners live as long as the page, so their
//! closures are leaked with `forget`.

use std::rc::Rc;

use escola_clima::page::alerts::DISMISSIBLE_ALERT_SELECTOR;
use escola_clima::page::forms::{FIELD_SELECTOR, VALIDATION_FORM_SELECTOR};
use escola_clima::page::loading::{LOADING_TRIGGER_SELECTOR, SUBMIT_BUTTON_SELECTOR};
use escola_clima::page::navigation::{ANCHOR_SELECTOR, OPEN_MODAL_SELECTOR, SEARCH_INPUT_SELECTOR};
use escola_clima::page::{
    click_starts_loading, fragment_target, on_delegated_submit, on_field_blur, on_submit_restoring,
    schedule_dismissals, set_button_loading, shortcut_for, Connectivity, KeyChord, Shortcut,
    SubmitVerdict,
};
use escola_clima::{MonitorContext, MonitorResult, PageSetup};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlFormElement, KeyboardEvent,
    ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition, Window,
};

use crate::bootstrap;
use crate::dom::{self, query, query_all, AlertElement, ButtonElement, FormElement};
use crate::widgets;

/// Add a page-lifetime listener
pub fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> MonitorResult<()> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom::dom_err)?;
    closure.forget();
    Ok(())
}

/// Nearest ancestor-or-self of the event target matching `selector`
fn closest(event: &Event, selector: &str) -> Option<HtmlElement> {
    event
        .target()?
        .dyn_into::<Element>()
        .ok()?
        .closest(selector)
        .ok()
        .flatten()?
        .dyn_into::<HtmlElement>()
        .ok()
}

fn submit_button(form: &Element) -> Option<ButtonElement> {
    form.query_selector(SUBMIT_BUTTON_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .map(ButtonElement)
}

/// The server-rendered page the controller enhances
pub struct BrowserPage {
    window: Window,
    document: Document,
}

impl BrowserPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    fn dismiss_alerts(&self, ctx: &Rc<MonitorContext>) -> MonitorResult<()> {
        let alerts = query_all(&self.document, DISMISSIBLE_ALERT_SELECTOR)
            .into_iter()
            .map(AlertElement);
        let scheduled = schedule_dismissals(ctx.scheduler(), alerts, ctx.config().alert_timeout_ms);
        tracing::debug!(count = scheduled.len(), "alert dismissals scheduled");
        Ok(())
    }

    fn wire_form_validation(&self) -> MonitorResult<()> {
        for el in query_all(&self.document, VALIDATION_FORM_SELECTOR) {
            let Ok(form) = el.dyn_into::<HtmlFormElement>() else {
                continue;
            };
            let target = form.clone();
            listen(&form, "submit", move |event| {
                let button = submit_button(&target);
                let verdict = on_submit_restoring(&FormElement(target.clone()), button.as_ref());
                if verdict == SubmitVerdict::Cancel {
                    event.prevent_default();
                    event.stop_propagation();
                }
            })?;
        }

        for field in query_all(&self.document, FIELD_SELECTOR) {
            let target = field.clone();
            listen(&field, "blur", move |_| {
                let form = target
                    .closest("form")
                    .ok()
                    .flatten()
                    .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
                    .map(FormElement);
                on_field_blur(form.as_ref());
            })?;
        }
        Ok(())
    }

    fn wire_loading_states(&self) -> MonitorResult<()> {
        listen(&self.document, "click", |event| {
            if let Some(button) = closest(&event, LOADING_TRIGGER_SELECTOR).map(ButtonElement) {
                if click_starts_loading(&button) {
                    set_button_loading(&button, true);
                }
            }
        })?;

        listen(&self.document, "submit", |event| {
            let form = event.target().and_then(|t| t.dyn_into::<Element>().ok());
            let button = form.as_ref().and_then(submit_button);
            on_delegated_submit(event.default_prevented(), button.as_ref());
        })
    }

    fn wire_smooth_scroll(&self) -> MonitorResult<()> {
        for anchor in query_all(&self.document, ANCHOR_SELECTOR) {
            let document = self.document.clone();
            let link = anchor.clone();
            listen(&anchor, "click", move |event| {
                let Some(href) = link.get_attribute("href") else {
                    return;
                };
                let Some(target) = fragment_target(&href).and_then(|id| document.get_element_by_id(id))
                else {
                    return;
                };
                event.prevent_default();
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            })?;
        }
        Ok(())
    }

    fn wire_shortcuts(&self) -> MonitorResult<()> {
        let document = self.document.clone();
        listen(&self.document, "keydown", move |event| {
            let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = keyboard.key();
            let chord = KeyChord {
                key: &key,
                ctrl: keyboard.ctrl_key(),
                meta: keyboard.meta_key(),
            };
            let Some(shortcut) = shortcut_for(&chord) else {
                return;
            };
            if shortcut.prevents_default() {
                event.prevent_default();
            }
            match shortcut {
                Shortcut::FocusSearch => {
                    if let Some(input) = query(&document, SEARCH_INPUT_SELECTOR)
                        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                    {
                        let _ = input.focus();
                    }
                }
                Shortcut::CloseModal => {
                    if let Some(modal) = query(&document, OPEN_MODAL_SELECTOR) {
                        bootstrap::hide_modal(&modal);
                    }
                }
            }
        })
    }

    fn wire_page_state(&self, ctx: &Rc<MonitorContext>) -> MonitorResult<()> {
        let weak = Rc::downgrade(ctx);
        let document = self.document.clone();
        listen(&self.document, "visibilitychange", move |_| {
            if let Some(ctx) = weak.upgrade() {
                ctx.on_visibility_change(document.hidden());
            }
        })?;

        for (event, connectivity) in [("online", Connectivity::Online), ("offline", Connectivity::Offline)] {
            let weak = Rc::downgrade(ctx);
            let document = self.document.clone();
            listen(&self.window, event, move |_| {
                if let Some(ctx) = weak.upgrade() {
                    dom::show_banner(&document, ctx.scheduler(), &connectivity.notification());
                }
            })?;
        }
        Ok(())
    }
}

impl PageSetup for BrowserPage {
    fn wire_events(&self, ctx: &Rc<MonitorContext>) -> MonitorResult<()> {
        let steps = [
            ("alert dismissal", self.dismiss_alerts(ctx)),
            ("form validation", self.wire_form_validation()),
            ("loading states", self.wire_loading_states()),
            ("smooth scrolling", self.wire_smooth_scroll()),
            ("keyboard shortcuts", self.wire_shortcuts()),
            ("page state", self.wire_page_state(ctx)),
        ];
        for (step, result) in steps {
            if let Err(e) = result {
                tracing::warn!(step, error = %e, "listener setup failed");
            }
        }
        Ok(())
    }

    fn init_widgets(&self, _ctx: &Rc<MonitorContext>) -> MonitorResult<()> {
        widgets::init_tooltips(&self.document);
        widgets::init_modals(&self.document)
    }

    fn current_path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }
}
