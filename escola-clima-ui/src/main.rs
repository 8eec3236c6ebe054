//! Escola Clima Monitor Page Controller
//!
//! WebAssembly companion for the server-rendered school climate dashboard.
//!
//! # Features
//!
//! - Live dashboard counters with animated updates
//! - Alert auto-dismissal and connectivity banners
//! - Form validation feedback and button loading states
//! - Keyboard shortcuts and smooth in-page scrolling
//!
//! # Architecture
//!
//! The pages are rendered by the server; this binary attaches behavior to
//! them. Decisions live in the `escola-clima` crate, this crate only binds
//! them to the DOM and exports a handle for page scripts.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use escola_clima::{ApiClient, MonitorConfig, MonitorContext, SharedScheduler, Spawner};
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, DocumentReadyState, Window};

mod bootstrap;
mod config;
mod dom;
mod events;
mod handle;
mod scheduler;
mod widgets;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };

    let (config, config_error) = match config::page_config(&document) {
        Ok(config) => (config, None),
        Err(e) => (MonitorConfig::default(), Some(e)),
    };
    wasm_logger::init(wasm_logger::Config::new(config::log_level(&config)));
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "page config ignored, using defaults");
    }

    if document.ready_state() == DocumentReadyState::Loading {
        let mut pending = Some((window, document.clone(), config));
        let registered = events::listen(&document, "DOMContentLoaded", move |_| {
            if let Some((window, document, config)) = pending.take() {
                start(window, document, config);
            }
        });
        if let Err(e) = registered {
            tracing::error!(error = %e, "could not wait for DOMContentLoaded");
        }
    } else {
        start(window, document, config);
    }
}

fn start(window: Window, document: Document, config: MonitorConfig) {
    let scheduler: SharedScheduler = Rc::new(scheduler::GlooScheduler::new());
    let origin = window.location().origin().unwrap_or_default();
    let api = ApiClient::from_config(origin, &config);
    let source = Rc::new(api.clone());
    let view = Rc::new(dom::DomStatsView::new(document.clone()));
    let spawner: Spawner =
        Rc::new(|fut: Pin<Box<dyn Future<Output = ()>>>| spawn_local(fut));

    let ctx = MonitorContext::new(config, scheduler, source, view, spawner);
    ctx.init(&events::BrowserPage::new(window.clone(), document.clone()));

    if let Err(e) = handle::export(&window, handle::MonitorHandle::new(ctx, api, document)) {
        tracing::warn!(error = ?e, "could not publish the global handle");
    }
}
