//! Bootstrap widgets

use escola_clima::page::forms::FIELD_SELECTOR;
use escola_clima::page::{MODAL_SELECTOR, MODAL_SHOWN_EVENT, TOOLTIP_SELECTOR};
use escola_clima::MonitorResult;
use web_sys::Document;

use crate::bootstrap;
use crate::dom::{focus_first, query_all};
use crate::events::listen;

/// Attach tooltips to every `[data-bs-toggle="tooltip"]`
pub fn init_tooltips(document: &Document) -> usize {
    let triggers = query_all(document, TOOLTIP_SELECTOR);
    if !triggers.is_empty() && !bootstrap::available() {
        tracing::warn!(count = triggers.len(), "bootstrap not loaded, tooltips skipped");
        return 0;
    }
    triggers.iter().filter(|el| bootstrap::attach_tooltip(el)).count()
}

/// Focus the first field of each dialog once it is shown
pub fn init_modals(document: &Document) -> MonitorResult<()> {
    for modal in query_all(document, MODAL_SELECTOR) {
        let target = modal.clone();
        listen(&modal, MODAL_SHOWN_EVENT, move |_| {
            focus_first(&target, FIELD_SELECTOR);
        })?;
    }
    Ok(())
}
