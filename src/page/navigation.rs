//! Keyboard, anchor and page-state handling

use super::notify::{Notification, NotificationKind};

/// Same-page anchor links
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
/// Inputs focused by the search shortcut
pub const SEARCH_INPUT_SELECTOR: &str = "input[type=\"search\"], input[name=\"nome\"]";
/// The dialog currently shown
pub const OPEN_MODAL_SELECTOR: &str = ".modal.show";

/// Element id targeted by a same-page link (`"#mapa"` → `"mapa"`).
///
/// A bare `#` or a non-fragment href targets nothing.
pub fn fragment_target(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Modifier state and key of a keydown event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChord<'a> {
    pub key: &'a str,
    pub ctrl: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd + K: focus the search input (default action suppressed)
    FocusSearch,
    /// Escape: hide the open dialog
    CloseModal,
}

impl Shortcut {
    /// Whether the browser's own handling of the key must be suppressed
    pub fn prevents_default(self) -> bool {
        matches!(self, Shortcut::FocusSearch)
    }
}

pub fn shortcut_for(chord: &KeyChord<'_>) -> Option<Shortcut> {
    if (chord.ctrl || chord.meta) && chord.key == "k" {
        return Some(Shortcut::FocusSearch);
    }
    if chord.key == "Escape" {
        return Some(Shortcut::CloseModal);
    }
    None
}

/// Browser connectivity transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    /// Banner announcing the transition
    pub fn notification(self) -> Notification {
        match self {
            Connectivity::Online => {
                Notification::new("Conexão restaurada", NotificationKind::Success)
            }
            Connectivity::Offline => Notification::new(
                "Conexão perdida. Algumas funcionalidades podem não estar disponíveis.",
                NotificationKind::Warning,
            ),
        }
    }
}
