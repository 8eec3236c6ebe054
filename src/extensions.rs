//! Dashboard extensions
//!
//! Charts and real-time push plug in here. Until a concrete implementation is
//! registered, [`Placeholder`] fills both slots and only logs.

use std::fmt;

use crate::error::MonitorResult;

/// Optional dashboard capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Charts,
    RealTime,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Charts => write!(f, "charts"),
            Capability::RealTime => write!(f, "real-time"),
        }
    }
}

/// Common trait for dashboard extensions
pub trait Extension {
    fn capability(&self) -> Capability;

    /// Called once during controller init, after widgets are set up
    fn initialize(&self) -> MonitorResult<()>;
}

/// Default extension that does nothing beyond a diagnostic
pub struct Placeholder(pub Capability);

impl Extension for Placeholder {
    fn capability(&self) -> Capability {
        self.0
    }

    fn initialize(&self) -> MonitorResult<()> {
        match self.0 {
            Capability::Charts => tracing::debug!("Charts initialization placeholder"),
            Capability::RealTime => tracing::debug!("Real-time updates initialization placeholder"),
        }
        Ok(())
    }
}

/// One extension per capability
pub struct ExtensionRegistry {
    extensions: Vec<Box<dyn Extension>>,
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Registry with placeholders for charts and real-time
    pub fn with_placeholders() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(Placeholder(Capability::Charts)));
        registry.register(Box::new(Placeholder(Capability::RealTime)));
        registry
    }

    /// Install `extension`, replacing any with the same capability
    pub fn register(&mut self, extension: Box<dyn Extension>) {
        let capability = extension.capability();
        self.extensions.retain(|e| e.capability() != capability);
        self.extensions.push(extension);
    }

    pub fn get(&self, capability: Capability) -> Option<&dyn Extension> {
        self.extensions
            .iter()
            .find(|e| e.capability() == capability)
            .map(|e| e.as_ref())
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Initialize every extension in registration order.
    ///
    /// A failure is logged and the rest still run. Returns how many failed.
    pub fn initialize_all(&self) -> usize {
        let mut failed = 0;
        for extension in &self.extensions {
            if let Err(e) = extension.initialize() {
                tracing::warn!(capability = %extension.capability(), error = %e, "extension failed to initialize");
                failed += 1;
            }
        }
        failed
    }
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::with_placeholders()
    }
}
