//! Navigation context - application/agent identity the page is viewing
//!
//! Injected into the page at construction and never mutated afterwards.
//! The page reads it; it does not own or change it.

/// A monitored application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub name: String,
    /// Service type label, e.g. "SPRING_BOOT"
    pub service_type: String,
}

/// Immutable navigation context for the thread dump page
#[derive(Debug, Clone, Default)]
pub struct NavigationContext {
    /// The application the agent belongs to, if one is configured
    pub application: Option<Application>,
    /// Identifier of the monitored agent
    pub agent_id: Option<String>,
}

impl NavigationContext {
    pub fn new(application: Option<Application>, agent_id: Option<String>) -> Self {
        Self {
            application,
            agent_id,
        }
    }

    /// Agent id for display, defaulting to "-" when absent
    pub fn agent_label(&self) -> &str {
        self.agent_id.as_deref().unwrap_or("-")
    }
}
