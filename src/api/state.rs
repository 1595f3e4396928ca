//! Application state for the parental leave engine API.

use std::sync::Arc;

use crate::config::RulesLoader;

/// Shared application state.
///
/// Holds the rule tables loaded at startup. Tables are read-only after
/// loading, so handlers share them without locking.
#[derive(Clone)]
pub struct AppState {
    rules: Arc<RulesLoader>,
}

impl AppState {
    /// Creates a new application state from loaded rule tables.
    pub fn new(rules: RulesLoader) -> Self {
        Self {
            rules: Arc::new(rules),
        }
    }

    /// Returns the rule tables.
    pub fn rules(&self) -> &RulesLoader {
        &self.rules
    }
}
