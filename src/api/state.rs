//! Application state for the salary engine API.

use std::sync::Arc;

use crate::clock::BusinessClock;
use crate::config::PayrollRules;
use crate::store::PayrollStore;

/// A store that can be shared across request handlers.
pub type SharedStore = Arc<dyn PayrollStore + Send + Sync>;

/// Shared application state.
///
/// Holds the payroll store, the rule set and the clock that supplies the
/// business date for tenure.
#[derive(Clone)]
pub struct AppState {
    store: SharedStore,
    rules: Arc<PayrollRules>,
    clock: Arc<dyn BusinessClock>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(store: SharedStore, rules: PayrollRules, clock: Arc<dyn BusinessClock>) -> Self {
        Self {
            store,
            rules: Arc::new(rules),
            clock,
        }
    }

    /// Returns the payroll store.
    pub fn store(&self) -> &(dyn PayrollStore + Send + Sync) {
        self.store.as_ref()
    }

    /// Returns the rule set.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Returns the business clock.
    pub fn clock(&self) -> &dyn BusinessClock {
        self.clock.as_ref()
    }
}
