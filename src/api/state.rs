//! Application state for the tip engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::ledger::{InMemoryLedger, LedgerSink};

/// Shared application state.
///
/// Holds the business configuration and the ledger sink confirmed
/// allocations are written to.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    ledger: Arc<dyn LedgerSink>,
}

impl AppState {
    /// Creates a new application state backed by an in-memory ledger.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_ledger(config, Arc::new(InMemoryLedger::new()))
    }

    /// Creates a new application state with a caller-supplied ledger sink.
    pub fn with_ledger(config: ConfigLoader, ledger: Arc<dyn LedgerSink>) -> Self {
        Self {
            config: Arc::new(config),
            ledger,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the ledger sink.
    pub fn ledger(&self) -> &dyn LedgerSink {
        self.ledger.as_ref()
    }
}
