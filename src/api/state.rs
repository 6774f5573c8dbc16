//! Application state for the attendance API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::services::{Clock, RulesStore, SystemClock};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers: the
/// loaded configuration, the current rules snapshot and the clock used
/// when a request does not supply its own instant.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
    rules: Arc<RulesStore>,
    clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates a state using the configured default rules and the system clock.
    pub fn new(config: ConfigLoader) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Creates a state with an explicit clock.
    pub fn with_clock(config: ConfigLoader, clock: Arc<dyn Clock>) -> Self {
        let rules = Arc::new(RulesStore::new(config.default_rules().clone()));
        Self {
            config: Arc::new(config),
            rules,
            clock,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the shared rules store.
    pub fn rules(&self) -> &RulesStore {
        &self.rules
    }

    /// Returns the clock.
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }
}
