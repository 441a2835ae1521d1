//! Application state for the HTTP server.

use crate::config::AnalysisConfig;
use crate::store::SessionStore;

/// Shared application state passed to all handlers.
///
/// Held explicitly and cloned into the router, never as a process-global,
/// so independent server instances (and tests) get independent sessions.
#[derive(Clone)]
pub struct AppState {
    /// Session store holding uploaded datasets and annotations
    pub store: SessionStore,
    /// Analysis thresholds applied to every computation
    pub config: AnalysisConfig,
}

impl AppState {
    /// Create a new application state with the given store and config.
    pub fn new(store: SessionStore, config: AnalysisConfig) -> Self {
        Self { store, config }
    }
}
