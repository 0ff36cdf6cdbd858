//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the account directory, the live session tokens, and the parsed
//! configuration. Everything lives in memory.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::services::accounts::AccountDirectory;
use crate::services::sessions::SessionTable;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountDirectory,
    pub sessions: SessionTable,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            accounts: AccountDirectory::new(config.demo_auto_provision),
            sessions: SessionTable::new(config.session_ttl),
            config: Arc::new(config),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
