//! Application state management
//!
//! The shared state handed to every event handler.
//!
//! # Design Principles
//!
//! 1. **Built once**: the store is opened and seeded at startup
//! 2. **Cheap cloning**: all fields are behind `Arc`
//! 3. **Immutable configuration**: config is read-only after load

use crate::config::AppConfig;
use crate::db::Store;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Gamification store
    pub store: Arc<Store>,
    /// Application configuration
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Store, config: AppConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }

    /// Get a reference to the store
    #[inline]
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_clone_shares_store() {
        let state = AppState::new(Store::new(), AppConfig::default());
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.store, &cloned.store));
        assert_eq!(cloned.config().gamification.leaderboard_default_limit, 10);
    }
}
