use std::sync::Arc;
use std::time::Duration;

use crate::{
    db::{InMemoryStore, PreferencesRepository, WatchlistRepository},
    services::{catalog::CatalogClient, search::SearchSession},
};

/// Shared application state
pub struct AppState {
    pub catalog: Arc<dyn CatalogClient>,
    pub preferences: Arc<dyn PreferencesRepository>,
    pub watchlist: Arc<dyn WatchlistRepository>,
    pub search: SearchSession,
}

impl AppState {
    pub fn new(
        catalog: Arc<dyn CatalogClient>,
        preferences: Arc<dyn PreferencesRepository>,
        watchlist: Arc<dyn WatchlistRepository>,
        search_debounce: Duration,
    ) -> Self {
        Self {
            search: SearchSession::new(catalog.clone(), search_debounce),
            catalog,
            preferences,
            watchlist,
        }
    }

    /// State backed by a single in-memory store for both repositories
    pub fn in_memory(catalog: Arc<dyn CatalogClient>, search_debounce: Duration) -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::new(catalog, store.clone(), store, search_debounce)
    }
}
