use std::collections::HashMap;

use tokio::sync::RwLock;

use crate::{
    db::repository::{PreferencesRepository, WatchlistRepository},
    error::AppResult,
    models::{MovieId, UserPreferences, WatchlistEntry},
};

/// Process-local store backing both repositories
#[derive(Default)]
pub struct InMemoryStore {
    preferences: RwLock<Option<UserPreferences>>,
    watchlist: RwLock<HashMap<MovieId, WatchlistEntry>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl PreferencesRepository for InMemoryStore {
    async fn get_or_create_default(&self) -> AppResult<UserPreferences> {
        if let Some(prefs) = self.preferences.read().await.as_ref() {
            return Ok(prefs.clone());
        }

        let mut slot = self.preferences.write().await;
        let prefs = slot.get_or_insert_with(|| {
            tracing::info!("No stored preferences, creating defaults");
            UserPreferences::default()
        });
        Ok(prefs.clone())
    }

    async fn save_preferences(&self, preferences: UserPreferences) -> AppResult<()> {
        *self.preferences.write().await = Some(preferences);
        Ok(())
    }
}

#[async_trait::async_trait]
impl WatchlistRepository for InMemoryStore {
    async fn list_watchlist(&self) -> AppResult<Vec<WatchlistEntry>> {
        let watchlist = self.watchlist.read().await;
        let mut entries: Vec<WatchlistEntry> = watchlist.values().cloned().collect();
        entries.sort_by(|a, b| a.title.cmp(&b.title).then(a.id.cmp(&b.id)));
        Ok(entries)
    }

    async fn add_to_watchlist(&self, entry: WatchlistEntry) -> AppResult<()> {
        self.watchlist.write().await.insert(entry.id, entry);
        Ok(())
    }

    async fn remove_from_watchlist(&self, id: MovieId) -> AppResult<bool> {
        Ok(self.watchlist.write().await.remove(&id).is_some())
    }
}
