use crate::{
    error::AppResult,
    models::{MovieId, UserPreferences, WatchlistEntry},
};

/// Storage for the singleton preferences record
#[async_trait::async_trait]
pub trait PreferencesRepository: Send + Sync {
    /// Returns the stored preferences, creating and storing defaults on first access
    async fn get_or_create_default(&self) -> AppResult<UserPreferences>;

    async fn save_preferences(&self, preferences: UserPreferences) -> AppResult<()>;
}

/// Storage for bookmarked movies
#[async_trait::async_trait]
pub trait WatchlistRepository: Send + Sync {
    /// All bookmarked movies, sorted by title
    async fn list_watchlist(&self) -> AppResult<Vec<WatchlistEntry>>;

    /// Adds or replaces the entry with the same movie id
    async fn add_to_watchlist(&self, entry: WatchlistEntry) -> AppResult<()>;

    /// Removes an entry, returning whether it was present
    async fn remove_from_watchlist(&self, id: MovieId) -> AppResult<bool>;
}
