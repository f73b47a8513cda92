use serde::{Deserialize, Serialize};

use super::{MovieId, MovieSummary};

/// A bookmarked movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchlistEntry {
    /// Catalog movie id, unique within the watchlist
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// Poster cached at bookmark time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_bytes: Option<Vec<u8>>,
}

impl WatchlistEntry {
    pub fn new(id: MovieId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            release_date: String::new(),
            poster_path: None,
            poster_bytes: None,
        }
    }
}

impl From<MovieSummary> for WatchlistEntry {
    fn from(movie: MovieSummary) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            release_date: movie.release_date,
            poster_path: movie.poster_path,
            poster_bytes: None,
        }
    }
}
