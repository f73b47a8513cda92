use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::{
    sync::{Mutex, RwLock},
    task::JoinHandle,
};

use crate::{
    error::CatalogResult,
    models::{genre_id, MovieDetail, MovieSummary},
    services::{catalog::CatalogClient, fan_out::gather},
};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

pub const NO_GENRE_MATCH_MESSAGE: &str = "No movies found for selected genre";

/// Genre selector value that disables the filter
pub const ALL_GENRES: &str = "All";

/// Normalizes a genre selector; blank and [`ALL_GENRES`] mean no filter
pub fn genre_filter(genre: Option<&str>) -> Option<&str> {
    genre
        .map(str::trim)
        .filter(|g| !g.is_empty() && *g != ALL_GENRES)
}

/// Whether a movie carries the selected genre
///
/// Selector names known to the genre table match by id, so "Sci-Fi" selects
/// "Science Fiction". Unknown names match genre tags verbatim.
fn matches_genre(detail: &MovieDetail, selector: &str) -> bool {
    match genre_id(selector) {
        Some(id) => detail.genres.iter().any(|genre| genre.id == id),
        None => detail.has_genre_named(selector),
    }
}

/// Searches the catalog, optionally narrowing the results to one genre
///
/// The genre selector goes through [`genre_filter`], so "All" searches unfiltered.
/// Genre membership needs each result's details, fetched concurrently; results
/// whose details cannot be fetched are dropped. Search order is preserved.
pub async fn search_movies(
    catalog: Arc<dyn CatalogClient>,
    term: &str,
    genre: Option<&str>,
) -> CatalogResult<Vec<MovieSummary>> {
    let results = catalog.search_movies(term).await?;

    let Some(genre) = genre_filter(genre) else {
        return Ok(results);
    };

    let genre = Arc::new(genre.to_string());
    let mut matching = gather(
        "search_genre_filter",
        results.into_iter().enumerate(),
        |(position, movie)| {
            let catalog = catalog.clone();
            let genre = genre.clone();
            async move {
                match catalog.fetch_movie_details(movie.id).await {
                    Ok(detail) if matches_genre(&detail, &genre) => Some((position, movie)),
                    Ok(_) => None,
                    Err(e) => {
                        tracing::warn!(movie_id = movie.id, error = %e, "Detail fetch failed during genre filter");
                        None
                    }
                }
            }
        },
    )
    .await;

    matching.sort_by_key(|(position, _)| *position);
    Ok(matching.into_iter().map(|(_, movie)| movie).collect())
}

/// Visible state of a search session
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SearchState {
    pub term: String,
    pub genre: Option<String>,
    pub results: Vec<MovieSummary>,
    pub error_message: Option<String>,
    pub is_loading: bool,
}

/// Debounced, cancellable search-as-you-type
///
/// Each call to [`SearchSession::handle_search`] supersedes the previous one. A
/// superseded search is aborted and, should it still reach its commit point, is
/// discarded by the generation check performed under the state lock.
pub struct SearchSession {
    catalog: Arc<dyn CatalogClient>,
    debounce: Duration,
    state: Arc<RwLock<SearchState>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl SearchSession {
    pub fn new(catalog: Arc<dyn CatalogClient>, debounce: Duration) -> Self {
        Self {
            catalog,
            debounce,
            state: Arc::new(RwLock::new(SearchState::default())),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
        }
    }

    /// Snapshot of the visible state
    pub async fn state(&self) -> SearchState {
        self.state.read().await.clone()
    }

    /// Starts a new search for `text`, replacing any pending one
    ///
    /// Blank text cancels the pending search and clears the results immediately.
    pub async fn handle_search(&self, text: &str, genre: Option<String>) {
        let term = text.trim().to_string();
        let genre = genre_filter(genre.as_deref()).map(str::to_string);

        let mut in_flight = self.in_flight.lock().await;
        let generation = {
            let mut state = self.state.write().await;
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

            if let Some(previous) = in_flight.take() {
                previous.abort();
            }

            if term.is_empty() {
                *state = SearchState::default();
                tracing::debug!(generation, "Search cleared");
                return;
            }

            state.term = term.clone();
            state.genre = genre.clone();
            state.is_loading = true;
            generation
        };

        let catalog = self.catalog.clone();
        let state = self.state.clone();
        let current = self.generation.clone();
        let debounce = self.debounce;

        *in_flight = Some(tokio::spawn(async move {
            tokio::time::sleep(debounce).await;

            let outcome = search_movies(catalog, &term, genre.as_deref()).await;

            let mut state = state.write().await;
            if current.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, term = %term, "Discarding superseded search");
                return;
            }

            state.is_loading = false;
            match outcome {
                Ok(results) => {
                    tracing::debug!(generation, term = %term, results = results.len(), "Search completed");
                    state.error_message = match (&genre, results.is_empty()) {
                        (Some(_), true) => Some(NO_GENRE_MATCH_MESSAGE.to_string()),
                        _ => None,
                    };
                    state.results = results;
                }
                Err(e) => {
                    tracing::warn!(generation, term = %term, error = %e, "Search failed");
                    state.error_message = Some(e.to_string());
                    state.results.clear();
                }
            }
        }));
    }

    /// Waits for the pending search, if any, to finish or be aborted
    pub async fn settle(&self) {
        let handle = self.in_flight.lock().await.take();
        if let Some(handle) = handle {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!(error = %e, "Search task failed");
                }
            }
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if let Some(handle) = self.in_flight.get_mut().take() {
            handle.abort();
        }
    }
}
