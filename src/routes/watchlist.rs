use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, MovieSummary, WatchlistEntry},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct AddWatchlistRequest {
    pub id: MovieId,
    /// Looked up in the catalog when omitted
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub poster_path: Option<String>,
}

pub async fn list_watchlist(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<WatchlistEntry>>> {
    let entries = state.watchlist.list_watchlist().await?;
    Ok(Json(entries))
}

/// Bookmarks a movie and caches its poster
///
/// Poster download failures leave the entry without poster bytes.
pub async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AddWatchlistRequest>,
) -> AppResult<(StatusCode, Json<WatchlistEntry>)> {
    let mut entry = match request.title {
        Some(title) => WatchlistEntry {
            id: request.id,
            title,
            release_date: request.release_date.unwrap_or_default(),
            poster_path: request.poster_path,
            poster_bytes: None,
        },
        None => {
            let detail = state.catalog.fetch_movie_details(request.id).await?;
            WatchlistEntry::from(MovieSummary::from(&detail))
        }
    };

    if let Some(path) = entry.poster_path.as_deref() {
        let url = state.catalog.poster_url(path);
        match state.catalog.fetch_image_bytes(&url).await {
            Ok(bytes) => entry.poster_bytes = Some(bytes),
            Err(e) => {
                tracing::warn!(movie_id = entry.id, error = %e, "Error fetching poster for watchlist");
            }
        }
    }

    state.watchlist.add_to_watchlist(entry.clone()).await?;
    tracing::info!(movie_id = entry.id, title = %entry.title, "Added to watchlist");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<StatusCode> {
    if !state.watchlist.remove_from_watchlist(id).await? {
        return Err(AppError::NotFound(format!("Movie {} is not in the watchlist", id)));
    }

    tracing::info!(movie_id = id, "Removed from watchlist");
    Ok(StatusCode::NO_CONTENT)
}
