use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetail, MovieId, MovieListKind, MovieReview, MovieSummary},
    services::{browse, search},
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    genre: Option<String>,
}

/// Handler for movie search
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let term = params.q.trim();
    if term.is_empty() {
        return Err(AppError::InvalidInput("query must not be empty".to_string()));
    }

    let genre = search::genre_filter(params.genre.as_deref());
    let movies = search::search_movies(state.catalog.clone(), term, genre).await?;
    Ok(Json(movies))
}

/// Handler for a single movie's details
pub async fn details(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<MovieDetail>> {
    let detail = state.catalog.fetch_movie_details(id).await?;
    Ok(Json(detail))
}

pub async fn reviews(
    State(state): State<Arc<AppState>>,
    Path(id): Path<MovieId>,
) -> AppResult<Json<Vec<MovieReview>>> {
    let reviews = state.catalog.fetch_movie_reviews(id).await?;
    Ok(Json(reviews))
}

/// Handler for curated lists (popular, top_rated, upcoming)
pub async fn curated_list(
    State(state): State<Arc<AppState>>,
    Path(kind): Path<String>,
) -> AppResult<Json<Vec<MovieSummary>>> {
    let kind: MovieListKind = kind.parse().map_err(AppError::NotFound)?;
    let movies = browse::fetch_curated_list(state.catalog.as_ref(), kind).await?;
    Ok(Json(movies))
}
