use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::{
    error::AppResult,
    models::{Recommendations, UserPreferences, WatchlistEntry},
    services::recommendations,
};

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    #[serde(default)]
    pub preferences: UserPreferences,
    #[serde(default)]
    pub watchlist: Vec<WatchlistEntry>,
}

/// Handler for recommendations from caller-supplied preferences and watchlist
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Recommendations>> {
    request.preferences.validate()?;

    let recommendations = recommendations::fetch_recommendations(
        state.catalog.clone(),
        &request.preferences,
        &request.watchlist,
    )
    .await;
    Ok(Json(recommendations))
}

/// Handler for recommendations from the stored preferences and watchlist
pub async fn recommend_stored(State(state): State<Arc<AppState>>) -> Json<Recommendations> {
    let recommendations = recommendations::recommend_from_store(
        state.catalog.clone(),
        state.preferences.as_ref(),
        state.watchlist.as_ref(),
    )
    .await;
    Json(recommendations)
}
