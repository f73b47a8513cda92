use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use crate::services::search::SearchState;

use super::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchUpdate {
    #[serde(default)]
    pub text: String,
    pub genre: Option<String>,
}

/// Feeds the latest search box contents into the session
///
/// Returns immediately; the debounced search commits into the state polled by
/// [`current`].
pub async fn update(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SearchUpdate>,
) -> StatusCode {
    state.search.handle_search(&update.text, update.genre).await;
    StatusCode::ACCEPTED
}

pub async fn current(State(state): State<Arc<AppState>>) -> Json<SearchState> {
    Json(state.search.state().await)
}
