use std::sync::Arc;

use axum::{extract::State, Json};

use crate::{error::AppResult, models::UserPreferences};

use super::AppState;

pub async fn get_preferences(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<UserPreferences>> {
    let preferences = state.preferences.get_or_create_default().await?;
    Ok(Json(preferences))
}

/// Replaces the stored preferences; more than three prioritized genres are cut to
/// the first three
pub async fn update_preferences(
    State(state): State<Arc<AppState>>,
    Json(preferences): Json<UserPreferences>,
) -> AppResult<Json<UserPreferences>> {
    preferences.validate()?;
    state.preferences.save_preferences(preferences.clone()).await?;

    tracing::info!(
        favorites = preferences.favorite_genres.len(),
        prioritized = preferences.prioritized_genres().len(),
        min_rating = preferences.min_rating,
        "Preferences updated"
    );
    Ok(Json(preferences))
}
