use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{delete, get},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

pub mod movies;
pub mod preferences;
pub mod recommendations;
pub mod search;
pub mod state;
pub mod watchlist;

pub use state::AppState;

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
        // Outermost, so the trace span sees the request id
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Movies
        .route("/movies/search", get(movies::search))
        .route("/movies/lists/:kind", get(movies::curated_list))
        .route("/movies/:id", get(movies::details))
        .route("/movies/:id/reviews", get(movies::reviews))
        // Search-as-you-type session
        .route("/search", get(search::current).put(search::update))
        // Recommendations
        .route(
            "/recommendations",
            get(recommendations::recommend_stored).post(recommendations::recommend),
        )
        // User data
        .route(
            "/preferences",
            get(preferences::get_preferences).put(preferences::update_preferences),
        )
        .route(
            "/watchlist",
            get(watchlist::list_watchlist).post(watchlist::add_to_watchlist),
        )
        .route("/watchlist/:id", delete(watchlist::remove_from_watchlist))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
