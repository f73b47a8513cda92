use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use reelpick_api::{
    error::{CatalogError, CatalogResult},
    models::{
        genre_id, Genre, GenreId, MovieDetail, MovieId, MovieListKind, MovieReview, MovieSummary,
    },
    routes::{create_router, AppState},
    services::catalog::CatalogClient,
};

/// Catalog serving a fixed set of movies
#[derive(Default)]
pub struct FakeCatalog {
    pub details: HashMap<MovieId, MovieDetail>,
    pub discovered: Vec<MovieSummary>,
    pub searches: HashMap<String, Vec<MovieSummary>>,
    pub lists: HashMap<(MovieListKind, u32), Vec<MovieSummary>>,
}

impl FakeCatalog {
    pub fn with_movie(mut self, id: MovieId, title: &str, genres: &[&str], vote_average: f64) -> Self {
        self.details.insert(
            id,
            MovieDetail {
                id,
                title: title.to_string(),
                release_date: "2024-05-01".to_string(),
                genres: genres
                    .iter()
                    .map(|name| Genre {
                        id: genre_id(name).unwrap_or(0),
                        name: name.to_string(),
                    })
                    .collect(),
                vote_average,
                overview: format!("About {}", title),
                runtime: 110,
                poster_path: Some(format!("/{}.jpg", id)),
            },
        );
        self
    }

    pub fn summary(&self, id: MovieId) -> MovieSummary {
        self.details
            .get(&id)
            .map(MovieSummary::from)
            .unwrap_or_else(|| MovieSummary {
                id,
                title: format!("Movie {}", id),
                release_date: String::new(),
                poster_path: None,
            })
    }
}

#[async_trait::async_trait]
impl CatalogClient for FakeCatalog {
    async fn search_movies(&self, term: &str) -> CatalogResult<Vec<MovieSummary>> {
        Ok(self.searches.get(term).cloned().unwrap_or_default())
    }

    async fn fetch_movie_details(&self, id: MovieId) -> CatalogResult<MovieDetail> {
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::Network(format!("HTTP 404 for movie {}", id)))
    }

    async fn fetch_movies_by_genre(
        &self,
        _genre_ids: &[GenreId],
        _min_rating: f64,
    ) -> CatalogResult<Vec<MovieSummary>> {
        Ok(self.discovered.clone())
    }

    async fn fetch_movie_list(
        &self,
        kind: MovieListKind,
        page: u32,
    ) -> CatalogResult<Vec<MovieSummary>> {
        Ok(self.lists.get(&(kind, page)).cloned().unwrap_or_default())
    }

    async fn fetch_movie_reviews(&self, _id: MovieId) -> CatalogResult<Vec<MovieReview>> {
        Ok(Vec::new())
    }

    async fn fetch_image_bytes(&self, url: &str) -> CatalogResult<Vec<u8>> {
        Ok(url.as_bytes().to_vec())
    }

    fn poster_url(&self, poster_path: &str) -> String {
        format!("https://images.test{}", poster_path)
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

pub fn create_test_app(catalog: FakeCatalog) -> Router {
    let state = AppState::in_memory(Arc::new(catalog), Duration::from_millis(0));
    create_router(Arc::new(state))
}

/// Sends one request and returns the status with the decoded JSON body (`Null` when empty)
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
