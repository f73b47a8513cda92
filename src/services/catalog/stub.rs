//! Map-backed catalog for pipeline tests
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::{
    error::{CatalogError, CatalogResult},
    models::{Genre, GenreId, MovieDetail, MovieId, MovieListKind, MovieReview, MovieSummary},
    services::catalog::{self, CatalogClient},
};

pub const STUB_IMAGE_BASE: &str = "https://images.stub";

#[derive(Default)]
pub struct StubCatalog {
    pub details: HashMap<MovieId, MovieDetail>,
    pub failing_details: HashSet<MovieId>,
    pub discovered: Vec<MovieSummary>,
    pub fail_discovery: bool,
    pub search_results: HashMap<String, Vec<MovieSummary>>,
    pub search_delays: HashMap<String, Duration>,
    pub lists: HashMap<(MovieListKind, u32), Vec<MovieSummary>>,
    pub images: HashMap<String, Vec<u8>>,
    pub detail_calls: AtomicUsize,
    pub discovery_calls: AtomicUsize,
    pub search_calls: AtomicUsize,
}

impl StubCatalog {
    pub fn with_detail(mut self, detail: MovieDetail) -> Self {
        self.details.insert(detail.id, detail);
        self
    }

    pub fn with_image(mut self, poster_path: &str, bytes: Vec<u8>) -> Self {
        self.images.insert(
            catalog::poster_url(STUB_IMAGE_BASE, Some(poster_path)).unwrap_or_default(),
            bytes,
        );
        self
    }
}

pub fn summary(id: MovieId, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        release_date: "2025-01-01".to_string(),
        poster_path: Some(format!("/poster{}.jpg", id)),
    }
}

pub fn detail(id: MovieId, genres: &[&str], vote_average: f64) -> MovieDetail {
    MovieDetail {
        id,
        title: format!("Movie {}", id),
        release_date: "2025-01-01".to_string(),
        genres: genres
            .iter()
            .map(|name| Genre {
                id: crate::models::genre_id(name).unwrap_or(0),
                name: name.to_string(),
            })
            .collect(),
        vote_average,
        overview: String::new(),
        runtime: 120,
        poster_path: Some(format!("/poster{}.jpg", id)),
    }
}

#[async_trait::async_trait]
impl CatalogClient for StubCatalog {
    async fn search_movies(&self, term: &str) -> CatalogResult<Vec<MovieSummary>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.search_delays.get(term) {
            tokio::time::sleep(*delay).await;
        }
        self.search_results
            .get(term)
            .cloned()
            .ok_or_else(|| CatalogError::Network(format!("no stubbed search for {}", term)))
    }

    async fn fetch_movie_details(&self, id: MovieId) -> CatalogResult<MovieDetail> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_details.contains(&id) {
            return Err(CatalogError::Network(format!("stubbed failure for {}", id)));
        }
        self.details
            .get(&id)
            .cloned()
            .ok_or_else(|| CatalogError::Network(format!("movie {} not found", id)))
    }

    async fn fetch_movies_by_genre(
        &self,
        _genre_ids: &[GenreId],
        _min_rating: f64,
    ) -> CatalogResult<Vec<MovieSummary>> {
        self.discovery_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_discovery {
            return Err(CatalogError::Network("discovery unavailable".to_string()));
        }
        Ok(self.discovered.clone())
    }

    async fn fetch_movie_list(
        &self,
        kind: MovieListKind,
        page: u32,
    ) -> CatalogResult<Vec<MovieSummary>> {
        self.lists
            .get(&(kind, page))
            .cloned()
            .ok_or_else(|| CatalogError::Network(format!("no {} page {}", kind, page)))
    }

    async fn fetch_movie_reviews(&self, _id: MovieId) -> CatalogResult<Vec<MovieReview>> {
        Ok(Vec::new())
    }

    async fn fetch_image_bytes(&self, url: &str) -> CatalogResult<Vec<u8>> {
        self.images
            .get(url)
            .cloned()
            .ok_or_else(|| CatalogError::Network(format!("image {} unavailable", url)))
    }

    fn poster_url(&self, poster_path: &str) -> String {
        catalog::poster_url(STUB_IMAGE_BASE, Some(poster_path)).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
