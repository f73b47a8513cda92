/// Redis-backed read-through cache in front of another catalog client
///
/// Search, details, discovery and curated lists are cached as JSON. Images and
/// reviews always go to the inner client.
use std::sync::Arc;

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::CatalogResult,
    models::{GenreId, MovieDetail, MovieId, MovieListKind, MovieReview, MovieSummary},
    services::catalog::CatalogClient,
};

const SEARCH_CACHE_TTL: u64 = 3600; // 1 hour
const DETAIL_CACHE_TTL: u64 = 604800; // 1 week
const DISCOVER_CACHE_TTL: u64 = 21600; // 6 hours
const LIST_CACHE_TTL: u64 = 21600; // 6 hours

#[derive(Clone)]
pub struct CachedCatalog {
    inner: Arc<dyn CatalogClient>,
    cache: Cache,
}

impl CachedCatalog {
    pub fn new(inner: Arc<dyn CatalogClient>, cache: Cache) -> Self {
        tracing::info!(provider = inner.name(), "Catalog response cache enabled");
        Self { inner, cache }
    }
}

#[async_trait::async_trait]
impl CatalogClient for CachedCatalog {
    async fn search_movies(&self, term: &str) -> CatalogResult<Vec<MovieSummary>> {
        cached!(
            self.cache,
            CacheKey::Search(term.to_string()),
            SEARCH_CACHE_TTL,
            self.inner.search_movies(term)
        )
    }

    async fn fetch_movie_details(&self, id: MovieId) -> CatalogResult<MovieDetail> {
        cached!(
            self.cache,
            CacheKey::Details(id),
            DETAIL_CACHE_TTL,
            self.inner.fetch_movie_details(id)
        )
    }

    async fn fetch_movies_by_genre(
        &self,
        genre_ids: &[GenreId],
        min_rating: f64,
    ) -> CatalogResult<Vec<MovieSummary>> {
        cached!(
            self.cache,
            CacheKey::Discover {
                genre_ids: genre_ids.to_vec(),
                min_rating,
            },
            DISCOVER_CACHE_TTL,
            self.inner.fetch_movies_by_genre(genre_ids, min_rating)
        )
    }

    async fn fetch_movie_list(
        &self,
        kind: MovieListKind,
        page: u32,
    ) -> CatalogResult<Vec<MovieSummary>> {
        cached!(
            self.cache,
            CacheKey::MovieList(kind, page),
            LIST_CACHE_TTL,
            self.inner.fetch_movie_list(kind, page)
        )
    }

    async fn fetch_movie_reviews(&self, id: MovieId) -> CatalogResult<Vec<MovieReview>> {
        self.inner.fetch_movie_reviews(id).await
    }

    async fn fetch_image_bytes(&self, url: &str) -> CatalogResult<Vec<u8>> {
        self.inner.fetch_image_bytes(url).await
    }

    fn poster_url(&self, poster_path: &str) -> String {
        self.inner.poster_url(poster_path)
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}
