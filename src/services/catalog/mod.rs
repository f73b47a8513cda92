/// Movie catalog abstraction
///
/// Every recommendation stage takes the catalog as an explicit `Arc<dyn CatalogClient>`,
/// so tests and the response cache can substitute their own implementation.
use crate::{
    error::CatalogResult,
    models::{GenreId, MovieDetail, MovieId, MovieListKind, MovieReview, MovieSummary},
};

pub mod cached;
pub mod tmdb;

#[cfg(test)]
pub(crate) mod stub;

pub use cached::CachedCatalog;
pub use tmdb::TmdbCatalog;

/// Trait for remote movie catalogs
///
/// Implementations hold no per-call mutable state and may be invoked from any number
/// of tasks at once. Nothing here retries or rate limits.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Free-text movie search
    async fn search_movies(&self, term: &str) -> CatalogResult<Vec<MovieSummary>>;

    /// Full details for one movie
    ///
    /// A missing movie is reported as a network error.
    async fn fetch_movie_details(&self, id: MovieId) -> CatalogResult<MovieDetail>;

    /// Server-side discovery of movies tagged with the given genres and rated at
    /// least `min_rating`
    async fn fetch_movies_by_genre(
        &self,
        genre_ids: &[GenreId],
        min_rating: f64,
    ) -> CatalogResult<Vec<MovieSummary>>;

    /// One page of a curated list
    async fn fetch_movie_list(
        &self,
        kind: MovieListKind,
        page: u32,
    ) -> CatalogResult<Vec<MovieSummary>>;

    async fn fetch_movie_reviews(&self, id: MovieId) -> CatalogResult<Vec<MovieReview>>;

    /// Raw bytes of an image URL
    async fn fetch_image_bytes(&self, url: &str) -> CatalogResult<Vec<u8>>;

    /// Absolute URL of a poster path
    fn poster_url(&self, poster_path: &str) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Joins an image base URL and an optional poster path
pub fn poster_url(image_base: &str, poster_path: Option<&str>) -> Option<String> {
    let path = poster_path?;
    Some(format!(
        "{}/{}",
        image_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_url_none() {
        assert_eq!(poster_url("https://image.tmdb.org/t/p/w500", None), None);
    }

    #[test]
    fn test_poster_url_joins_slashes() {
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500", Some("/abc.jpg")),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg".to_string())
        );
        assert_eq!(
            poster_url("https://image.tmdb.org/t/p/w500/", Some("abc.jpg")),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg".to_string())
        );
    }
}
