/// TMDb catalog client
///
/// API Flow:
/// 1. Search: /search/movie?query= -> paged movie summaries
/// 2. Details: /movie/{id} -> genres, vote average, runtime
/// 3. Discovery: /discover/movie?with_genres=&vote_average.gte= -> paged summaries
/// 4. Lists: /movie/{popular|top_rated|upcoming}?page= -> paged summaries
/// 5. Reviews: /movie/{id}/reviews -> paged reviews
///
/// Posters are served from a separate image host and fetched by absolute URL.
use crate::{
    error::{CatalogError, CatalogResult},
    models::{
        ApiPage, GenreId, MovieDetail, MovieId, MovieListKind, MovieReview, MovieSummary,
    },
    services::catalog::{self, CatalogClient},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const DISCOVER_SORT: &str = "popularity.desc";

#[derive(Clone)]
pub struct TmdbCatalog {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbCatalog {
    pub fn new(api_key: String, api_url: String, image_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_url,
        }
    }

    /// Issues a GET against the catalog API and decodes the JSON body
    ///
    /// Non-success statuses (including 404) are reported as network errors; a body
    /// that does not match `T` is a decode error.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> CatalogResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Network(format!(
                "Catalog API returned status {} for {}: {}",
                status, path, body
            )));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(
                error = %e,
                path = %path,
                "Failed to deserialize catalog response"
            );
            CatalogError::from(e)
        })
    }

    fn discovery_params(genre_ids: &[GenreId], min_rating: f64) -> Vec<(&'static str, String)> {
        let with_genres = genre_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("with_genres", with_genres),
            ("vote_average.gte", min_rating.to_string()),
            ("sort_by", DISCOVER_SORT.to_string()),
        ]
    }
}

#[async_trait::async_trait]
impl CatalogClient for TmdbCatalog {
    async fn search_movies(&self, term: &str) -> CatalogResult<Vec<MovieSummary>> {
        let page: ApiPage<MovieSummary> = self
            .get_json("/search/movie", &[("query", term.to_string())])
            .await?;

        tracing::info!(
            query = %term,
            results = page.results.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(page.results)
    }

    async fn fetch_movie_details(&self, id: MovieId) -> CatalogResult<MovieDetail> {
        let detail: MovieDetail = self.get_json(&format!("/movie/{}", id), &[]).await?;

        tracing::debug!(
            movie_id = id,
            genres = detail.genres.len(),
            provider = self.name(),
            "Movie details fetched"
        );

        Ok(detail)
    }

    async fn fetch_movies_by_genre(
        &self,
        genre_ids: &[GenreId],
        min_rating: f64,
    ) -> CatalogResult<Vec<MovieSummary>> {
        let params = Self::discovery_params(genre_ids, min_rating);
        let page: ApiPage<MovieSummary> = self.get_json("/discover/movie", &params).await?;

        tracing::info!(
            genres = ?genre_ids,
            min_rating,
            results = page.results.len(),
            provider = self.name(),
            "Discovery completed"
        );

        Ok(page.results)
    }

    async fn fetch_movie_list(
        &self,
        kind: MovieListKind,
        page: u32,
    ) -> CatalogResult<Vec<MovieSummary>> {
        let path = format!("/movie/{}", kind.as_path());
        let response: ApiPage<MovieSummary> =
            self.get_json(&path, &[("page", page.to_string())]).await?;
        Ok(response.results)
    }

    async fn fetch_movie_reviews(&self, id: MovieId) -> CatalogResult<Vec<MovieReview>> {
        let response: ApiPage<MovieReview> = self
            .get_json(&format!("/movie/{}/reviews", id), &[])
            .await?;
        Ok(response.results)
    }

    async fn fetch_image_bytes(&self, url: &str) -> CatalogResult<Vec<u8>> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(CatalogError::Network(format!(
                "Image request returned status {} for {}",
                response.status(),
                url
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }

    fn poster_url(&self, poster_path: &str) -> String {
        // poster_url only yields None for a missing path
        catalog::poster_url(&self.image_url, Some(poster_path)).unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
