use crate::{
    error::CatalogResult,
    models::{MovieListKind, MovieSummary},
    services::{catalog::CatalogClient, recommendations::dedup_by_id},
};

/// Pages fetched for each curated list
pub const LIST_PAGES: u32 = 3;

/// Fetches the first pages of a curated list and concatenates them
///
/// Movies repeated across pages keep their first position. Any page failing fails
/// the whole list.
pub async fn fetch_curated_list(
    catalog: &dyn CatalogClient,
    kind: MovieListKind,
) -> CatalogResult<Vec<MovieSummary>> {
    let mut movies = Vec::new();
    for page in 1..=LIST_PAGES {
        let results = catalog.fetch_movie_list(kind, page).await?;
        tracing::debug!(list = %kind, page, results = results.len(), "Fetched list page");
        movies.extend(results);
    }

    Ok(dedup_by_id(movies))
}
