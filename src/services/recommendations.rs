use std::collections::{HashMap, HashSet};
use std::fmt::Display;
use std::sync::Arc;

use crate::{
    db::{PreferencesRepository, WatchlistRepository},
    error::CatalogResult,
    models::{
        genre_id, GenreFrequencyMap, GenreId, MovieDetail, MovieId, MovieSummary,
        RankedRecommendation, Recommendations, UserPreferences, WatchlistEntry,
    },
    services::{catalog::CatalogClient, fan_out::gather},
};

/// Number of genres fed into discovery
pub const MAX_TOP_GENRES: usize = 3;

/// Length cap of the final ranked list
pub const MAX_RECOMMENDATIONS: usize = 20;

const FAVORITE_GENRE_WEIGHT: u32 = 2;
const PRIORITIZED_GENRE_WEIGHT: u32 = 1;
const WATCHED_GENRE_WEIGHT: u32 = 1;
const WATCHED_FAVORITE_BONUS: u32 = 1;

/// Stages of a recommendation pass, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    FetchingPreferences,
    FetchingWatchlist,
    ComputingFrequency,
    SelectingGenres,
    FetchingDiscovery,
    Filtering,
    Scoring,
    FetchingImages,
    Done,
}

impl Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::FetchingPreferences => "fetching_preferences",
            PipelineStage::FetchingWatchlist => "fetching_watchlist",
            PipelineStage::ComputingFrequency => "computing_frequency",
            PipelineStage::SelectingGenres => "selecting_genres",
            PipelineStage::FetchingDiscovery => "fetching_discovery",
            PipelineStage::Filtering => "filtering",
            PipelineStage::Scoring => "scoring",
            PipelineStage::FetchingImages => "fetching_images",
            PipelineStage::Done => "done",
        };
        write!(f, "{}", name)
    }
}

/// Fetches a movie's details, logging and swallowing any failure
async fn fetch_detail_or_drop(catalog: Arc<dyn CatalogClient>, id: MovieId) -> Option<MovieDetail> {
    match catalog.fetch_movie_details(id).await {
        Ok(detail) => Some(detail),
        Err(e) => {
            tracing::warn!(movie_id = id, error = %e, "Detail fetch failed, dropping movie");
            None
        }
    }
}

/// Weights genres by the user's watchlist and stated preferences
///
/// Scoring:
/// - each genre of each watchlisted movie: +1, and +1 more when it is a favorite
/// - each favorite genre: +2, whether or not the watchlist is empty
/// - each prioritized genre: +1
///
/// Watchlist details are fetched concurrently; a failed fetch contributes nothing.
/// Favorite and prioritized names are resolved to ids through the standard genre
/// table, skipping unknown names. The watchlist favorite bonus compares names
/// exactly.
pub async fn compute_genre_frequency(
    catalog: Arc<dyn CatalogClient>,
    prefs: &UserPreferences,
    watchlist: &[WatchlistEntry],
) -> GenreFrequencyMap {
    let mut frequency = GenreFrequencyMap::new();

    if !watchlist.is_empty() {
        let details = gather(
            "genre_frequency",
            watchlist.iter().map(|entry| entry.id),
            |id| fetch_detail_or_drop(catalog.clone(), id),
        )
        .await;

        tracing::debug!(
            watchlist = watchlist.len(),
            fetched = details.len(),
            "Watchlist details fetched"
        );

        for detail in &details {
            for genre in &detail.genres {
                let score = frequency.entry(genre.id).or_insert(0);
                *score += WATCHED_GENRE_WEIGHT;
                if prefs.is_favorite(&genre.name) {
                    *score += WATCHED_FAVORITE_BONUS;
                }
            }
        }
    }

    for id in prefs.favorite_genres.iter().filter_map(|name| genre_id(name)) {
        *frequency.entry(id).or_insert(0) += FAVORITE_GENRE_WEIGHT;
    }

    for id in prefs.prioritized_genres().iter().filter_map(|name| genre_id(name)) {
        *frequency.entry(id).or_insert(0) += PRIORITIZED_GENRE_WEIGHT;
    }

    frequency
}

/// Highest-scoring genres, best first; equal scores go to the lower genre id
pub fn top_genres(frequency: &GenreFrequencyMap) -> Vec<GenreId> {
    let mut ranked: Vec<(GenreId, u32)> = frequency.iter().map(|(id, score)| (*id, *score)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(MAX_TOP_GENRES)
        .map(|(id, _)| id)
        .collect()
}

/// Drops discovered movies the user already bookmarked, keeping discovery order
pub fn filter_bookmarked(
    discovered: Vec<MovieSummary>,
    watchlist: &[WatchlistEntry],
) -> Vec<MovieSummary> {
    let bookmarked: HashSet<MovieId> = watchlist.iter().map(|entry| entry.id).collect();
    discovered
        .into_iter()
        .filter(|movie| !bookmarked.contains(&movie.id))
        .collect()
}

/// Keeps the first occurrence of every movie id
pub fn dedup_by_id<I>(movies: I) -> Vec<MovieSummary>
where
    I: IntoIterator<Item = MovieSummary>,
{
    let mut seen = HashSet::new();
    movies
        .into_iter()
        .filter(|movie| seen.insert(movie.id))
        .collect()
}

/// Discovery candidates for the top genres, minus bookmarked movies
///
/// No catalog call is made when `top_genres` is empty.
pub async fn discover_candidates(
    catalog: &dyn CatalogClient,
    top_genres: &[GenreId],
    min_rating: f64,
    watchlist: &[WatchlistEntry],
) -> CatalogResult<Vec<MovieSummary>> {
    if top_genres.is_empty() {
        return Ok(Vec::new());
    }

    let discovered = catalog.fetch_movies_by_genre(top_genres, min_rating).await?;
    let discovered_count = discovered.len();
    let candidates = filter_bookmarked(discovered, watchlist);

    tracing::debug!(
        stage = %PipelineStage::Filtering,
        discovered = discovered_count,
        removed = discovered_count - candidates.len(),
        "Bookmarked movies filtered"
    );

    Ok(candidates)
}

/// Bonus score of a candidate, or `None` when it does not qualify
///
/// A candidate qualifies when it meets the minimum rating and shares at least one
/// genre with the favorites (any genre qualifies when there are no favorites). The
/// first matching favorite earns nothing; each further match earns one point.
pub fn score_detail(detail: &MovieDetail, prefs: &UserPreferences) -> Option<u32> {
    let meets_rating = detail.vote_average >= prefs.min_rating;
    let matching_favorites = detail
        .genres
        .iter()
        .filter(|genre| prefs.is_favorite(&genre.name))
        .count();

    let qualifies = meets_rating && (matching_favorites > 0 || prefs.favorite_genres.is_empty());
    qualifies.then(|| matching_favorites.saturating_sub(1) as u32)
}

/// Scores candidates against their details and ranks them
///
/// Details are fetched concurrently and candidates whose fetch fails are dropped.
/// The result is sorted by score, highest first, with equal scores kept in
/// candidate order, and capped at [`MAX_RECOMMENDATIONS`].
pub async fn score_movies(
    catalog: Arc<dyn CatalogClient>,
    candidates: &[MovieSummary],
    prefs: &UserPreferences,
) -> Vec<RankedRecommendation> {
    let prefs = Arc::new(prefs.clone());

    let mut scored = gather(
        "scoring",
        candidates.iter().cloned().enumerate(),
        |(position, movie)| {
            let catalog = catalog.clone();
            let prefs = prefs.clone();
            async move {
                let detail = fetch_detail_or_drop(catalog, movie.id).await?;
                let score = score_detail(&detail, &prefs)?;
                Some((position, RankedRecommendation { movie, score }))
            }
        },
    )
    .await;

    // Arrival order is arbitrary; restore candidate order before the stable sort
    scored.sort_by_key(|(position, _)| *position);
    let mut ranked: Vec<RankedRecommendation> =
        scored.into_iter().map(|(_, ranked)| ranked).collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(MAX_RECOMMENDATIONS);

    ranked
}

/// Fetches posters for the given movies, keyed by movie id
///
/// Movies without a poster path, and posters that fail to download, are absent
/// from the result.
pub async fn fetch_recommendation_images(
    catalog: Arc<dyn CatalogClient>,
    movies: &[MovieSummary],
) -> HashMap<MovieId, Vec<u8>> {
    let jobs: Vec<(MovieId, String)> = movies
        .iter()
        .filter_map(|movie| {
            movie
                .poster_path
                .as_deref()
                .map(|path| (movie.id, catalog.poster_url(path)))
        })
        .collect();

    gather("images", jobs, |(id, url)| {
        let catalog = catalog.clone();
        async move {
            match catalog.fetch_image_bytes(&url).await {
                Ok(bytes) => Some((id, bytes)),
                Err(e) => {
                    tracing::warn!(movie_id = id, url = %url, error = %e, "Error fetching poster");
                    None
                }
            }
        }
    })
    .await
    .into_iter()
    .collect()
}

/// Runs the full recommendation pipeline for one preferences/watchlist pair
///
/// Never fails: a discovery failure is logged and produces an empty result, and
/// per-movie failures only shrink the result.
#[tracing::instrument(skip_all, fields(watchlist = watchlist.len(), min_rating = prefs.min_rating))]
pub async fn fetch_recommendations(
    catalog: Arc<dyn CatalogClient>,
    prefs: &UserPreferences,
    watchlist: &[WatchlistEntry],
) -> Recommendations {
    tracing::debug!(stage = %PipelineStage::ComputingFrequency, "Recommendation pass started");
    let frequency = compute_genre_frequency(catalog.clone(), prefs, watchlist).await;

    let top = top_genres(&frequency);
    tracing::debug!(stage = %PipelineStage::SelectingGenres, genres = ?top, "Top genres selected");

    if top.is_empty() {
        tracing::info!(stage = %PipelineStage::Done, "No genre signal, skipping discovery");
        return Recommendations::default();
    }

    let candidates =
        match discover_candidates(catalog.as_ref(), &top, prefs.min_rating, watchlist).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::error!(
                    stage = %PipelineStage::FetchingDiscovery,
                    error = %e,
                    "Error fetching discovered movies"
                );
                return Recommendations::default();
            }
        };

    let ranked = score_movies(catalog.clone(), &candidates, prefs).await;
    let recommended: Vec<MovieSummary> = ranked.into_iter().map(|r| r.movie).collect();
    tracing::debug!(
        stage = %PipelineStage::Scoring,
        candidates = candidates.len(),
        recommended = recommended.len(),
        "Candidates scored"
    );

    tracing::debug!(stage = %PipelineStage::FetchingImages, "Fetching posters");
    let images = fetch_recommendation_images(catalog, &recommended).await;

    tracing::info!(
        stage = %PipelineStage::Done,
        recommended = recommended.len(),
        images = images.len(),
        "Recommendations ready"
    );

    Recommendations {
        recommended,
        images,
    }
}

/// Runs the pipeline against the stored preferences and watchlist
///
/// Unreadable preferences fall back to defaults; an unreadable watchlist yields an
/// empty result.
pub async fn recommend_from_store(
    catalog: Arc<dyn CatalogClient>,
    preferences: &dyn PreferencesRepository,
    watchlist: &dyn WatchlistRepository,
) -> Recommendations {
    let prefs = match preferences.get_or_create_default().await {
        Ok(prefs) => prefs,
        Err(e) => {
            tracing::warn!(
                stage = %PipelineStage::FetchingPreferences,
                error = %e,
                "Failed to read preferences, using defaults"
            );
            UserPreferences::default()
        }
    };

    let entries = match watchlist.list_watchlist().await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!(
                stage = %PipelineStage::FetchingWatchlist,
                error = %e,
                "Failed to fetch watchlist"
            );
            return Recommendations::default();
        }
    };

    fetch_recommendations(catalog, &prefs, &entries).await
}
