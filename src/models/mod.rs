use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display, str::FromStr};

pub mod genre;
pub mod user_preferences;
pub mod watchlist;

pub use genre::{genre_id, Genre, STANDARD_GENRES};
pub use user_preferences::UserPreferences;
pub use watchlist::WatchlistEntry;

/// Catalog movie identifier
pub type MovieId = u64;

/// Catalog genre identifier
pub type GenreId = u32;

/// Genre id -> accumulated score, rebuilt on every recommendation pass
pub type GenreFrequencyMap = HashMap<GenreId, u32>;

/// Movie as returned by search, discovery and list queries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub poster_path: Option<String>,
}

/// Full movie record from the details endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub overview: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub runtime: u32,
    #[serde(default)]
    pub poster_path: Option<String>,
}

impl MovieDetail {
    pub fn has_genre_named(&self, name: &str) -> bool {
        self.genres.iter().any(|g| g.name == name)
    }
}

impl From<&MovieDetail> for MovieSummary {
    fn from(detail: &MovieDetail) -> Self {
        Self {
            id: detail.id,
            title: detail.title.clone(),
            release_date: detail.release_date.clone(),
            poster_path: detail.poster_path.clone(),
        }
    }
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or_default())
}

/// A discovered movie together with its bonus score
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedRecommendation {
    pub movie: MovieSummary,
    pub score: u32,
}

/// Output of a full recommendation pass
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Recommendations {
    pub recommended: Vec<MovieSummary>,
    /// Poster bytes keyed by movie id; movies without a fetched poster are absent
    pub images: HashMap<MovieId, Vec<u8>>,
}

/// Curated catalog lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovieListKind {
    Popular,
    TopRated,
    Upcoming,
}

impl MovieListKind {
    /// Path segment used by the catalog API
    pub fn as_path(&self) -> &'static str {
        match self {
            MovieListKind::Popular => "popular",
            MovieListKind::TopRated => "top_rated",
            MovieListKind::Upcoming => "upcoming",
        }
    }
}

impl Display for MovieListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_path())
    }
}

impl FromStr for MovieListKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(MovieListKind::Popular),
            "top_rated" => Ok(MovieListKind::TopRated),
            "upcoming" => Ok(MovieListKind::Upcoming),
            other => Err(format!("Unknown movie list: {}", other)),
        }
    }
}

/// User review of a movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieReview {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub author_details: Option<AuthorDetails>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorDetails {
    #[serde(default)]
    pub name: Option<String>,
    pub username: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

// ============================================================================
// Catalog API Types
// ============================================================================

/// Paged response envelope shared by search, discovery, list and review endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPage<T> {
    #[serde(default)]
    pub page: u32,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_summary_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
            "vote_average": 8.4,
            "genre_ids": [28, 878, 12]
        }"#;

        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, 27205);
        assert_eq!(movie.title, "Inception");
        assert_eq!(movie.release_date, "2010-07-15");
        assert_eq!(
            movie.poster_path,
            Some("/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg".to_string())
        );
    }

    #[test]
    fn test_movie_summary_missing_optional_fields() {
        let json = r#"{ "id": 1, "title": "Untitled", "poster_path": null }"#;

        let movie: MovieSummary = serde_json::from_str(json).unwrap();
        assert_eq!(movie.release_date, "");
        assert_eq!(movie.poster_path, None);
    }

    #[test]
    fn test_movie_detail_deserialization() {
        let json = r#"{
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-15",
            "genres": [
                { "id": 28, "name": "Action" },
                { "id": 878, "name": "Science Fiction" }
            ],
            "vote_average": 8.369,
            "overview": "Cobb, a skilled thief...",
            "runtime": 148,
            "poster_path": "/inception.jpg"
        }"#;

        let detail: MovieDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.genres.len(), 2);
        assert_eq!(detail.runtime, 148);
        assert!(detail.has_genre_named("Science Fiction"));
        assert!(!detail.has_genre_named("Drama"));
    }

    #[test]
    fn test_movie_detail_null_runtime() {
        let json = r#"{ "id": 5, "title": "Short", "runtime": null, "vote_average": 6.1 }"#;

        let detail: MovieDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.runtime, 0);
        assert!(detail.genres.is_empty());
    }

    #[test]
    fn test_api_page_without_results() {
        let page: ApiPage<MovieSummary> =
            serde_json::from_str(r#"{ "page": 1, "total_results": 0 }"#).unwrap();
        assert!(page.results.is_empty());
    }

    #[test]
    fn test_review_deserialization() {
        let json = r#"{
            "id": "58a231c5925141179e000674",
            "author": "Cat Ellington",
            "content": "A triumph.",
            "created_at": "2017-02-13T23:16:19.538Z",
            "author_details": { "name": "", "username": "CatEllington", "rating": 9.0 }
        }"#;

        let review: MovieReview = serde_json::from_str(json).unwrap();
        assert_eq!(review.author, "Cat Ellington");
        let details = review.author_details.unwrap();
        assert_eq!(details.username, "CatEllington");
        assert_eq!(details.rating, Some(9.0));
    }

    #[test]
    fn test_movie_list_kind_from_path() {
        for kind in [
            MovieListKind::Popular,
            MovieListKind::TopRated,
            MovieListKind::Upcoming,
        ] {
            assert_eq!(kind.as_path().parse::<MovieListKind>(), Ok(kind));
        }
        assert!("trending".parse::<MovieListKind>().is_err());
    }
}
