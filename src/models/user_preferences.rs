use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use crate::error::{AppError, AppResult};

/// Maximum number of prioritized genres a user may pick
pub const MAX_PRIORITIZED_GENRES: usize = 3;

const DEFAULT_MIN_RATING: f64 = 5.0;

/// User preferences feeding the recommendation engine
///
/// There is a single preferences record per installation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserPreferences {
    /// Genre names the user opted into
    #[serde(default)]
    pub favorite_genres: BTreeSet<String>,
    /// Further-emphasized genres, at most three
    #[serde(default, deserialize_with = "deserialize_prioritized")]
    prioritized_genres: Vec<String>,
    /// Minimum catalog vote average, on a 0-10 scale
    #[serde(default = "default_min_rating")]
    pub min_rating: f64,
}

fn default_min_rating() -> f64 {
    DEFAULT_MIN_RATING
}

fn deserialize_prioritized<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut genres = Vec::<String>::deserialize(deserializer)?;
    genres.truncate(MAX_PRIORITIZED_GENRES);
    Ok(genres)
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl UserPreferences {
    /// Creates preferences with no genres and the default minimum rating
    pub fn new() -> Self {
        Self {
            favorite_genres: BTreeSet::new(),
            prioritized_genres: Vec::new(),
            min_rating: DEFAULT_MIN_RATING,
        }
    }

    /// Builder-style constructor used by callers assembling preferences in one go
    pub fn with_genres<F, P>(favorites: F, prioritized: P, min_rating: f64) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut prefs = Self {
            favorite_genres: favorites.into_iter().map(Into::into).collect(),
            prioritized_genres: Vec::new(),
            min_rating,
        };
        prefs.set_prioritized_genres(prioritized.into_iter().map(Into::into).collect());
        prefs
    }

    pub fn prioritized_genres(&self) -> &[String] {
        &self.prioritized_genres
    }

    /// Replaces the prioritized genres, keeping only the first three
    pub fn set_prioritized_genres(&mut self, mut genres: Vec<String>) {
        genres.truncate(MAX_PRIORITIZED_GENRES);
        self.prioritized_genres = genres;
    }

    /// Whether a genre name is one of the favorites
    ///
    /// Matching is by exact name. The genre table is not consulted, so a "Sci-Fi"
    /// favorite does not match a "Science Fiction" genre tag.
    pub fn is_favorite(&self, genre_name: &str) -> bool {
        self.favorite_genres.contains(genre_name)
    }

    /// Rejects a minimum rating outside the catalog's 0-10 scale
    pub fn validate(&self) -> AppResult<()> {
        if !(0.0..=10.0).contains(&self.min_rating) {
            return Err(AppError::InvalidInput(format!(
                "min_rating must be between 0 and 10, got {}",
                self.min_rating
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preferences() {
        let prefs = UserPreferences::new();
        assert!(prefs.favorite_genres.is_empty());
        assert!(prefs.prioritized_genres().is_empty());
        assert_eq!(prefs.min_rating, 5.0);
    }

    #[test]
    fn test_prioritized_genres_truncated() {
        let mut prefs = UserPreferences::new();
        prefs.set_prioritized_genres(vec![
            "Action".to_string(),
            "Drama".to_string(),
            "Horror".to_string(),
            "Comedy".to_string(),
        ]);
        assert_eq!(prefs.prioritized_genres(), ["Action", "Drama", "Horror"]);
    }

    #[test]
    fn test_deserialize_truncates_prioritized() {
        let json = r#"{
            "favorite_genres": ["Action", "Comedy"],
            "prioritized_genres": ["Action", "Comedy", "Drama", "War"],
            "min_rating": 7.5
        }"#;

        let prefs: UserPreferences = serde_json::from_str(json).unwrap();
        assert_eq!(prefs.prioritized_genres().len(), 3);
        assert!(prefs.is_favorite("Comedy"));
        assert_eq!(prefs.min_rating, 7.5);
    }

    #[test]
    fn test_deserialize_defaults() {
        let prefs: UserPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(prefs, UserPreferences::new());
    }

    #[test]
    fn test_duplicate_favorites_collapse() {
        let prefs = UserPreferences::with_genres(["Action", "Action"], Vec::<String>::new(), 6.0);
        assert_eq!(prefs.favorite_genres.len(), 1);
    }

    #[test]
    fn test_is_favorite_matches_exact_name_only() {
        let prefs = UserPreferences::with_genres(["Sci-Fi"], Vec::<String>::new(), 5.0);
        assert!(prefs.is_favorite("Sci-Fi"));
        assert!(!prefs.is_favorite("Science Fiction"));
        assert!(!prefs.is_favorite("Fantasy"));
    }

    #[test]
    fn test_validate_min_rating_range() {
        let mut prefs = UserPreferences::new();
        assert!(prefs.validate().is_ok());

        prefs.min_rating = 10.5;
        assert!(matches!(prefs.validate(), Err(AppError::InvalidInput(_))));

        prefs.min_rating = -1.0;
        assert!(prefs.validate().is_err());
    }
}
