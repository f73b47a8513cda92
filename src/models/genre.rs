use serde::{Deserialize, Serialize};

use super::GenreId;

/// Genre tag attached to a movie detail
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// The catalog's standard movie genres
pub const STANDARD_GENRES: [(&str, GenreId); 19] = [
    ("Action", 28),
    ("Adventure", 12),
    ("Animation", 16),
    ("Comedy", 35),
    ("Crime", 80),
    ("Documentary", 99),
    ("Drama", 18),
    ("Family", 10751),
    ("Fantasy", 14),
    ("History", 36),
    ("Horror", 27),
    ("Music", 10402),
    ("Mystery", 9648),
    ("Romance", 10749),
    ("Science Fiction", 878),
    ("TV Movie", 10770),
    ("Thriller", 53),
    ("War", 10752),
    ("Western", 37),
];

/// Resolves a genre name to its catalog id
///
/// Matching is exact apart from the "Sci-Fi" shorthand used by the settings surface.
pub fn genre_id(name: &str) -> Option<GenreId> {
    let name = match name {
        "Sci-Fi" => "Science Fiction",
        other => other,
    };

    STANDARD_GENRES
        .iter()
        .find(|(genre_name, _)| *genre_name == name)
        .map(|(_, id)| *id)
}
