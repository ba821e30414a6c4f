use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::MovieId;

/// A row of the `movies` table
///
/// Only `movie_id` and `title` are required. The metadata columns default to
/// `None` when the table does not have them (see `db::decode`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub movie_id: MovieId,
    pub title: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default)]
    pub runtime_minutes: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub trailer_url: Option<String>,
}

impl Movie {
    /// Creates a movie with no metadata
    pub fn new(movie_id: MovieId, title: impl Into<String>) -> Self {
        Self {
            movie_id,
            title: title.into(),
            genre: None,
            release_date: None,
            runtime_minutes: None,
            description: None,
            trailer_url: None,
        }
    }
}

/// Substring filter on title and genre, case-insensitive
///
/// An empty or missing field does not filter. A movie without a genre never
/// matches a genre filter.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MovieFilter {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl MovieFilter {
    pub fn new(title: Option<&str>, genre: Option<&str>) -> Self {
        Self {
            title: title.map(str::to_owned),
            genre: genre.map(str::to_owned),
        }
        .normalized()
    }

    /// Drops empty fields
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.filter(|t| !t.is_empty()),
            genre: self.genre.filter(|g| !g.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.genre.is_none()
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        if let Some(needle) = self.title.as_deref() {
            if !contains_ignore_case(&movie.title, needle) {
                return false;
            }
        }
        match (self.genre.as_deref(), movie.genre.as_deref()) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(needle), Some(genre)) => contains_ignore_case(genre, needle),
        }
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Title lookup over the loaded movies table
///
/// When the table repeats a `movie_id`, the first row is the one that resolves.
#[derive(Debug, Clone, Default)]
pub struct MovieCatalog {
    titles: HashMap<MovieId, String>,
}

impl MovieCatalog {
    pub fn new(movies: &[Movie]) -> Self {
        let mut titles = HashMap::with_capacity(movies.len());
        for movie in movies {
            titles
                .entry(movie.movie_id)
                .or_insert_with(|| movie.title.clone());
        }
        Self { titles }
    }

    pub fn title(&self, movie_id: MovieId) -> Option<&str> {
        self.titles.get(&movie_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_duplicate_wins() {
        let movies = vec![
            Movie::new(1, "Heat"),
            Movie::new(2, "Ronin"),
            Movie::new(1, "Heat (Director's Cut)"),
        ];

        let catalog = MovieCatalog::new(&movies);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.title(1), Some("Heat"));
        assert_eq!(catalog.title(2), Some("Ronin"));
        assert_eq!(catalog.title(3), None);
    }

    fn with_genre(movie_id: MovieId, title: &str, genre: &str) -> Movie {
        let mut movie = Movie::new(movie_id, title);
        movie.genre = Some(genre.to_string());
        movie
    }

    #[test]
    fn test_filter_matches_substrings_ignoring_case() {
        let heat = with_genre(1, "Heat", "Crime Drama");
        let filter = MovieFilter::new(Some("EA"), Some("crime"));
        assert!(filter.matches(&heat));

        let filter = MovieFilter::new(Some("Ronin"), None);
        assert!(!filter.matches(&heat));
    }

    #[test]
    fn test_genre_filter_skips_movies_without_genre() {
        let filter = MovieFilter::new(None, Some("Drama"));
        assert!(!filter.matches(&Movie::new(1, "Heat")));
    }

    #[test]
    fn test_empty_fields_do_not_filter() {
        let filter = MovieFilter::new(Some(""), Some(""));
        assert!(filter.is_empty());
        assert!(filter.matches(&Movie::new(1, "Heat")));
    }

    #[test]
    fn test_movie_deserializes_without_metadata() {
        let movie: Movie = serde_json::from_str(r#"{"movie_id": 9, "title": "Alien"}"#).unwrap();
        assert_eq!(movie, Movie::new(9, "Alien"));
    }

    #[test]
    fn test_movie_serializes_release_date() {
        let mut movie = Movie::new(1, "Heat");
        movie.release_date = NaiveDate::from_ymd_opt(1995, 12, 15);
        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["release_date"], "1995-12-15");
        assert_eq!(json["genre"], serde_json::Value::Null);
    }
}
