// src/services/query.rs
//
// Query Engine - pure filtering over movies already loaded by the store.
//
// RULES:
// - No I/O
// - Never mutates the source slice; results borrow from it in source order
// - Malformed filter input means "filter not applied", never an error

use crate::domain::Movie;

/// Case-insensitive substring match on the title or on the joined category names.
/// A blank query matches every movie.
pub fn search<'a>(movies: &'a [Movie], query: &str) -> Vec<&'a Movie> {
    MovieFilter::new().with_query(query).apply(movies)
}

/// Keep movies whose IMDb rating is at least `threshold`.
/// A blank, unparsable or non-finite threshold disables the filter.
pub fn filter_by_minimum_rating<'a>(movies: &'a [Movie], threshold: &str) -> Vec<&'a Movie> {
    MovieFilter::from_input("", threshold).apply(movies)
}

/// Parse a rating threshold typed by a user; `,` is accepted as the decimal separator.
pub fn parse_rating_threshold(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// The active filters of a movie listing, combined with AND
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieFilter {
    /// Lower-cased, trimmed search text; empty when inactive
    query: String,
    min_imdb_rating: Option<f64>,
}

impl MovieFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from raw text inputs
    pub fn from_input(query: &str, min_imdb_rating: &str) -> Self {
        let filter = Self::new().with_query(query);
        match parse_rating_threshold(min_imdb_rating) {
            Some(threshold) => filter.with_min_imdb_rating(threshold),
            None => filter,
        }
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.query = query.trim().to_lowercase();
        self
    }

    /// Non-finite thresholds are ignored
    pub fn with_min_imdb_rating(mut self, threshold: f64) -> Self {
        self.min_imdb_rating = Some(threshold).filter(|t| t.is_finite());
        self
    }

    pub fn query(&self) -> Option<&str> {
        if self.query.is_empty() {
            None
        } else {
            Some(&self.query)
        }
    }

    pub fn min_imdb_rating(&self) -> Option<f64> {
        self.min_imdb_rating
    }

    pub fn is_active(&self) -> bool {
        self.query().is_some() || self.min_imdb_rating.is_some()
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        self.matches_query(movie) && self.matches_rating(movie)
    }

    pub fn apply<'a>(&self, movies: &'a [Movie]) -> Vec<&'a Movie> {
        movies.iter().filter(|movie| self.matches(movie)).collect()
    }

    fn matches_query(&self, movie: &Movie) -> bool {
        let Some(query) = self.query() else {
            return true;
        };

        movie.title.to_lowercase().contains(query)
            || movie.categories_as_string().to_lowercase().contains(query)
    }

    fn matches_rating(&self, movie: &Movie) -> bool {
        match self.min_imdb_rating {
            Some(threshold) => movie.imdb_rating >= threshold,
            None => true,
        }
    }
}
