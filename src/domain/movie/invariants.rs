use super::entity::{Movie, NewMovie};
use crate::domain::{DomainError, DomainResult};

/// Ratings live on a 0-10 scale
pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// Validates all Movie invariants
pub fn validate_movie(movie: &Movie) -> DomainResult<()> {
    validate_fields(
        &movie.title,
        &movie.file_link,
        movie.personal_rating,
        movie.imdb_rating,
    )
}

/// Validates a draft before it is inserted
pub fn validate_new_movie(movie: &NewMovie) -> DomainResult<()> {
    validate_fields(
        &movie.title,
        &movie.file_link,
        movie.personal_rating,
        movie.imdb_rating,
    )
}

/// Validates only the fields an edit supplies.
/// Stored values that are left untouched are not re-checked.
pub fn validate_movie_changes(
    title: Option<&str>,
    file_link: Option<&str>,
    personal_rating: Option<f64>,
    imdb_rating: Option<f64>,
) -> DomainResult<()> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    if let Some(file_link) = file_link {
        validate_file_link(file_link)?;
    }
    if let Some(rating) = personal_rating {
        validate_rating("Personal rating", rating)?;
    }
    if let Some(rating) = imdb_rating {
        validate_rating("IMDb rating", rating)?;
    }
    Ok(())
}

fn validate_fields(
    title: &str,
    file_link: &str,
    personal_rating: f64,
    imdb_rating: f64,
) -> DomainResult<()> {
    validate_movie_changes(
        Some(title),
        Some(file_link),
        Some(personal_rating),
        Some(imdb_rating),
    )
}

fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_file_link(file_link: &str) -> DomainResult<()> {
    if file_link.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Movie file link cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_rating(label: &str, rating: f64) -> DomainResult<()> {
    if !rating.is_finite() || !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(DomainError::InvariantViolation(format!(
            "{} must be between {} and {}, got {}",
            label, MIN_RATING, MAX_RATING, rating
        )));
    }
    Ok(())
}

/// Invariants that must hold true for the Movie domain:
///
/// 1. A movie can exist without categories
/// 2. A movie owns its category links; deleting it deletes them
/// 3. Identity is assigned by storage and never changes
/// 4. Title and file link cannot be blank
/// 5. Both ratings are finite and within 0-10
/// 6. last_viewed is a calendar date without time
