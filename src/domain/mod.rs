// src/domain/mod.rs
//
// Domain Root - entities, invariants and the date rules they share.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod calendar;
pub mod category;
pub mod movie;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Category Domain
pub use category::{validate_category_name, Category};

// Movie Domain
pub use movie::{validate_movie, validate_movie_changes, validate_new_movie, Movie, NewMovie};

// Calendar dates
pub use calendar::{format_calendar_date, normalize_date_input, parse_calendar_date};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;
