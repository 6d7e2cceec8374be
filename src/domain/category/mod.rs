//! Category Invariants:
//!
//! 1. Deleting a category never deletes movies
//! 2. A category can be linked to any number of movies
//! 3. Names are not unique
//! 4. Name cannot be blank

pub mod entity;

pub use entity::Category;

use crate::domain::{DomainError, DomainResult};

/// Validates a category name before it is stored
pub fn validate_category_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Category name cannot be empty".to_string(),
        ));
    }
    Ok(())
}
