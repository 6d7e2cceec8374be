pub mod entity;
pub mod invariants;

pub use entity::{Movie, NewMovie};
pub use invariants::{validate_movie, validate_movie_changes, validate_new_movie};
