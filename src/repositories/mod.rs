// src/repositories/mod.rs
//
// Repository layer
//
// CRITICAL RULES:
// - Repositories are DUMB data mappers
// - NO business logic beyond referential consistency of the junction table
// - Multi-step writes are one transaction each
// - Explicit SQL only

pub mod category_repository;
pub mod movie_repository;
pub mod relation;

pub use category_repository::{CategoryRepository, SqliteCategoryRepository};
pub use movie_repository::{MovieRepository, SqliteMovieRepository};

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use movie_repository::MockMovieRepository;
