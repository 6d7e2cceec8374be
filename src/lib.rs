// src/lib.rs
// MovieHub - Local movie catalog with categories, search and cleanup hints
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Explicit: every multi-step write is one SQLite transaction
// - Pure queries: search and staleness never touch storage
// - Local-first: a single SQLite file under the user's data directory
// - Application Layer: wiring and error shaping for a front end

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    validate_category_name,
    validate_movie,
    validate_movie_changes,
    validate_new_movie,
    // Category
    Category,
    DomainError,
    // Movie
    Movie,
    NewMovie,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{
    create_connection_pool,
    create_memory_pool,
    initialize_database,
    ConnectionPool,
    DatabaseConfig,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    CategoryRepository,
    MovieRepository,
    SqliteCategoryRepository,
    SqliteMovieRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    // Catalog Service
    CatalogService,
    CreateMovieRequest,
    UpdateMovieRequest,

    // Query Engine
    filter_by_minimum_rating,
    search,
    MovieFilter,

    // Staleness Evaluator
    find_stale,
    is_stale,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::{AppState, ErrorResponse, ErrorType};
