// src/services/mod.rs
//
// Services Module - Orchestration Layer
//
// `query` and `staleness` are pure functions over loaded movies;
// `catalog_service` orchestrates them with the repositories.

pub mod catalog_service;
pub mod query;
pub mod staleness;


// Re-export all services and their types
pub use catalog_service::{
    CatalogService,
    CreateMovieRequest,
    UpdateMovieRequest,
};

pub use query::{
    filter_by_minimum_rating,
    parse_rating_threshold,
    search,
    MovieFilter,
};

pub use staleness::{
    find_stale,
    is_stale,
    stale_cutoff,
    STALE_AFTER_YEARS,
    STALE_RATING_THRESHOLD,
};
