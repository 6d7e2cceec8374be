// src/application/state.rs

use std::sync::Arc;

use crate::db::{
    create_connection_pool, create_memory_pool, get_connection, initialize_database,
    ConnectionPool, DatabaseConfig,
};
use crate::error::AppResult;
use crate::repositories::{
    CategoryRepository, MovieRepository, SqliteCategoryRepository, SqliteMovieRepository,
};
use crate::services::CatalogService;

/// Everything a front end needs, wired once at startup.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub movie_repository: Arc<dyn MovieRepository>,
    pub category_repository: Arc<dyn CategoryRepository>,
    pub catalog_service: Arc<CatalogService>,
}

impl AppState {
    /// Initialize the schema (idempotent) and wire repositories and services
    pub fn bootstrap(pool: Arc<ConnectionPool>) -> AppResult<Self> {
        {
            let conn = get_connection(&pool)?;
            initialize_database(&conn)?;
        }

        let movie_repository: Arc<dyn MovieRepository> =
            Arc::new(SqliteMovieRepository::new(pool.clone()));
        let category_repository: Arc<dyn CategoryRepository> =
            Arc::new(SqliteCategoryRepository::new(pool.clone()));

        let catalog_service = Arc::new(CatalogService::new(
            movie_repository.clone(),
            category_repository.clone(),
        ));

        Ok(Self {
            pool,
            movie_repository,
            category_repository,
            catalog_service,
        })
    }

    pub fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        Self::bootstrap(Arc::new(create_connection_pool(config)?))
    }

    /// Database under the platform data directory
    pub fn open_default() -> AppResult<Self> {
        Self::from_config(&DatabaseConfig::from_data_dir()?)
    }

    /// Throwaway catalog, gone when the state is dropped
    pub fn in_memory() -> AppResult<Self> {
        Self::bootstrap(Arc::new(create_memory_pool()?))
    }
}
