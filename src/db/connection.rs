// src/db/connection.rs
//
// Database connection management
//
// PRINCIPLES:
// - Explicit connection pooling
// - No hidden connection creation
// - Clear error propagation
// - Thread-safe access

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

use crate::error::{AppError, AppResult};

/// Type alias for connection pool
pub type ConnectionPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type PooledConn = PooledConnection<SqliteConnectionManager>;

const APP_DIR_NAME: &str = "moviehub";
const DATABASE_FILE_NAME: &str = "moviehub.db";

/// Connection settings for the SQLite database
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database file location
    pub path: PathBuf,

    /// Upper bound on pooled connections
    pub max_connections: u32,

    /// How long SQLite waits on a locked database before failing
    pub busy_timeout_ms: u32,

    /// How long a checkout may wait for a free connection
    pub checkout_timeout: Duration,
}

impl DatabaseConfig {
    /// Settings for a database file at an explicit location
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_connections: 8,
            busy_timeout_ms: 5000,
            checkout_timeout: Duration::from_secs(10),
        }
    }

    /// Settings for the default location under the platform data directory
    pub fn from_data_dir() -> AppResult<Self> {
        Ok(Self::at(get_database_path()?))
    }
}

/// Get the database file path
///
/// Path structure: {APP_DATA}/moviehub/moviehub.db
pub fn get_database_path() -> AppResult<PathBuf> {
    let app_data_dir = dirs::data_dir()
        .ok_or_else(|| AppError::Other("Could not determine app data directory".to_string()))?;

    let moviehub_dir = app_data_dir.join(APP_DIR_NAME);

    std::fs::create_dir_all(&moviehub_dir)?;

    Ok(moviehub_dir.join(DATABASE_FILE_NAME))
}

/// Create a connection pool
///
/// Every connection gets:
/// - Foreign keys enabled
/// - WAL journal
/// - Busy timeout so a locked database errors instead of hanging
pub fn create_connection_pool(config: &DatabaseConfig) -> AppResult<ConnectionPool> {
    if let Some(parent) = config.path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let busy_timeout_ms = config.busy_timeout_ms;
    let manager = SqliteConnectionManager::file(&config.path).with_init(move |conn| {
        conn.execute_batch(&format!(
            "PRAGMA busy_timeout = {};
             PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
            busy_timeout_ms
        ))
    });

    let pool = Pool::builder()
        .max_size(config.max_connections)
        .connection_timeout(config.checkout_timeout)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create connection pool: {}", e)))?;

    log::info!(
        "Opened database {} (max {} connections)",
        display_path(&config.path),
        config.max_connections
    );

    Ok(pool)
}

/// Create a pool over one shared in-memory database
///
/// The pool holds a single connection: every in-memory SQLite connection is
/// its own database, so a larger pool would scatter the data.
pub fn create_memory_pool() -> AppResult<ConnectionPool> {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));

    Pool::builder()
        .max_size(1)
        .max_lifetime(None)
        .idle_timeout(None)
        .build(manager)
        .map_err(|e| AppError::Pool(format!("Failed to create in-memory pool: {}", e)))
}

/// Get a connection from the pool
///
/// This is a convenience wrapper that provides better error messages.
pub fn get_connection(pool: &ConnectionPool) -> AppResult<PooledConn> {
    pool.get()
        .map_err(|e| AppError::Pool(format!("Failed to get database connection: {}", e)))
}

/// Create a standalone connection (for testing)
///
/// This creates an in-memory database, useful for unit tests.
pub fn create_test_connection() -> AppResult<Connection> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(conn)
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
