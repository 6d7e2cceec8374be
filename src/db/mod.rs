// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling (the connection provider the stores draw from)
// - Schema bootstrap

pub mod connection;
pub mod migrations;

pub use connection::{
    create_connection_pool, create_memory_pool, get_connection, get_database_path,
    ConnectionPool, DatabaseConfig, PooledConn,
};

pub use migrations::{get_schema_version, initialize_database};
