// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Wires the pool, repositories and services once
// - Provides the boundary between a front end and the services
// - Translates errors into a stable, serializable shape

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType};
pub use state::AppState;
