// src/application/error_handling.rs
//
// Error Handling at the application boundary
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides a consistent, serializable error shape for any front end
// - Never exposes storage internals
// - Logs persistence failures for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for a front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for a front end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Movie or category id does not exist
    NotFound,

    /// Input rejected before reaching storage
    Validation,

    /// Storage failed; the write was rolled back
    Database,

    FileSystem,

    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotFound { .. } => Self::not_found_message(error.to_string()),

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "Validation failed".to_string(),
                details: Some(domain_error.to_string()),
            },

            AppError::Database(db_error) => {
                log::error!("Database error: {:?}", db_error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Database operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::MissingGeneratedId(entity) => {
                log::error!("No generated id returned for new {}", entity);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Database operation failed".to_string(),
                    details: Some(format!("The {} was not saved", entity)),
                }
            }

            AppError::Pool(pool_error) => {
                log::error!("Connection pool error: {}", pool_error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Database connection failed".to_string(),
                    details: None,
                }
            }

            AppError::Io(io_error) => {
                log::error!("IO error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::FileSystem,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Other(message) => {
                log::error!("Other error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self::not_found_message(format!("{} not found", resource))
    }

    fn not_found_message(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message,
            details: None,
        }
    }
}
