use thiserror::Error;
use validator::ValidationErrors;

use crate::validation;

/// Application-wide error types for the content module.
#[derive(Error, Debug)]
pub enum AppError {
    /// No content row exists for the requested id.
    #[error("Content not found: {0}")]
    NotFound(String),

    /// Create/update payload failed one or more field rules.
    #[error("{}", validation::summarize(.0))]
    ValidationFailed(ValidationErrors),

    /// Request could not be interpreted at all (bad JSON syntax, wrong content type).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or malformed configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationFailed(errors)
    }
}
