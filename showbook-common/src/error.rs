//! Common error types for showbook

use thiserror::Error;

/// Common result type for showbook operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the query and command layers
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or malformed form field
    #[error("Invalid field '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// Lookup by id returned no row
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// Database operation error, including constraint violations on commit
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Field is absent or blank
    pub fn missing(field: &str) -> Self {
        Error::Validation {
            field: field.to_string(),
            reason: "field is required".to_string(),
        }
    }

    /// Field is present but cannot be parsed
    pub fn malformed(field: &str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Error::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}
