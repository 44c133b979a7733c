//! Error types for haven-core

use thiserror::Error;

/// Main error type for the haven-core library
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// The event log or hobby list could not be reached
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),

    /// A requested record does not exist
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Input rejected at the boundary before reaching the core
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Shorthand for a [`Error::NotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Error::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Whether this error is an infrastructure failure of a storage
    /// collaborator rather than a problem with the request.
    pub fn is_infrastructure(&self) -> bool {
        matches!(
            self,
            Error::Database(_)
                | Error::Io(_)
                | Error::Json(_)
                | Error::CollaboratorUnavailable(_)
        )
    }
}

/// Result type alias for haven-core
pub type Result<T> = std::result::Result<T, Error>;
