//! HTTP error mapping
//!
//! Every failure leaves the server as `{ "code", "message" }` JSON. Core
//! validation errors become 400, missing records 404, and anything coming
//! from a storage collaborator 500 with a generic "Failed to fetch ..."
//! message. The underlying error is logged, never echoed.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error body returned to API clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

#[derive(Debug)]
pub enum ApiError {
    // 400
    InvalidInput(String),
    // 404
    UserNotFound(String),
    NotFound(String),
    // 500
    Internal(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::UserNotFound(_) => "USER_NOT_FOUND",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::UserNotFound(_) | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::InvalidInput(m)
            | ApiError::UserNotFound(m)
            | ApiError::NotFound(m)
            | ApiError::Internal(m) => m,
        }
    }

    /// Map a core error raised while serving `what` (e.g. "mood entries").
    pub fn from_core(err: haven_core::Error, what: &str) -> Self {
        use haven_core::Error;

        match err {
            Error::InvalidInput(msg) => ApiError::InvalidInput(msg),
            Error::NotFound { kind: "user", id } => {
                ApiError::UserNotFound(format!("User not found: {}", id))
            }
            Error::NotFound { kind, id } => {
                ApiError::NotFound(format!("{} not found: {}", kind, id))
            }
            other => {
                tracing::error!(
                    error = %other,
                    infrastructure = other.is_infrastructure(),
                    "Failed to fetch {}",
                    what
                );
                ApiError::Internal(format!("Failed to fetch {}", what))
            }
        }
    }

    fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.message().to_string(),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_response())).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
