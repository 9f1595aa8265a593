//! Custom error types for the commerce service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the commerce service
///
/// Repository-level "not found" stays an `Option`/`bool` result; handlers
/// turn it into `NotFound` at the endpoint boundary.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing or malformed credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Entity absent
    #[error("{0}")]
    NotFound(String),

    /// Request shape is valid JSON but violates a field rule
    #[error("{0}")]
    Validation(String),

    /// Business-rule conflict, e.g. a second shipment for the same order
    #[error("{0}")]
    Conflict(String),

    /// The external authentication service did not verify the user
    #[error("User {0} not found in authentication system")]
    InvalidUser(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            err @ ApiError::InvalidUser(_) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Database error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for commerce API results
pub type ApiResult<T> = Result<T, ApiError>;
