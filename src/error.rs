//! Error types for the reports service
//!
//! Provides unified error handling using thiserror. The cache never fails;
//! these errors come from the upstream API and from request validation.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Reports Error Enum ==
/// Unified error type for the reports service.
#[derive(Error, Debug)]
pub enum ReportsError {
    /// Requested resource does not exist upstream
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream API call failed (transport, status or decoding)
    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ReportsError {
    fn into_response(self) -> Response {
        let status = match &self {
            ReportsError::NotFound(_) => StatusCode::NOT_FOUND,
            ReportsError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ReportsError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ReportsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the reports service.
pub type Result<T> = std::result::Result<T, ReportsError>;
