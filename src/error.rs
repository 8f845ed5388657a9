//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ApiResponse;

// == Cache Error Enum ==
/// Unified error type for the cache and its REST front end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// Empty key supplied to any operation
    #[error("invalid key: cannot be empty")]
    InvalidKey,

    /// Non-positive TTL at construction
    #[error("invalid TTL: must be positive duration")]
    InvalidTtl,

    /// Operation attempted after `close`
    #[error("cache is closed")]
    CacheClosed,

    /// Absent key, for callers that prefer an error over `None`.
    /// The cache itself never returns this.
    #[error("Key '{0}' not found")]
    KeyNotFound(String),

    /// Invalid request data
    #[error("{0}")]
    InvalidRequest(String),

    /// Route exists but not for this HTTP method; carries the allowed one
    #[error("Method not allowed. Use {0}")]
    MethodNotAllowed(&'static str),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// HTTP status used when this error reaches the REST layer.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::InvalidKey | CacheError::InvalidTtl | CacheError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            CacheError::KeyNotFound(_) => StatusCode::NOT_FOUND,
            CacheError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            CacheError::CacheClosed | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ApiResponse::error(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
