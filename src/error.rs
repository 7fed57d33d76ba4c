//! Error types for the cache-aside layer
//!
//! Provides unified error handling using thiserror. The cache layer recovers
//! nothing locally; every failure is surfaced unchanged to the immediate
//! caller. In particular a store outage or a malformed cache entry is never
//! coerced into a cache miss.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache-aside layer and its consumers.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Entity not found (repository miss surfaced by a consumer service)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Cache key is empty or exceeds the maximum length
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The underlying byte store cannot be reached
    #[error("Cache store unavailable: {0}")]
    StoreUnavailable(String),

    /// A value could not be encoded for storage
    #[error("Failed to encode cached value: {0}")]
    Encode(String),

    /// Stored bytes do not parse as the requested type.
    /// Distinct from a miss: it usually indicates a codec or version
    /// mismatch the caller should detect and log.
    #[error("Failed to decode cached value: {0}")]
    Decode(String),

    /// The caller-supplied fallback computation failed
    #[error("Fallback computation failed: {0}")]
    Compute(anyhow::Error),

    /// The persistence layer failed outside a cache-aside read
    #[error("Repository error: {0}")]
    Repository(anyhow::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidKey(_) | CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Encode(_)
            | CacheError::Decode(_)
            | CacheError::Compute(_)
            | CacheError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache-aside layer.
pub type Result<T> = std::result::Result<T, CacheError>;
