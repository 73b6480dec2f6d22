//! Error types for the math service
//!
//! Only `ServiceError` ever reaches a caller. Cache and emitter errors are
//! absorbed by the orchestrator and show up in logs only.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Limit Exceeded ==
/// Structured validation failure naming the offending operand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct LimitExceeded {
    /// Operand that violated the policy (`base`, `exponent` or `n`)
    pub field: &'static str,
    /// Human-readable explanation
    pub reason: String,
}

impl LimitExceeded {
    pub fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

// == Cache Error Enum ==
/// Errors raised inside the result cache layer.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Fingerprint not present
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Entry outlived its TTL
    #[error("Key expired: {0}")]
    Expired(String),

    /// Backing store unreachable or failing
    #[error("Cache unavailable: {0}")]
    Unavailable(String),
}

// == Emit Error Enum ==
/// Errors raised while publishing an operation event.
#[derive(Error, Debug)]
pub enum EmitError {
    #[error("Event serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No receiver is attached to the channel
    #[error("Event channel closed")]
    ChannelClosed,

    #[error("Event broker unavailable: {0}")]
    Unavailable(String),
}

// == Repository Error Enum ==
/// Errors raised by the operation history store.
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Backing store unreachable or failing
    #[error("Operation history unavailable: {0}")]
    Unavailable(String),
}

// == Service Error Enum ==
/// Caller-visible failure of a computation request.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Client fault: operands outside the configured limits
    #[error("Validation failed: {0}")]
    Validation(#[from] LimitExceeded),

    /// Server fault: evaluation failed after validation passed
    #[error("Computation fault: {0}")]
    ComputationFault(String),

    /// History queried while no repository is wired or it is failing
    #[error("History unavailable: {0}")]
    HistoryUnavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Validation(err) => {
                let body = ErrorResponse::new(err.reason).with_field(err.field);
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            // Details were logged by the service; never echo them.
            ServiceError::ComputationFault(_) => {
                let body = ErrorResponse::new("Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
            ServiceError::HistoryUnavailable(_) => {
                let body = ErrorResponse::new("Operation history unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
            }
        }
    }
}

// == Result Type Aliases ==
/// Convenience Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result type for history repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
