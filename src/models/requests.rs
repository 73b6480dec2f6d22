//! Request DTOs for the math service API
//!
//! Defines the structure of incoming HTTP request bodies. JSON shape and
//! integer typing are enforced by deserialization; range checks are left to
//! the limit policy.

use serde::Deserialize;

use super::{OperationKind, OperationRequest};

/// Records returned when the query gives no limit
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
/// Largest limit a single query may ask for
pub const MAX_HISTORY_LIMIT: usize = 1000;

/// Request body for POST /v1/power
///
/// # Fields
/// - `base`: The base, may be negative
/// - `exponent`: The exponent, must be non-negative to pass validation
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PowerRequest {
    pub base: i64,
    pub exponent: i64,
}

impl From<PowerRequest> for OperationRequest {
    fn from(req: PowerRequest) -> Self {
        OperationRequest::Power {
            base: req.base,
            exponent: req.exponent,
        }
    }
}

/// Request body for POST /v1/factorial and POST /v1/fibonacci
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NumberRequest {
    pub n: i64,
}

impl NumberRequest {
    pub fn into_factorial(self) -> OperationRequest {
        OperationRequest::Factorial { n: self.n }
    }

    pub fn into_fibonacci(self) -> OperationRequest {
        OperationRequest::Fibonacci { n: self.n }
    }
}

/// Query string for GET /v1/operations
///
/// # Fields
/// - `operation`: Only return records of this kind
/// - `limit`: Maximum number of records, newest first
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct HistoryQuery {
    pub operation: Option<OperationKind>,
    pub limit: Option<usize>,
}

impl HistoryQuery {
    /// Requested limit, defaulted and capped at `MAX_HISTORY_LIMIT`.
    pub fn effective_limit(&self) -> usize {
        self.limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .min(MAX_HISTORY_LIMIT)
    }
}
