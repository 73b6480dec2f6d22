//! Response DTOs for the math service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use super::{OperationKind, OperationRecord, OperationRequest, OperationResult};
use crate::cache::CacheStats;
use crate::service::StatsSnapshot;

/// Response body for every successful computation
///
/// The request's operands are flattened in so the body echoes them, e.g.
/// `{"operation":"power","base":4,"exponent":2,"result":"16",...}`.
#[derive(Debug, Clone, Serialize)]
pub struct OperationResponse {
    #[serde(flatten)]
    pub request: OperationRequest,
    /// Decimal string so arbitrarily large values survive JSON
    pub result: String,
    pub duration_ms: f64,
    /// True when served from the result cache
    pub cached: bool,
    /// Completion time in RFC 3339 format
    pub timestamp: String,
}

impl From<OperationResult> for OperationResponse {
    fn from(result: OperationResult) -> Self {
        Self {
            request: result.request,
            result: result.value.to_string(),
            duration_ms: result.duration_ms(),
            cached: result.cached,
            timestamp: result.timestamp.to_rfc3339(),
        }
    }
}

/// Cache section of the stats endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub expirations: u64,
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            expirations: stats.expirations,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub operations: StatsSnapshot,
    /// Absent when no cache is wired or the cache cannot report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<CacheStatsResponse>,
}

impl StatsResponse {
    pub fn new(operations: StatsSnapshot, cache: Option<CacheStats>) -> Self {
        Self {
            operations,
            cache: cache.map(CacheStatsResponse::from),
        }
    }
}

/// Response body for GET /v1/operations
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    /// Kind filter applied, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<OperationKind>,
    /// Operations saved so far that match the filter
    pub total: u64,
    /// Most recent matching records, newest first
    pub operations: Vec<OperationRecord>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
    /// Offending operand, present on validation failures only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl ErrorResponse {
    /// Creates a new ErrorResponse
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: &'static str) -> Self {
        self.field = Some(field);
        self
    }
}
