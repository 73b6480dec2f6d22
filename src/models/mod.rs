//! Domain values and request/response models for the math service
//!
//! `operation` holds the immutable values the computation service works on;
//! `requests` and `responses` are the DTOs serialized over HTTP.

pub mod operation;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use operation::{
    OperationEvent, OperationKind, OperationRecord, OperationRequest, OperationResult,
};
pub use requests::{HistoryQuery, NumberRequest, PowerRequest};
pub use responses::{
    ErrorResponse, HealthResponse, HistoryResponse, OperationResponse, StatsResponse,
};
