//! API Handlers
//!
//! HTTP request handlers for each math service endpoint.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::error;

use crate::cache::MemoryResultCache;
use crate::compute::LimitPolicy;
use crate::error::{Result, ServiceError};
use crate::events::EventDispatcher;
use crate::history::MemoryOperationRepository;
use crate::models::{
    HealthResponse, HistoryQuery, HistoryResponse, NumberRequest, OperationRequest,
    OperationResponse, PowerRequest, StatsResponse,
};
use crate::service::{ComputationService, ServiceSettings};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ComputationService>,
}

impl AppState {
    pub fn new(service: ComputationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Default limits, an in-memory cache and history of `max_entries` each,
    /// and no events.
    pub fn in_memory(max_entries: usize) -> Self {
        let service = ComputationService::new(
            LimitPolicy::default(),
            Some(Arc::new(MemoryResultCache::new(max_entries))),
            EventDispatcher::disabled(),
            ServiceSettings::default(),
        )
        .with_history(Arc::new(MemoryOperationRepository::new(max_entries)));
        Self::new(service)
    }
}

/// Runs a request on its own task.
///
/// If the client disconnects, axum drops this future but the spawned task
/// keeps going, so a finished evaluation is still cached.
async fn run(state: &AppState, request: OperationRequest) -> Result<Json<OperationResponse>> {
    let service = Arc::clone(&state.service);
    let task = tokio::spawn(async move { service.execute(request).await });

    match task.await {
        Ok(outcome) => outcome.map(|result| Json(OperationResponse::from(result))),
        Err(join_err) => {
            error!(operation = %request.kind(), error = %join_err, "Request task failed");
            Err(ServiceError::ComputationFault(join_err.to_string()))
        }
    }
}

/// Handler for POST /v1/power
pub async fn power_handler(
    State(state): State<AppState>,
    Json(req): Json<PowerRequest>,
) -> Result<Json<OperationResponse>> {
    run(&state, req.into()).await
}

/// Handler for POST /v1/factorial
pub async fn factorial_handler(
    State(state): State<AppState>,
    Json(req): Json<NumberRequest>,
) -> Result<Json<OperationResponse>> {
    run(&state, req.into_factorial()).await
}

/// Handler for POST /v1/fibonacci
pub async fn fibonacci_handler(
    State(state): State<AppState>,
    Json(req): Json<NumberRequest>,
) -> Result<Json<OperationResponse>> {
    run(&state, req.into_fibonacci()).await
}

/// Handler for POST /v1/operations
///
/// Takes the operation kind in the body, e.g. `{"operation":"fibonacci","n":8}`.
pub async fn operation_handler(
    State(state): State<AppState>,
    Json(req): Json<OperationRequest>,
) -> Result<Json<OperationResponse>> {
    run(&state, req).await
}

/// Handler for GET /v1/operations
///
/// Lists recent operations, e.g. `?operation=power&limit=10`.
pub async fn history_handler(
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>> {
    let (operations, total) = state
        .service
        .history(query.operation, query.effective_limit())
        .await?;

    Ok(Json(HistoryResponse {
        operation: query.operation,
        total,
        operations,
    }))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.service.cache_stats().await;
    Json(StatsResponse::new(state.service.stats(), cache))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
