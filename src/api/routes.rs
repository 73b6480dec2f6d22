//! API Routes
//!
//! Configures the Axum router with all math service endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    factorial_handler, fibonacci_handler, health_handler, history_handler, operation_handler,
    power_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/v1/power", post(power_handler))
        .route("/v1/factorial", post(factorial_handler))
        .route("/v1/fibonacci", post(fibonacci_handler))
        .route(
            "/v1/operations",
            post(operation_handler).get(history_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
