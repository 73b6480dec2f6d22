//! API Module
//!
//! HTTP handlers and routing for the math service REST API.
//!
//! # Endpoints
//! - `POST /v1/power` - Compute base^exponent
//! - `POST /v1/factorial` - Compute n!
//! - `POST /v1/fibonacci` - Compute the nth Fibonacci number
//! - `POST /v1/operations` - Any of the above, kind given in the body
//! - `GET /v1/operations` - Recent operations, `?operation=&limit=`
//! - `GET /stats` - Operation and cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
