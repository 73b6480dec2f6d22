//! Math Service - Bounded arithmetic over HTTP
//!
//! Computes powers, factorials and Fibonacci numbers under configured limits,
//! caches results with TTL expiration, keeps a history of completed operations
//! and publishes audit events without blocking the response path.

pub mod api;
pub mod cache;
pub mod compute;
pub mod config;
pub mod error;
pub mod events;
pub mod history;
pub mod models;
pub mod service;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use service::ComputationService;
pub use tasks::{spawn_audit_logger, spawn_cleanup_task};
