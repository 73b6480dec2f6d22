//! Background Tasks Module
//!
//! Long-running tasks spawned at startup and aborted on shutdown.
//!
//! # Tasks
//! - TTL Cleanup: Sweeps expired results out of the cache at a fixed interval
//! - Audit Logger: Consumes published operation events and logs them

mod audit;
mod cleanup;

pub use audit::spawn_audit_logger;
pub use cleanup::spawn_cleanup_task;
