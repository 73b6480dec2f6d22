//! Event Emitter Port
//!
//! Defines the contract for publishing operation events.

use async_trait::async_trait;

use crate::error::EmitError;
use crate::models::OperationEvent;

/// Publishes operation events to some message channel.
///
/// Implementations report failures; deciding what to do about them is the
/// dispatcher's job.
#[async_trait]
pub trait EventEmitter: Send + Sync {
    async fn publish(&self, event: &OperationEvent) -> Result<(), EmitError>;
}

/// Emitter that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEmitter;

#[async_trait]
impl EventEmitter for NullEmitter {
    async fn publish(&self, _event: &OperationEvent) -> Result<(), EmitError> {
        Ok(())
    }
}
