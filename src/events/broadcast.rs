//! Broadcast Event Emitter
//!
//! In-process message channel built on `tokio::sync::broadcast`. Each event
//! is serialized to JSON and stamped with a topic and a partition key, the
//! shape an external broker would expect.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use super::EventEmitter;
use crate::error::EmitError;
use crate::models::OperationEvent;

/// Default channel capacity
pub const DEFAULT_CAPACITY: usize = 1024;

// == Event Message ==
/// A serialized event as it travels on the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMessage {
    pub topic: String,
    /// Operation kind, used as the partition key
    pub key: String,
    /// JSON-encoded `OperationEvent`
    pub payload: String,
}

impl EventMessage {
    pub fn decode(&self) -> Result<OperationEvent, EmitError> {
        Ok(serde_json::from_str(&self.payload)?)
    }
}

// == Broadcast Emitter ==
/// Emitter fanning events out to every subscriber of a broadcast channel.
///
/// When the buffer is full the oldest messages are dropped for lagging
/// receivers; the publisher never waits.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    topic: String,
    sender: broadcast::Sender<EventMessage>,
}

impl BroadcastEmitter {
    pub fn new(topic: impl Into<String>, capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            topic: topic.into(),
            sender,
        }
    }

    pub fn with_default_capacity(topic: impl Into<String>) -> Self {
        Self::new(topic, DEFAULT_CAPACITY)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<EventMessage> {
        self.sender.subscribe()
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl EventEmitter for BroadcastEmitter {
    async fn publish(&self, event: &OperationEvent) -> Result<(), EmitError> {
        let message = EventMessage {
            topic: self.topic.clone(),
            key: event.operation.to_string(),
            payload: serde_json::to_string(event)?,
        };

        let receivers = self
            .sender
            .send(message)
            .map_err(|_| EmitError::ChannelClosed)?;

        debug!(
            topic = %self.topic,
            operation = %event.operation,
            receivers,
            "Operation event published"
        );
        Ok(())
    }
}
