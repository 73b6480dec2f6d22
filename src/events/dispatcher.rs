//! Event Dispatcher
//!
//! Fire-and-forget wrapper around an optional emitter.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::warn;

use super::EventEmitter;
use crate::models::OperationEvent;

/// Default bound on a single publish
pub const DEFAULT_EMIT_TIMEOUT: Duration = Duration::from_millis(250);

// == Event Dispatcher ==
/// Hands events to the emitter on a detached task.
///
/// With no emitter wired, dispatch is a no-op. Publish errors and timeouts
/// are logged at warn level and dropped; nothing is retried.
#[derive(Clone)]
pub struct EventDispatcher {
    emitter: Option<Arc<dyn EventEmitter>>,
    timeout: Duration,
}

impl EventDispatcher {
    pub fn new(emitter: Arc<dyn EventEmitter>, timeout: Duration) -> Self {
        Self {
            emitter: Some(emitter),
            timeout,
        }
    }

    /// Dispatcher that drops every event.
    pub fn disabled() -> Self {
        Self {
            emitter: None,
            timeout: DEFAULT_EMIT_TIMEOUT,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.emitter.is_some()
    }

    // == Dispatch ==
    /// Spawns the publish and returns immediately.
    ///
    /// The handle is only useful to tests that want to wait for delivery;
    /// request handling drops it.
    pub fn dispatch(&self, event: OperationEvent) -> Option<JoinHandle<()>> {
        let emitter = self.emitter.clone()?;
        let timeout = self.timeout;

        Some(tokio::spawn(async move {
            match tokio::time::timeout(timeout, emitter.publish(&event)).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(
                        operation = %event.operation,
                        error = %err,
                        "Failed to publish operation event"
                    );
                }
                Err(_) => {
                    warn!(
                        operation = %event.operation,
                        timeout_ms = timeout.as_millis() as u64,
                        "Operation event publish timed out"
                    );
                }
            }
        }))
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("enabled", &self.is_enabled())
            .field("timeout", &self.timeout)
            .finish()
    }
}
