//! Audit Logger Task
//!
//! Subscriber side of the broadcast emitter: decodes each published event
//! and writes it to the log under the `audit` target.

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::events::EventMessage;

/// Spawns a task that logs every event received on `receiver`.
///
/// The task ends when the channel closes. Lagging behind the channel
/// capacity drops the oldest events and logs how many were skipped.
pub fn spawn_audit_logger(mut receiver: broadcast::Receiver<EventMessage>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match receiver.recv().await {
                Ok(message) => match message.decode() {
                    Ok(event) => {
                        info!(
                            target: "audit",
                            topic = %message.topic,
                            operation = %event.operation,
                            parameters = %event.parameters,
                            result = %event.result,
                            result_bits = event.result_bits,
                            duration_ms = event.duration_ms,
                            cached = event.cached,
                            timestamp = %event.timestamp,
                            "math_operation"
                        );
                    }
                    Err(err) => {
                        warn!(target: "audit", topic = %message.topic, error = %err, "Undecodable event");
                    }
                },
                Err(RecvError::Lagged(skipped)) => {
                    warn!(target: "audit", skipped, "Audit logger fell behind, events dropped");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}
