//! Events Module
//!
//! Publishes an operation-completed event for each successful computation.
//! Publishing is best-effort: failures are logged and dropped, and the
//! dispatcher never makes a request wait on the emitter.

mod broadcast;
mod dispatcher;
mod emitter;

pub use broadcast::{BroadcastEmitter, EventMessage};
pub use dispatcher::EventDispatcher;
pub use emitter::{EventEmitter, NullEmitter};
