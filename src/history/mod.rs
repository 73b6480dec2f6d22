//! History Module
//!
//! Keeps a record of every completed operation for later inspection. Saving
//! is best-effort: the computation service logs repository failures and
//! carries on.

mod memory;
mod repository;

pub use memory::MemoryOperationRepository;
pub use repository::OperationRepository;
