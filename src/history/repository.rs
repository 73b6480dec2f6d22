//! Operation Repository Port

use async_trait::async_trait;

use crate::error::RepositoryResult;
use crate::models::{OperationKind, OperationRecord};

/// Store of completed operations.
///
/// A `kind` of `None` means all operations.
#[async_trait]
pub trait OperationRepository: Send + Sync {
    async fn save_operation(&self, record: OperationRecord) -> RepositoryResult<()>;

    /// Up to `limit` records, newest first.
    async fn get_operations(
        &self,
        kind: Option<OperationKind>,
        limit: usize,
    ) -> RepositoryResult<Vec<OperationRecord>>;

    /// Number of operations ever saved.
    async fn get_operation_count(&self, kind: Option<OperationKind>) -> RepositoryResult<u64>;
}
