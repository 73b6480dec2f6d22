//! In-Memory Operation Repository
//!
//! Ring buffer of the most recent records plus lifetime counters per kind.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::OperationRepository;
use crate::error::RepositoryResult;
use crate::models::{OperationKind, OperationRecord};

#[derive(Debug, Default)]
struct HistoryLog {
    /// Oldest at the front
    records: VecDeque<OperationRecord>,
    power: u64,
    factorial: u64,
    fibonacci: u64,
}

impl HistoryLog {
    fn counter(&mut self, kind: OperationKind) -> &mut u64 {
        match kind {
            OperationKind::Power => &mut self.power,
            OperationKind::Factorial => &mut self.factorial,
            OperationKind::Fibonacci => &mut self.fibonacci,
        }
    }

    fn count(&self, kind: Option<OperationKind>) -> u64 {
        match kind {
            Some(OperationKind::Power) => self.power,
            Some(OperationKind::Factorial) => self.factorial,
            Some(OperationKind::Fibonacci) => self.fibonacci,
            None => self.power + self.factorial + self.fibonacci,
        }
    }
}

// == Memory Operation Repository ==
/// `OperationRepository` holding at most `capacity` records.
///
/// The oldest record is dropped once the buffer is full. Counts cover every
/// save since startup, including records no longer retained.
#[derive(Debug)]
pub struct MemoryOperationRepository {
    log: RwLock<HistoryLog>,
    capacity: usize,
}

impl MemoryOperationRepository {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: RwLock::new(HistoryLog::default()),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of records currently retained.
    pub async fn len(&self) -> usize {
        self.log.read().await.records.len()
    }
}

#[async_trait]
impl OperationRepository for MemoryOperationRepository {
    async fn save_operation(&self, record: OperationRecord) -> RepositoryResult<()> {
        let mut log = self.log.write().await;
        *log.counter(record.operation) += 1;

        if self.capacity == 0 {
            return Ok(());
        }
        while log.records.len() >= self.capacity {
            log.records.pop_front();
        }
        log.records.push_back(record);
        Ok(())
    }

    async fn get_operations(
        &self,
        kind: Option<OperationKind>,
        limit: usize,
    ) -> RepositoryResult<Vec<OperationRecord>> {
        let log = self.log.read().await;
        Ok(log
            .records
            .iter()
            .rev()
            .filter(|record| kind.map_or(true, |k| record.operation == k))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_operation_count(&self, kind: Option<OperationKind>) -> RepositoryResult<u64> {
        Ok(self.log.read().await.count(kind))
    }
}
