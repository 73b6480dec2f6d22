//! Operation Statistics
//!
//! Lock-free per-operation counters shared by all concurrent requests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::models::OperationKind;

#[derive(Debug, Default)]
struct KindCounters {
    completed: AtomicU64,
    cache_hits: AtomicU64,
    rejected: AtomicU64,
    faults: AtomicU64,
    total_duration_us: AtomicU64,
}

impl KindCounters {
    fn snapshot(&self) -> KindSnapshot {
        let completed = self.completed.load(Ordering::Relaxed);
        let cache_hits = self.cache_hits.load(Ordering::Relaxed);
        let total_us = self.total_duration_us.load(Ordering::Relaxed);

        KindSnapshot {
            completed,
            cache_hits,
            computed: completed.saturating_sub(cache_hits),
            rejected: self.rejected.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
            avg_duration_ms: if completed == 0 {
                0.0
            } else {
                total_us as f64 / completed as f64 / 1000.0
            },
        }
    }
}

// == Operation Stats ==
#[derive(Debug, Default)]
pub struct OperationStats {
    power: KindCounters,
    factorial: KindCounters,
    fibonacci: KindCounters,
}

impl OperationStats {
    pub fn new() -> Self {
        Self::default()
    }

    fn counters(&self, kind: OperationKind) -> &KindCounters {
        match kind {
            OperationKind::Power => &self.power,
            OperationKind::Factorial => &self.factorial,
            OperationKind::Fibonacci => &self.fibonacci,
        }
    }

    pub fn record_completed(&self, kind: OperationKind, duration: Duration, cached: bool) {
        let counters = self.counters(kind);
        counters.completed.fetch_add(1, Ordering::Relaxed);
        if cached {
            counters.cache_hits.fetch_add(1, Ordering::Relaxed);
        }
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
        counters
            .total_duration_us
            .fetch_add(micros, Ordering::Relaxed);
    }

    pub fn record_rejected(&self, kind: OperationKind) {
        self.counters(kind).rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fault(&self, kind: OperationKind) {
        self.counters(kind).faults.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            power: self.power.snapshot(),
            factorial: self.factorial.snapshot(),
            fibonacci: self.fibonacci.snapshot(),
        }
    }
}

// == Snapshots ==
/// Point-in-time view of one operation's counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KindSnapshot {
    pub completed: u64,
    pub cache_hits: u64,
    /// Completed requests that ran the arithmetic core
    pub computed: u64,
    pub rejected: u64,
    pub faults: u64,
    pub avg_duration_ms: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub power: KindSnapshot,
    pub factorial: KindSnapshot,
    pub fibonacci: KindSnapshot,
}

impl StatsSnapshot {
    pub fn kind(&self, kind: OperationKind) -> &KindSnapshot {
        match kind {
            OperationKind::Power => &self.power,
            OperationKind::Factorial => &self.factorial,
            OperationKind::Fibonacci => &self.fibonacci,
        }
    }
}
