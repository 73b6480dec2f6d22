//! Computation Service
//!
//! Runs one request through validate, cache lookup, evaluate-or-reuse, cache
//! store, history save and event dispatch. Cache, history and emitter trouble
//! never reaches the caller: a failing cache reads as a miss, and failing
//! history saves and publishes are only logged.

use std::sync::Arc;
use std::time::{Duration, Instant};

use num_bigint::BigInt;
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use super::{OperationStats, StatsSnapshot};
use crate::cache::{CacheStats, ResultCache};
use crate::compute::{BoundedOperation, LimitPolicy};
use crate::config::Config;
use crate::error::{RepositoryError, Result, ServiceError};
use crate::events::EventDispatcher;
use crate::history::OperationRepository;
use crate::models::{
    OperationEvent, OperationKind, OperationRecord, OperationRequest, OperationResult,
};

// == Service Settings ==
/// Timing knobs for the service's collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Lifetime of a stored result
    pub cache_ttl: Duration,
    /// Bound on a single cache get/put
    pub cache_timeout: Duration,
    /// Bound on one arithmetic evaluation
    pub compute_timeout: Duration,
    /// Bound on a single history save or query
    pub history_timeout: Duration,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(3600),
            cache_timeout: Duration::from_millis(50),
            compute_timeout: Duration::from_secs(5),
            history_timeout: Duration::from_millis(50),
        }
    }
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            cache_ttl: config.cache_ttl(),
            cache_timeout: config.cache_timeout(),
            compute_timeout: config.compute_timeout(),
            history_timeout: config.history_timeout(),
        }
    }
}

// == Computation Service ==
pub struct ComputationService {
    policy: LimitPolicy,
    cache: Option<Arc<dyn ResultCache>>,
    history: Option<Arc<dyn OperationRepository>>,
    events: EventDispatcher,
    settings: ServiceSettings,
    stats: OperationStats,
}

impl ComputationService {
    /// Creates a service around injected collaborators.
    ///
    /// Pass `None` for `cache` to run without caching; use
    /// `EventDispatcher::disabled()` to run without events.
    pub fn new(
        policy: LimitPolicy,
        cache: Option<Arc<dyn ResultCache>>,
        events: EventDispatcher,
        settings: ServiceSettings,
    ) -> Self {
        Self {
            policy,
            cache,
            history: None,
            events,
            settings,
            stats: OperationStats::new(),
        }
    }

    /// Records every completed operation in `repository`.
    pub fn with_history(mut self, repository: Arc<dyn OperationRepository>) -> Self {
        self.history = Some(repository);
        self
    }

    pub fn from_config(
        config: &Config,
        cache: Option<Arc<dyn ResultCache>>,
        events: EventDispatcher,
    ) -> Self {
        Self::new(
            config.limit_policy(),
            cache,
            events,
            ServiceSettings::from(config),
        )
    }

    pub fn policy(&self) -> &LimitPolicy {
        &self.policy
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Cache counters, if a cache is wired and answers in time.
    pub async fn cache_stats(&self) -> Option<CacheStats> {
        let cache = self.cache.as_ref()?;
        timeout(self.settings.cache_timeout, cache.stats())
            .await
            .ok()
            .flatten()
    }

    // == Execute ==
    /// Computes the request, reusing a cached value when one is live.
    ///
    /// Returns `ServiceError::Validation` for out-of-policy operands without
    /// touching the cache, the emitter or the arithmetic core. Returns
    /// `ServiceError::ComputationFault` if evaluation fails after validation.
    pub async fn execute(&self, request: OperationRequest) -> Result<OperationResult> {
        let received = Instant::now();
        let kind = request.kind();

        let operation = match self.policy.validate(&request) {
            Ok(operation) => operation,
            Err(err) => {
                debug!(operation = %kind, field = err.field, reason = %err.reason, "Request rejected");
                self.stats.record_rejected(kind);
                return Err(ServiceError::Validation(err));
            }
        };

        let fingerprint = request.fingerprint();

        let (value, cached) = match self.lookup(&fingerprint).await {
            Some(value) => (value, true),
            None => {
                let value = self.evaluate(operation).await.map_err(|err| {
                    self.stats.record_fault(kind);
                    err
                })?;
                (value, false)
            }
        };

        let duration = received.elapsed();

        if !cached {
            self.store(&fingerprint, &value).await;
        }

        let result = OperationResult::new(request, value, duration, cached);
        self.stats.record_completed(kind, duration, cached);

        info!(
            operation = %kind,
            fingerprint = %fingerprint,
            cached,
            duration_ms = result.duration_ms(),
            "Operation completed"
        );

        self.record(&result).await;
        self.events.dispatch(OperationEvent::from(&result));
        Ok(result)
    }

    // == History ==
    /// Most recent completed operations, newest first, and the total saved.
    ///
    /// Returns `ServiceError::HistoryUnavailable` when no repository is wired
    /// or it fails to answer in time.
    pub async fn history(
        &self,
        kind: Option<OperationKind>,
        limit: usize,
    ) -> Result<(Vec<OperationRecord>, u64)> {
        let repository = self
            .history
            .as_ref()
            .ok_or_else(|| ServiceError::HistoryUnavailable("history is disabled".to_string()))?;

        let query = async {
            let records = repository.get_operations(kind, limit).await?;
            let total = repository.get_operation_count(kind).await?;
            Ok::<_, RepositoryError>((records, total))
        };

        match timeout(self.settings.history_timeout, query).await {
            Ok(Ok(page)) => Ok(page),
            Ok(Err(err)) => {
                warn!(error = %err, "History query failed");
                Err(ServiceError::HistoryUnavailable(err.to_string()))
            }
            Err(_) => {
                warn!("History query timed out");
                Err(ServiceError::HistoryUnavailable("query timed out".to_string()))
            }
        }
    }

    async fn record(&self, result: &OperationResult) {
        let Some(repository) = self.history.as_ref() else {
            return;
        };

        let save = repository.save_operation(OperationRecord::from(result));
        match timeout(self.settings.history_timeout, save).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(operation = %result.kind(), error = %err, "History save failed"),
            Err(_) => warn!(operation = %result.kind(), "History save timed out"),
        }
    }

    // == Cache Lookup ==
    async fn lookup(&self, fingerprint: &str) -> Option<BigInt> {
        let cache = self.cache.as_ref()?;

        let raw = match timeout(self.settings.cache_timeout, cache.get(fingerprint)).await {
            Ok(Ok(raw)) => raw?,
            Ok(Err(err)) => {
                debug!(fingerprint, error = %err, "Cache read failed, treating as miss");
                return None;
            }
            Err(_) => {
                debug!(fingerprint, "Cache read timed out, treating as miss");
                return None;
            }
        };

        match raw.parse::<BigInt>() {
            Ok(value) => Some(value),
            Err(err) => {
                debug!(fingerprint, error = %err, "Cached value unreadable, treating as miss");
                None
            }
        }
    }

    // == Cache Store ==
    async fn store(&self, fingerprint: &str, value: &BigInt) {
        let Some(cache) = self.cache.as_ref() else {
            return;
        };

        let put = cache.put(fingerprint, value.to_string(), self.settings.cache_ttl);
        match timeout(self.settings.cache_timeout, put).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => debug!(fingerprint, error = %err, "Cache write failed"),
            Err(_) => debug!(fingerprint, "Cache write timed out"),
        }
    }

    // == Evaluate ==
    /// Runs the arithmetic core on the blocking pool under the compute timeout.
    async fn evaluate(&self, operation: BoundedOperation) -> Result<BigInt> {
        let kind = operation.kind();
        let task = tokio::task::spawn_blocking(move || operation.evaluate());

        match timeout(self.settings.compute_timeout, task).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(join_err)) => {
                error!(
                    operation = %kind,
                    operands = ?operation,
                    error = %join_err,
                    "Evaluation failed after validation passed; check the configured limits"
                );
                Err(ServiceError::ComputationFault(format!(
                    "{} evaluation failed: {}",
                    kind, join_err
                )))
            }
            Err(_) => {
                error!(
                    operation = %kind,
                    operands = ?operation,
                    timeout_ms = self.settings.compute_timeout.as_millis() as u64,
                    "Evaluation exceeded the compute timeout; check the configured limits"
                );
                Err(ServiceError::ComputationFault(format!(
                    "{} evaluation timed out",
                    kind
                )))
            }
        }
    }
}

impl std::fmt::Debug for ComputationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputationService")
            .field("policy", &self.policy)
            .field("cache", &self.cache.is_some())
            .field("history", &self.history.is_some())
            .field("events", &self.events)
            .field("settings", &self.settings)
            .finish()
    }
}
