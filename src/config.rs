//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::compute::LimitPolicy;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Whether results are cached at all
    pub cache_enabled: bool,
    /// Maximum number of entries the result cache can hold
    pub cache_max_entries: usize,
    /// TTL in seconds for cached results
    pub cache_ttl: u64,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
    /// Upper bound on a single cache get/put, milliseconds
    pub cache_timeout_ms: u64,
    /// Whether completed operations are recorded
    pub history_enabled: bool,
    /// Maximum number of records the history retains
    pub history_max_entries: usize,
    /// Upper bound on a single history save or query, milliseconds
    pub history_timeout_ms: u64,
    /// Whether operation events are published
    pub events_enabled: bool,
    /// Topic stamped on every published event
    pub event_topic: String,
    /// Broadcast channel buffer size
    pub event_channel_capacity: usize,
    /// Upper bound on a single publish, milliseconds
    pub emit_timeout_ms: u64,
    /// Upper bound on one arithmetic evaluation, milliseconds
    pub compute_timeout_ms: u64,
    pub max_power_base: u64,
    pub max_power_exponent: u32,
    pub max_factorial_n: u32,
    pub max_fibonacci_n: u32,
    /// Bit-length ceiling for any computed result
    pub max_result_bits: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 8000)
    /// - `CACHE_ENABLED` - Enable result caching (default: true)
    /// - `CACHE_MAX_ENTRIES` - Maximum cache entries (default: 1000)
    /// - `CACHE_TTL` - Result TTL in seconds (default: 3600)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    /// - `CACHE_TIMEOUT_MS` - Cache call timeout (default: 50)
    /// - `HISTORY_ENABLED` - Record completed operations (default: true)
    /// - `HISTORY_MAX_ENTRIES` - Records retained (default: 1000)
    /// - `HISTORY_TIMEOUT_MS` - History call timeout (default: 50)
    /// - `EVENTS_ENABLED` - Enable event publishing (default: true)
    /// - `EVENT_TOPIC` - Event topic (default: "math-operations")
    /// - `EVENT_CHANNEL_CAPACITY` - Broadcast buffer size (default: 1024)
    /// - `EMIT_TIMEOUT_MS` - Publish timeout (default: 250)
    /// - `COMPUTE_TIMEOUT_MS` - Evaluation timeout (default: 5000)
    /// - `MAX_POWER_BASE` / `MAX_POWER_EXPONENT` (default: 1000 / 1000)
    /// - `MAX_FACTORIAL_N` (default: 150)
    /// - `MAX_FIBONACCI_N` (default: 1000)
    /// - `MAX_RESULT_BITS` - Bit-length ceiling (default: 900)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: env_or("SERVER_PORT", defaults.server_port),
            cache_enabled: env_or("CACHE_ENABLED", defaults.cache_enabled),
            cache_max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache_max_entries),
            cache_ttl: env_or("CACHE_TTL", defaults.cache_ttl),
            cleanup_interval: env_or("CLEANUP_INTERVAL", defaults.cleanup_interval),
            cache_timeout_ms: env_or("CACHE_TIMEOUT_MS", defaults.cache_timeout_ms),
            history_enabled: env_or("HISTORY_ENABLED", defaults.history_enabled),
            history_max_entries: env_or("HISTORY_MAX_ENTRIES", defaults.history_max_entries),
            history_timeout_ms: env_or("HISTORY_TIMEOUT_MS", defaults.history_timeout_ms),
            events_enabled: env_or("EVENTS_ENABLED", defaults.events_enabled),
            event_topic: env::var("EVENT_TOPIC").unwrap_or(defaults.event_topic),
            event_channel_capacity: env_or(
                "EVENT_CHANNEL_CAPACITY",
                defaults.event_channel_capacity,
            ),
            emit_timeout_ms: env_or("EMIT_TIMEOUT_MS", defaults.emit_timeout_ms),
            compute_timeout_ms: env_or("COMPUTE_TIMEOUT_MS", defaults.compute_timeout_ms),
            max_power_base: env_or("MAX_POWER_BASE", defaults.max_power_base),
            max_power_exponent: env_or("MAX_POWER_EXPONENT", defaults.max_power_exponent),
            max_factorial_n: env_or("MAX_FACTORIAL_N", defaults.max_factorial_n),
            max_fibonacci_n: env_or("MAX_FIBONACCI_N", defaults.max_fibonacci_n),
            max_result_bits: env_or("MAX_RESULT_BITS", defaults.max_result_bits),
        }
    }

    /// Builds the limit policy described by this configuration.
    pub fn limit_policy(&self) -> LimitPolicy {
        LimitPolicy {
            max_base: self.max_power_base,
            max_exponent: self.max_power_exponent,
            max_factorial_n: self.max_factorial_n,
            max_fibonacci_n: self.max_fibonacci_n,
            max_result_bits: self.max_result_bits,
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn cache_timeout(&self) -> Duration {
        Duration::from_millis(self.cache_timeout_ms)
    }

    pub fn history_timeout(&self) -> Duration {
        Duration::from_millis(self.history_timeout_ms)
    }

    pub fn emit_timeout(&self) -> Duration {
        Duration::from_millis(self.emit_timeout_ms)
    }

    pub fn compute_timeout(&self) -> Duration {
        Duration::from_millis(self.compute_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        let policy = LimitPolicy::default();
        Self {
            server_port: 8000,
            cache_enabled: true,
            cache_max_entries: 1000,
            cache_ttl: 3600,
            cleanup_interval: 60,
            cache_timeout_ms: 50,
            history_enabled: true,
            history_max_entries: 1000,
            history_timeout_ms: 50,
            events_enabled: true,
            event_topic: "math-operations".to_string(),
            event_channel_capacity: 1024,
            emit_timeout_ms: 250,
            compute_timeout_ms: 5000,
            max_power_base: policy.max_base,
            max_power_exponent: policy.max_exponent,
            max_factorial_n: policy.max_factorial_n,
            max_fibonacci_n: policy.max_fibonacci_n,
            max_result_bits: policy.max_result_bits,
        }
    }
}

/// Reads and parses an environment variable, falling back on absence or parse failure.
fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 8000);
        assert!(config.cache_enabled);
        assert_eq!(config.cache_max_entries, 1000);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.event_topic, "math-operations");
        assert!(config.history_enabled);
        assert_eq!(config.history_max_entries, 1000);
        assert_eq!(config.max_factorial_n, 150);
        assert_eq!(config.max_result_bits, 900);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_TTL");
        env::remove_var("MAX_RESULT_BITS");

        let config = Config::from_env();
        assert_eq!(config.server_port, 8000);
        assert_eq!(config.cache_ttl, 3600);
        assert_eq!(config.max_result_bits, 900);
    }

    #[test]
    fn test_env_or_falls_back_on_garbage() {
        env::set_var("MATH_SERVICE_TEST_GARBAGE", "not-a-number");
        assert_eq!(env_or("MATH_SERVICE_TEST_GARBAGE", 42u32), 42);
        env::remove_var("MATH_SERVICE_TEST_GARBAGE");
    }

    #[test]
    fn test_limit_policy_mirrors_config() {
        let config = Config {
            max_power_base: 10,
            max_result_bits: 64,
            ..Config::default()
        };
        let policy = config.limit_policy();
        assert_eq!(policy.max_base, 10);
        assert_eq!(policy.max_result_bits, 64);
    }

    #[test]
    fn test_durations() {
        let config = Config::default();
        assert_eq!(config.cache_ttl(), Duration::from_secs(3600));
        assert_eq!(config.cache_timeout(), Duration::from_millis(50));
        assert_eq!(config.compute_timeout(), Duration::from_millis(5000));
        assert_eq!(config.history_timeout(), Duration::from_millis(50));
    }
}
