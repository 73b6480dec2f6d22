//! Operation value types
//!
//! The immutable request, result and event shapes that flow through the
//! computation service.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Results longer than this many digits are summarized in events.
pub const EVENT_RESULT_MAX_DIGITS: usize = 64;

/// Digits kept on each side of a summarized result.
const SUMMARY_EDGE_DIGITS: usize = 16;

// == Operation Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Power,
    Factorial,
    Fibonacci,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Power,
        OperationKind::Factorial,
        OperationKind::Fibonacci,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Power => "power",
            OperationKind::Factorial => "factorial",
            OperationKind::Fibonacci => "fibonacci",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Operation Request ==
/// A single computation request with its operands.
///
/// Operands are signed so that negative input reaches the limit policy and is
/// rejected there instead of failing deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "lowercase")]
pub enum OperationRequest {
    Power { base: i64, exponent: i64 },
    Factorial { n: i64 },
    Fibonacci { n: i64 },
}

impl OperationRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            OperationRequest::Power { .. } => OperationKind::Power,
            OperationRequest::Factorial { .. } => OperationKind::Factorial,
            OperationRequest::Fibonacci { .. } => OperationKind::Fibonacci,
        }
    }

    /// Deterministic cache key, e.g. `power:4:2` or `factorial:5`.
    ///
    /// Operands are rendered in canonical decimal form in a fixed order, and
    /// the kind prefix keeps keys of different operations disjoint.
    pub fn fingerprint(&self) -> String {
        match self {
            OperationRequest::Power { base, exponent } => {
                format!("{}:{}:{}", self.kind(), base, exponent)
            }
            OperationRequest::Factorial { n } | OperationRequest::Fibonacci { n } => {
                format!("{}:{}", self.kind(), n)
            }
        }
    }

    /// Operands as a JSON object, used in events.
    pub fn parameters(&self) -> Value {
        match self {
            OperationRequest::Power { base, exponent } => {
                json!({ "base": base, "exponent": exponent })
            }
            OperationRequest::Factorial { n } | OperationRequest::Fibonacci { n } => {
                json!({ "n": n })
            }
        }
    }
}

// == Operation Result ==
/// Outcome of a successful computation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationResult {
    pub request: OperationRequest,
    pub value: BigInt,
    /// Time from receipt to result availability, excluding event dispatch
    pub duration: Duration,
    /// True when the value came from the result cache
    pub cached: bool,
    pub timestamp: DateTime<Utc>,
}

impl OperationResult {
    pub fn new(request: OperationRequest, value: BigInt, duration: Duration, cached: bool) -> Self {
        Self {
            request,
            value,
            duration,
            cached,
            timestamp: Utc::now(),
        }
    }

    pub fn kind(&self) -> OperationKind {
        self.request.kind()
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }
}

// == Operation Event ==
/// Read-only projection of an `OperationResult` sent to the event emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationEvent {
    pub event_type: String,
    pub operation: OperationKind,
    pub parameters: Value,
    /// Decimal result, abbreviated when longer than `EVENT_RESULT_MAX_DIGITS`
    pub result: String,
    pub result_bits: u64,
    pub duration_ms: f64,
    pub cached: bool,
    pub timestamp: String,
}

impl From<&OperationResult> for OperationEvent {
    fn from(result: &OperationResult) -> Self {
        Self {
            event_type: "math_operation".to_string(),
            operation: result.kind(),
            parameters: result.request.parameters(),
            result: summarize(&result.value),
            result_bits: result.value.bits(),
            duration_ms: result.duration_ms(),
            cached: result.cached,
            timestamp: result.timestamp.to_rfc3339(),
        }
    }
}

// == Operation Record ==
/// History entry kept for every completed operation.
///
/// Unlike `OperationEvent`, the result is stored in full.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRecord {
    pub operation: OperationKind,
    pub parameters: Value,
    pub result: String,
    pub duration_ms: f64,
    pub cached: bool,
    pub timestamp: DateTime<Utc>,
}

impl From<&OperationResult> for OperationRecord {
    fn from(result: &OperationResult) -> Self {
        Self {
            operation: result.kind(),
            parameters: result.request.parameters(),
            result: result.value.to_string(),
            duration_ms: result.duration_ms(),
            cached: result.cached,
            timestamp: result.timestamp,
        }
    }
}

/// Renders a value in full if short, otherwise as `head...tail (N digits)`.
pub fn summarize(value: &BigInt) -> String {
    let text = value.to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };

    if digits.len() <= EVENT_RESULT_MAX_DIGITS {
        return text;
    }

    format!(
        "{}{}...{} ({} digits)",
        sign,
        &digits[..SUMMARY_EDGE_DIGITS],
        &digits[digits.len() - SUMMARY_EDGE_DIGITS..],
        digits.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprints() {
        let power = OperationRequest::Power { base: 4, exponent: 2 };
        assert_eq!(power.fingerprint(), "power:4:2");

        let factorial = OperationRequest::Factorial { n: 5 };
        assert_eq!(factorial.fingerprint(), "factorial:5");

        let fib = OperationRequest::Fibonacci { n: 5 };
        assert_eq!(fib.fingerprint(), "fibonacci:5");
    }

    #[test]
    fn test_fingerprints_do_not_collide_across_operands() {
        let a = OperationRequest::Power { base: 1, exponent: 23 };
        let b = OperationRequest::Power { base: 12, exponent: 3 };
        let c = OperationRequest::Power { base: -4, exponent: 2 };
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(c.fingerprint(), "power:-4:2");
    }

    #[test]
    fn test_request_deserialize_tagged() {
        let req: OperationRequest =
            serde_json::from_str(r#"{"operation":"power","base":2,"exponent":-1}"#).unwrap();
        assert_eq!(req, OperationRequest::Power { base: 2, exponent: -1 });
        assert_eq!(req.kind(), OperationKind::Power);
    }

    #[test]
    fn test_request_unknown_operation_rejected() {
        let parsed = serde_json::from_str::<OperationRequest>(r#"{"operation":"sqrt","n":4}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_summarize_short_value() {
        assert_eq!(summarize(&BigInt::from(-120)), "-120");
    }

    #[test]
    fn test_summarize_long_value() {
        let value: BigInt = BigInt::from(10u32).pow(99u32);
        let summary = summarize(&value);
        assert!(summary.starts_with("1000000000000000..."));
        assert!(summary.ends_with("(100 digits)"));
    }

    #[test]
    fn test_event_projection() {
        let request = OperationRequest::Factorial { n: 5 };
        let result = OperationResult::new(request, BigInt::from(120), Duration::from_millis(3), true);
        let event = OperationEvent::from(&result);

        assert_eq!(event.event_type, "math_operation");
        assert_eq!(event.operation, OperationKind::Factorial);
        assert_eq!(event.parameters, json!({ "n": 5 }));
        assert_eq!(event.result, "120");
        assert_eq!(event.result_bits, 7);
        assert!(event.cached);
        assert!((event.duration_ms - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_record_keeps_full_result() {
        let value: BigInt = BigInt::from(10u32).pow(99u32);
        let request = OperationRequest::Power { base: 10, exponent: 99 };
        let result = OperationResult::new(request, value, Duration::from_millis(1), false);
        let record = OperationRecord::from(&result);

        assert_eq!(record.operation, OperationKind::Power);
        assert_eq!(record.result.len(), 100);
        assert_eq!(record.parameters, json!({ "base": 10, "exponent": 99 }));
        assert_eq!(record.timestamp, result.timestamp);
    }
}
