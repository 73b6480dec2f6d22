//! Limit Policy
//!
//! Validates operands against configured bounds and an estimate of the
//! result's size. Rejections are ordinary values, not panics.

use num_bigint::BigInt;

use super::arithmetic::{factorial, factorial_bits, fibonacci, fibonacci_bits, power, power_bits};
use super::{
    DEFAULT_MAX_BASE, DEFAULT_MAX_EXPONENT, DEFAULT_MAX_FACTORIAL_N, DEFAULT_MAX_FIBONACCI_N,
    DEFAULT_MAX_RESULT_BITS,
};
use crate::error::LimitExceeded;
use crate::models::{OperationKind, OperationRequest};

// == Limit Policy ==
/// Maximum allowed magnitudes for each operation's inputs and output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitPolicy {
    /// Largest allowed |base| for power
    pub max_base: u64,
    pub max_exponent: u32,
    pub max_factorial_n: u32,
    pub max_fibonacci_n: u32,
    /// Results estimated above this many bits are rejected
    pub max_result_bits: u64,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            max_base: DEFAULT_MAX_BASE,
            max_exponent: DEFAULT_MAX_EXPONENT,
            max_factorial_n: DEFAULT_MAX_FACTORIAL_N,
            max_fibonacci_n: DEFAULT_MAX_FIBONACCI_N,
            max_result_bits: DEFAULT_MAX_RESULT_BITS,
        }
    }
}

impl LimitPolicy {
    // == Validate ==
    /// Checks a request against the policy.
    ///
    /// Checks run in order: sign, magnitude bound, result-size ceiling. The
    /// first failure is returned.
    pub fn validate(&self, request: &OperationRequest) -> Result<BoundedOperation, LimitExceeded> {
        match *request {
            OperationRequest::Power { base, exponent } => self.validate_power(base, exponent),
            OperationRequest::Factorial { n } => {
                let n = self.validate_count(OperationKind::Factorial, n, self.max_factorial_n)?;
                self.check_bits(OperationKind::Factorial, "n", factorial_bits(n))?;
                Ok(BoundedOperation(Operands::Factorial { n }))
            }
            OperationRequest::Fibonacci { n } => {
                let n = self.validate_count(OperationKind::Fibonacci, n, self.max_fibonacci_n)?;
                self.check_bits(OperationKind::Fibonacci, "n", fibonacci_bits(n))?;
                Ok(BoundedOperation(Operands::Fibonacci { n }))
            }
        }
    }

    fn validate_power(&self, base: i64, exponent: i64) -> Result<BoundedOperation, LimitExceeded> {
        if exponent < 0 {
            return Err(LimitExceeded::new("exponent", "Exponent must be non-negative"));
        }

        let magnitude = base.unsigned_abs();
        if magnitude > self.max_base {
            return Err(LimitExceeded::new(
                "base",
                format!("Base magnitude must be <= {}", self.max_base),
            ));
        }

        let exponent = u32::try_from(exponent)
            .ok()
            .filter(|e| *e <= self.max_exponent)
            .ok_or_else(|| {
                LimitExceeded::new(
                    "exponent",
                    format!("Exponent must be <= {}", self.max_exponent),
                )
            })?;

        self.check_bits(OperationKind::Power, "exponent", power_bits(magnitude, exponent))?;
        Ok(BoundedOperation(Operands::Power { base, exponent }))
    }

    fn validate_count(&self, kind: OperationKind, n: i64, max: u32) -> Result<u32, LimitExceeded> {
        if n < 0 {
            return Err(LimitExceeded::new("n", "N must be non-negative"));
        }

        u32::try_from(n)
            .ok()
            .filter(|n| *n <= max)
            .ok_or_else(|| LimitExceeded::new("n", format!("N must be <= {} for {}", max, kind)))
    }

    fn check_bits(
        &self,
        kind: OperationKind,
        field: &'static str,
        estimated: f64,
    ) -> Result<(), LimitExceeded> {
        if estimated > self.max_result_bits as f64 {
            return Err(LimitExceeded::new(
                field,
                format!(
                    "Result of {} would need about {:.0} bits, limit is {}",
                    kind, estimated, self.max_result_bits
                ),
            ));
        }
        Ok(())
    }
}

// == Bounded Operation ==
/// An operation whose operands passed the limit policy.
///
/// The operands are private, so `LimitPolicy::validate` is the only way to
/// obtain one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedOperation(Operands);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operands {
    Power { base: i64, exponent: u32 },
    Factorial { n: u32 },
    Fibonacci { n: u32 },
}

impl BoundedOperation {
    pub fn kind(&self) -> OperationKind {
        match self.0 {
            Operands::Power { .. } => OperationKind::Power,
            Operands::Factorial { .. } => OperationKind::Factorial,
            Operands::Fibonacci { .. } => OperationKind::Fibonacci,
        }
    }

    /// `(base, exponent)` for a power operation.
    pub fn power_operands(&self) -> Option<(i64, u32)> {
        match self.0 {
            Operands::Power { base, exponent } => Some((base, exponent)),
            _ => None,
        }
    }

    /// `n` for a factorial or Fibonacci operation.
    pub fn n(&self) -> Option<u32> {
        match self.0 {
            Operands::Factorial { n } | Operands::Fibonacci { n } => Some(n),
            Operands::Power { .. } => None,
        }
    }

    /// Runs the arithmetic core.
    pub fn evaluate(&self) -> BigInt {
        match self.0 {
            Operands::Power { base, exponent } => power(base, exponent),
            Operands::Factorial { n } => factorial(n),
            Operands::Fibonacci { n } => fibonacci(n),
        }
    }
}
