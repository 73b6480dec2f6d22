//! Arithmetic Core
//!
//! Pure arbitrary-precision implementations of the three operations plus the
//! size estimates the limit policy uses. None of these guard their input.

use std::f64::consts::{LOG2_E, PI};

use num_bigint::BigInt;
use num_traits::{One, Zero};

/// log2 of the golden ratio; F(n) grows as phi^n / sqrt(5).
const LOG2_PHI: f64 = 0.694_241_913_630_617_3;

// == Power ==
/// Computes `base^exponent` by repeated squaring.
///
/// `power(0, 0)` is 1. The sign of a negative base survives odd exponents.
pub fn power(base: i64, exponent: u32) -> BigInt {
    let mut result = BigInt::one();
    let mut square = BigInt::from(base);
    let mut remaining = exponent;

    while remaining > 0 {
        if remaining & 1 == 1 {
            result *= &square;
        }
        remaining >>= 1;
        if remaining > 0 {
            square = &square * &square;
        }
    }

    result
}

// == Factorial ==
/// Computes `n!` as an iterative product; `factorial(0)` is 1.
pub fn factorial(n: u32) -> BigInt {
    let mut result = BigInt::one();
    for k in 2..=n {
        result *= k;
    }
    result
}

// == Fibonacci ==
/// Computes the nth Fibonacci number iteratively, with F(0) = 0 and F(1) = 1.
pub fn fibonacci(n: u32) -> BigInt {
    let mut current = BigInt::zero();
    let mut next = BigInt::one();

    for _ in 0..n {
        let sum = &current + &next;
        current = std::mem::replace(&mut next, sum);
    }

    current
}

// == Size Estimates ==
// Each returns log2 of the result's magnitude.

pub fn power_bits(base_magnitude: u64, exponent: u32) -> f64 {
    if base_magnitude <= 1 {
        return 0.0;
    }
    f64::from(exponent) * (base_magnitude as f64).log2()
}

/// Stirling's approximation, `n log2 n - n log2 e + log2(2 pi n) / 2`.
///
/// Constant time for any n. Undershoots the exact sum of logarithms by less
/// than `1 / (12 n ln 2)` bits.
pub fn factorial_bits(n: u32) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let n = f64::from(n);
    n * n.log2() - n * LOG2_E + 0.5 * (2.0 * PI * n).log2()
}

pub fn fibonacci_bits(n: u32) -> f64 {
    f64::from(n) * LOG2_PHI
}
