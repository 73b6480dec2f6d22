//! Compute Module
//!
//! The limit policy and the arithmetic core. `LimitPolicy::validate` is the
//! only constructor of a `BoundedOperation`, and the service only evaluates
//! through a `BoundedOperation`. The raw functions are exported for tests and
//! perform no guarding of their own.

mod arithmetic;
mod limits;


pub use arithmetic::{factorial, factorial_bits, fibonacci, fibonacci_bits, power, power_bits};
pub use limits::{BoundedOperation, LimitPolicy};

// == Default Limits ==
pub const DEFAULT_MAX_BASE: u64 = 1000;
pub const DEFAULT_MAX_EXPONENT: u32 = 1000;
/// Largest round n whose factorial stays under `DEFAULT_MAX_RESULT_BITS` (log2(150!) ~ 873)
pub const DEFAULT_MAX_FACTORIAL_N: u32 = 150;
pub const DEFAULT_MAX_FIBONACCI_N: u32 = 1000;
/// Bit-length ceiling; 999^100 (~996 bits) is over it
pub const DEFAULT_MAX_RESULT_BITS: u64 = 900;
