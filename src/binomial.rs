use num::bigint::BigUint;
use num::traits::{ToPrimitive, Zero};

/// Binomial coefficient C(a, b) with arbitrary precision
///
/// Returns zero whenever `b` lies outside `[0, a]` (including negative `a`),
/// so callers can pass differences like `n - k - l` without checking them first.
pub fn binomial(a: i64, b: i64) -> BigUint {
    if a < 0 || b < 0 || b > a {
        return BigUint::zero();
    }

    // C(a, b) == C(a, a - b), the smaller one needs fewer multiplications
    let b = core::cmp::min(b, a - b);

    num::integer::binomial(BigUint::from(a as u64), BigUint::from(b as u64))
}

/// Base-2 logarithm of a big integer
///
/// Uses the top 64 bits so values far beyond the `f64` range still give a
/// finite result. Zero maps to negative infinity.
pub fn log2(value: &BigUint) -> f64 {
    if value.is_zero() {
        return f64::NEG_INFINITY;
    }

    let bits = value.bits();
    if bits <= 64 {
        return libm::log2(value.to_u64().map_or(0.0, |v| v as f64));
    }

    let shift = bits - 64;
    let top = (value >> shift as usize).to_u64().map_or(0.0, |v| v as f64);

    shift as f64 + libm::log2(top)
}
