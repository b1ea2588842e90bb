//! Fixed-point integer math over the ledger's native 256-bit width
//!
//! Every operation is checked. Amounts are smallest-unit integers, so "fixed point" here
//! means exact integer arithmetic with floor division, never floating point.

use crate::error::MathError;
use types::{U256, U512};

type MathResult = std::result::Result<U256, MathError>;

/// `a + b`, failing with `Overflow` past `U256::MAX`
#[inline]
pub fn add(a: U256, b: U256) -> MathResult {
    a.checked_add(b).ok_or(MathError::Overflow)
}

/// `a - b`, failing with `Underflow` when `b > a`
#[inline]
pub fn sub(a: U256, b: U256) -> MathResult {
    a.checked_sub(b).ok_or(MathError::Underflow)
}

/// `a * b`, failing with `Overflow` past `U256::MAX`
#[inline]
pub fn mul(a: U256, b: U256) -> MathResult {
    a.checked_mul(b).ok_or(MathError::Overflow)
}

/// Floor division
#[inline]
pub fn div(a: U256, b: U256) -> MathResult {
    if b.is_zero() {
        return Err(MathError::DivisionByZero);
    }
    Ok(a / b)
}

/// Ceiling division
#[inline]
pub fn div_ceil(a: U256, b: U256) -> MathResult {
    let quotient = div(a, b)?;
    if (a % b).is_zero() {
        Ok(quotient)
    } else {
        add(quotient, U256::one())
    }
}

/// `a * b / c` with the product held in 256 bits
#[inline]
pub fn mul_div(a: U256, b: U256, c: U256) -> MathResult {
    div(mul(a, b)?, c)
}

/// Exact 512-bit product, used where a check must not overflow itself
#[inline]
pub fn mul_wide(a: U256, b: U256) -> U512 {
    a.full_mul(b)
}

/// Largest `r` with `r * r <= n`
///
/// Newton's method seeded at `n / 2`, iterated while the estimate strictly decreases.
/// LP minting depends on this exact floor value.
pub fn isqrt(n: U256) -> U256 {
    if n < U256::from(2u8) {
        return n;
    }

    // x0 <= n / 2 and n / x0 is small on the first step, so the sum cannot overflow
    let mut x0 = n / 2;
    let mut x1 = (x0 + n / x0) / 2;
    while x1 < x0 {
        x0 = x1;
        x1 = (x0 + n / x0) / 2;
    }
    x0
}
