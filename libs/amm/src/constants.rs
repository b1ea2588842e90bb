//! Pool constants

use types::U256;

/// LP shares locked forever on the first deposit
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Fraction of the input that reaches the curve: 997 / 1000 (0.3% fee)
pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1_000;

/// Fee in basis points, for display
pub const FEE_BPS: u32 = 30;

pub const FEE_LABEL: &str = "0.30%";

#[inline]
pub fn minimum_liquidity() -> U256 {
    U256::from(MINIMUM_LIQUIDITY)
}

#[inline]
pub fn fee_numerator() -> U256 {
    U256::from(FEE_NUMERATOR)
}

#[inline]
pub fn fee_denominator() -> U256 {
    U256::from(FEE_DENOMINATOR)
}
