//! Display-Unit Conversion
//!
//! Converts between smallest-unit integers and human decimal strings.
//!
//! ## Critical Rules
//!
//! 1. **NO FLOATING POINT**: amounts never pass through f32/f64
//! 2. **Preserve Native Precision**: USDC stays 6 decimals, WETH stays 18
//! 3. **Display Only**: nothing in this module feeds back into reserve accounting
//!
//! ```rust
//! use types::precision::{format_units, parse_units};
//!
//! let raw = parse_units("1.5", 6).unwrap();
//! assert_eq!(raw, 1_500_000u64.into());
//! assert_eq!(format_units(raw, 6).unwrap(), "1.500000");
//! ```

use crate::errors::UnitsError;
use ethers_core::types::U256;
use ethers_core::utils;
use rust_decimal::Decimal;
use std::str::FromStr;

/// LP shares are displayed with 18 decimals
pub const LP_SHARE_DECIMALS: u8 = 18;

/// Largest decimal count unit conversion accepts
const MAX_DECIMALS: u8 = 77;

fn check_decimals(decimals: u8) -> Result<u32, UnitsError> {
    if decimals > MAX_DECIMALS {
        return Err(UnitsError::UnsupportedDecimals { decimals });
    }
    Ok(u32::from(decimals))
}

/// Format a smallest-unit amount with `decimals` fractional digits
pub fn format_units(amount: U256, decimals: u8) -> Result<String, UnitsError> {
    let units = check_decimals(decimals)?;
    utils::format_units(amount, units).map_err(|e| UnitsError::InvalidAmount {
        input: amount.to_string(),
        decimals,
        reason: e.to_string(),
    })
}

/// Parse a human decimal string into smallest units
pub fn parse_units(input: &str, decimals: u8) -> Result<U256, UnitsError> {
    let trimmed = input.trim();
    if trimmed.starts_with('-') {
        return Err(UnitsError::Negative {
            input: input.to_string(),
        });
    }

    let units = check_decimals(decimals)?;
    let parsed = utils::parse_units(trimmed, units).map_err(|e| UnitsError::InvalidAmount {
        input: input.to_string(),
        decimals,
        reason: e.to_string(),
    })?;
    Ok(parsed.into())
}

/// Convert a smallest-unit amount into a `Decimal` for ratios and display
///
/// Fails when the integer part exceeds what `Decimal` can hold.
pub fn to_decimal(amount: U256, decimals: u8) -> Result<Decimal, UnitsError> {
    let formatted = format_units(amount, decimals)?;
    Decimal::from_str(&formatted).map_err(|_| UnitsError::OutOfRange { value: formatted })
}
