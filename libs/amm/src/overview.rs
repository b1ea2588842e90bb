//! Human-readable pool summaries
//!
//! Display only. Nothing here feeds back into accounting.

use crate::constants::FEE_LABEL;
use crate::ledger::{Pair, PairPhase};
use rust_decimal::Decimal;
use serde::Serialize;
use types::{format_units, to_decimal, AssetMetadata, PairKey, UnitsError, LP_SHARE_DECIMALS};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoolOverview {
    pub key: PairKey,
    pub symbol0: String,
    pub symbol1: String,
    pub reserve0: String,
    pub reserve1: String,
    pub total_shares: String,
    pub fee: &'static str,
    pub phase: PairPhase,
    /// Units of asset1 per asset0
    pub price0: Option<Decimal>,
    /// Units of asset0 per asset1
    pub price1: Option<Decimal>,
}

impl PoolOverview {
    /// Summarise `pair` using metadata for `asset0` and `asset1` respectively
    pub fn new(pair: &Pair, meta0: &AssetMetadata, meta1: &AssetMetadata) -> Result<Self, UnitsError> {
        Ok(Self {
            key: pair.key,
            symbol0: meta0.symbol.clone(),
            symbol1: meta1.symbol.clone(),
            reserve0: meta0.format_amount(pair.reserve0)?,
            reserve1: meta1.format_amount(pair.reserve1)?,
            total_shares: format_units(pair.total_shares, LP_SHARE_DECIMALS)?,
            fee: FEE_LABEL,
            phase: pair.phase(),
            price0: spot_price(pair, meta0, meta1, false),
            price1: spot_price(pair, meta0, meta1, true),
        })
    }
}

/// Decimal-adjusted reserve ratio, `None` on an empty pair or when a reserve exceeds `Decimal`
fn spot_price(pair: &Pair, meta0: &AssetMetadata, meta1: &AssetMetadata, inverse: bool) -> Option<Decimal> {
    let r0 = to_decimal(pair.reserve0, meta0.decimals).ok()?;
    let r1 = to_decimal(pair.reserve1, meta1.decimals).ok()?;
    if inverse {
        r0.checked_div(r1)
    } else {
        r1.checked_div(r0)
    }
}
