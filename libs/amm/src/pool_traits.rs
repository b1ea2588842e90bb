//! Pool trait definitions for a uniform quoting interface

use crate::constants::FEE_BPS;
use crate::error::Result;
use crate::ledger::Pair;
use crate::swap::SwapEngine;
use types::{AssetId, U256};

/// Read-only quoting surface of a pool
pub trait AmmPool {
    /// Output for selling `amount_in` of `asset_in`
    fn get_amount_out(&self, asset_in: AssetId, amount_in: U256) -> Result<U256>;

    /// Minimal input needed to receive `amount_out` of `asset_out`
    fn get_amount_in(&self, asset_out: AssetId, amount_out: U256) -> Result<U256>;

    /// Current reserves in asset order
    fn get_liquidity(&self) -> (U256, U256);

    fn get_fee_bps(&self) -> u32;
}

impl AmmPool for Pair {
    fn get_amount_out(&self, asset_in: AssetId, amount_in: U256) -> Result<U256> {
        SwapEngine::quote_output(self, asset_in, amount_in)
    }

    fn get_amount_in(&self, asset_out: AssetId, amount_out: U256) -> Result<U256> {
        SwapEngine::quote_input(self, asset_out, amount_out)
    }

    fn get_liquidity(&self) -> (U256, U256) {
        (self.reserve0, self.reserve1)
    }

    fn get_fee_bps(&self) -> u32 {
        FEE_BPS
    }
}
