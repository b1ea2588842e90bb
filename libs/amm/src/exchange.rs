//! Exchange facade
//!
//! Ties the registry, the engines and a [`Settlement`] together. Each mutating call runs
//! under the target pair's write lock: the engine works on a staged copy of the ledger,
//! settlement is asked to credit shares or pay outputs, and the staged state is committed
//! only if settlement succeeds. On any error the pair is left exactly as it was.

use crate::error::{AmmError, Result, SettlementError};
use crate::ledger::Pair;
use crate::liquidity::{BurnQuote, LiquidityEngine, MintQuote};
use crate::pool_traits::AmmPool;
use crate::registry::PairRegistry;
use crate::settlement::Settlement;
use crate::swap::{SwapEngine, SwapOutcome};
use config::EngineConfig;
use std::sync::Arc;
use tracing::{error, info};
use types::{AccountId, AssetId, PairKey, U256};

pub struct Exchange {
    registry: PairRegistry,
    swaps: SwapEngine,
    settlement: Arc<dyn Settlement>,
}

impl Exchange {
    pub fn new(config: &EngineConfig, settlement: Arc<dyn Settlement>) -> Self {
        Self::with_registry(PairRegistry::new(), config, settlement)
    }

    /// Wrap an existing (for example restored) registry
    pub fn with_registry(registry: PairRegistry, config: &EngineConfig, settlement: Arc<dyn Settlement>) -> Self {
        Self {
            registry,
            swaps: SwapEngine::from_config(config),
            settlement,
        }
    }

    pub fn registry(&self) -> &PairRegistry {
        &self.registry
    }

    pub fn create_pair(&self, asset_a: AssetId, asset_b: AssetId) -> Result<PairKey> {
        self.registry.create_pair(asset_a, asset_b)
    }

    pub fn pair(&self, asset_a: AssetId, asset_b: AssetId) -> Result<Pair> {
        self.registry.get_pair(asset_a, asset_b)
    }

    /// Account a deposit of `amount_a` of `asset_a` and `amount_b` of `asset_b`, crediting shares to `to`
    pub fn add_liquidity(
        &self,
        asset_a: AssetId,
        asset_b: AssetId,
        amount_a: U256,
        amount_b: U256,
        to: AccountId,
    ) -> Result<MintQuote> {
        let handle = self.registry.handle(asset_a, asset_b)?;
        let mut ledger = handle.write();

        let mut staged = ledger.clone();
        let quote = LiquidityEngine::add_liquidity(&mut staged, asset_a, amount_a, amount_b)?;
        let pair = staged.snapshot();

        self.settle(&pair, |s| s.credit_shares(pair.key, to, quote.minted))?;
        *ledger = staged;

        info!(
            pair = %pair.key,
            amount0 = %quote.amount0,
            amount1 = %quote.amount1,
            minted = %quote.minted,
            total_shares = %pair.total_shares,
            "Liquidity added"
        );
        Ok(quote)
    }

    /// Burn `shares` already returned to the pool and pay both assets to `to`
    pub fn remove_liquidity(
        &self,
        asset_a: AssetId,
        asset_b: AssetId,
        shares: U256,
        to: AccountId,
    ) -> Result<BurnQuote> {
        let handle = self.registry.handle(asset_a, asset_b)?;
        let mut ledger = handle.write();

        let mut staged = ledger.clone();
        let quote = LiquidityEngine::remove_liquidity(&mut staged, shares)?;
        let pair = staged.snapshot();

        let payouts: Vec<(AssetId, U256)> = [(pair.asset0, quote.amount0), (pair.asset1, quote.amount1)]
            .into_iter()
            .filter(|(_, amount)| !amount.is_zero())
            .collect();
        self.settle(&pair, |s| s.pay_out(to, &payouts))?;
        *ledger = staged;

        info!(
            pair = %pair.key,
            %shares,
            amount0 = %quote.amount0,
            amount1 = %quote.amount1,
            "Liquidity removed"
        );
        Ok(quote)
    }

    /// Sell `amount_in` of `asset_in` for `asset_out`, paying the output to `to`
    pub fn swap(
        &self,
        asset_in: AssetId,
        asset_out: AssetId,
        amount_in: U256,
        min_amount_out: Option<U256>,
        to: AccountId,
    ) -> Result<SwapOutcome> {
        let handle = self.registry.handle(asset_in, asset_out)?;
        let mut ledger = handle.write();

        let mut staged = ledger.clone();
        let outcome = self.swaps.swap(&mut staged, asset_in, amount_in, min_amount_out)?;
        let pair = staged.snapshot();

        self.settle(&pair, |s| s.pay_out(to, &[(outcome.asset_out, outcome.amount_out)]))?;
        *ledger = staged;

        info!(
            pair = %pair.key,
            %asset_in,
            amount_in = %outcome.amount_in,
            amount_out = %outcome.amount_out,
            "Swap executed"
        );
        Ok(outcome)
    }

    pub fn quote_output(&self, asset_in: AssetId, asset_out: AssetId, amount_in: U256) -> Result<U256> {
        self.registry.get_pair(asset_in, asset_out)?.get_amount_out(asset_in, amount_in)
    }

    pub fn quote_input(&self, asset_in: AssetId, asset_out: AssetId, amount_out: U256) -> Result<U256> {
        self.registry.get_pair(asset_in, asset_out)?.get_amount_in(asset_out, amount_out)
    }

    fn settle<F>(&self, pair: &Pair, op: F) -> Result<()>
    where
        F: FnOnce(&dyn Settlement) -> std::result::Result<(), SettlementError>,
    {
        op(self.settlement.as_ref()).map_err(|e| {
            error!(pair = %pair.key, error = %e, "Settlement failed, pair state unchanged");
            AmmError::from(e)
        })
    }
}
