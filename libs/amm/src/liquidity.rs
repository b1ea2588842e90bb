//! LP share minting and burning
//!
//! Deposits and withdrawals are priced against the pair's current reserves. All divisions
//! floor, so rounding always favours the pool over the depositor or withdrawer.

use crate::constants::minimum_liquidity;
use crate::error::{AmmError, Result};
use crate::ledger::{Pair, ReserveLedger};
use crate::math;
use tracing::debug;
use types::{AssetId, U256};

/// Shares a deposit mints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MintQuote {
    pub amount0: U256,
    pub amount1: U256,
    /// Shares credited to the depositor
    pub minted: U256,
    /// Shares added to supply but owned by no one (first deposit only)
    pub locked: U256,
}

/// Payout a withdrawal yields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BurnQuote {
    pub shares: U256,
    pub amount0: U256,
    pub amount1: U256,
}

/// LP share math over a pair's reserves
pub struct LiquidityEngine;

impl LiquidityEngine {
    /// Shares minted for depositing `(amount0, amount1)`, without touching state
    ///
    /// First deposit mints `isqrt(amount0 * amount1) - MINIMUM_LIQUIDITY` and locks
    /// `MINIMUM_LIQUIDITY`. Later deposits mint the smaller of the two proportional
    /// contributions, so an unbalanced deposit cannot claim more than its weaker side.
    pub fn quote_mint(pair: &Pair, amount0: U256, amount1: U256) -> Result<MintQuote> {
        let (minted, locked) = if pair.total_shares.is_zero() {
            let root = math::isqrt(math::mul(amount0, amount1)?);
            if root <= minimum_liquidity() {
                return Err(AmmError::InsufficientInitialLiquidity {
                    root,
                    minimum: minimum_liquidity(),
                });
            }
            (math::sub(root, minimum_liquidity())?, minimum_liquidity())
        } else {
            let by0 = math::mul_div(amount0, pair.total_shares, pair.reserve0)?;
            let by1 = math::mul_div(amount1, pair.total_shares, pair.reserve1)?;
            (by0.min(by1), U256::zero())
        };

        if minted.is_zero() {
            return Err(AmmError::ZeroLiquidityMinted);
        }

        debug!(
            pair = %pair.key,
            %amount0,
            %amount1,
            %minted,
            %locked,
            "Quoted mint"
        );

        Ok(MintQuote {
            amount0,
            amount1,
            minted,
            locked,
        })
    }

    /// Credit a deposit already in pool custody
    ///
    /// `amount_a` is denominated in `asset_a`, `amount_b` in the pair's other asset.
    pub fn add_liquidity(
        ledger: &mut ReserveLedger,
        asset_a: AssetId,
        amount_a: U256,
        amount_b: U256,
    ) -> Result<MintQuote> {
        let pair = ledger.snapshot();
        let (amount0, amount1) = pair.order_amounts(asset_a, amount_a, amount_b)?;

        let quote = Self::quote_mint(&pair, amount0, amount1)?;
        let supply_increase = math::add(quote.minted, quote.locked)?;
        ledger.apply_deposit(amount0, amount1, supply_increase)?;

        Ok(quote)
    }

    /// Pro-rata payout for burning `shares`, without touching state
    pub fn quote_burn(pair: &Pair, shares: U256) -> Result<BurnQuote> {
        if shares.is_zero() || shares > pair.total_shares {
            return Err(AmmError::InsufficientShares {
                requested: shares,
                total: pair.total_shares,
            });
        }

        let amount0 = math::mul_div(shares, pair.reserve0, pair.total_shares)?;
        let amount1 = math::mul_div(shares, pair.reserve1, pair.total_shares)?;

        if amount0.is_zero() && amount1.is_zero() {
            return Err(AmmError::ZeroOutput);
        }

        debug!(pair = %pair.key, %shares, %amount0, %amount1, "Quoted burn");

        Ok(BurnQuote {
            shares,
            amount0,
            amount1,
        })
    }

    /// Burn shares already in pool custody and debit the payout
    pub fn remove_liquidity(ledger: &mut ReserveLedger, shares: U256) -> Result<BurnQuote> {
        let quote = Self::quote_burn(ledger.pair(), shares)?;
        ledger.apply_withdrawal(quote.shares, quote.amount0, quote.amount1)?;
        Ok(quote)
    }

    /// Amount of the other asset that matches `amount_a` at the current reserve ratio
    pub fn quote_counterpart(pair: &Pair, asset_a: AssetId, amount_a: U256) -> Result<U256> {
        let side_a = pair.side_of(asset_a)?;
        if amount_a.is_zero() {
            return Err(AmmError::ZeroInput);
        }

        let (reserve_a, reserve_b) = pair.oriented_reserves(side_a);
        if reserve_a.is_zero() || reserve_b.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reserve_in: reserve_a,
                reserve_out: reserve_b,
            });
        }

        Ok(math::mul_div(amount_a, reserve_b, reserve_a)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MathError;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn assets() -> (AssetId, AssetId) {
        (AssetId::from_bytes([0x01; 20]), AssetId::from_bytes([0x02; 20]))
    }

    fn seeded(amount0: u64, amount1: u64) -> ReserveLedger {
        let (a0, a1) = assets();
        let mut ledger = ReserveLedger::new(a0, a1);
        LiquidityEngine::add_liquidity(&mut ledger, a0, u(amount0), u(amount1)).unwrap();
        ledger
    }

    #[test]
    fn test_first_mint_locks_minimum_liquidity() {
        let ledger = seeded(1_000_000, 2_000_000);
        let pair = ledger.pair();

        assert_eq!(pair.total_shares, u(1_414_213));
        assert_eq!(pair.reserve0, u(1_000_000));
        assert_eq!(pair.reserve1, u(2_000_000));
    }

    #[test]
    fn test_first_mint_quote() {
        let (a0, a1) = assets();
        let quote = LiquidityEngine::quote_mint(&Pair::new(a0, a1), u(1_000_000), u(2_000_000)).unwrap();

        assert_eq!(quote.minted, u(1_413_213));
        assert_eq!(quote.locked, u(1_000));
    }

    #[test]
    fn test_first_mint_too_small() {
        let (a0, a1) = assets();
        let mut ledger = ReserveLedger::new(a0, a1);

        // isqrt(1000 * 1000) == 1000, not strictly above the minimum
        let err = LiquidityEngine::add_liquidity(&mut ledger, a0, u(1_000), u(1_000)).unwrap_err();
        assert_eq!(
            err,
            AmmError::InsufficientInitialLiquidity {
                root: u(1_000),
                minimum: u(1_000)
            }
        );
        assert!(ledger.pair().total_shares.is_zero());
    }

    #[test]
    fn test_first_mint_one_sided() {
        let (a0, a1) = assets();
        let mut ledger = ReserveLedger::new(a0, a1);

        let err = LiquidityEngine::add_liquidity(&mut ledger, a0, u(5_000_000), U256::zero()).unwrap_err();
        assert!(matches!(err, AmmError::InsufficientInitialLiquidity { .. }));
    }

    #[test]
    fn test_asset_order_mapping() {
        let (a0, a1) = assets();
        let mut ledger = ReserveLedger::new(a0, a1);

        // amounts supplied in asset1-first order
        LiquidityEngine::add_liquidity(&mut ledger, a1, u(2_000_000), u(1_000_000)).unwrap();
        assert_eq!(ledger.pair().reserve0, u(1_000_000));
        assert_eq!(ledger.pair().reserve1, u(2_000_000));
    }

    #[test]
    fn test_subsequent_mint_takes_smaller_side() {
        let mut ledger = seeded(1_000_000, 1_000_000);
        let (a0, _) = assets();
        let supply = ledger.pair().total_shares;

        // 10% of side 0, 20% of side 1: only 10% of supply is minted
        let quote = LiquidityEngine::add_liquidity(&mut ledger, a0, u(100_000), u(200_000)).unwrap();
        assert_eq!(quote.minted, supply / 10);
        assert!(quote.locked.is_zero());
        assert_eq!(ledger.pair().reserve1, u(1_200_000));
    }

    #[test]
    fn test_subsequent_mint_zero() {
        let mut ledger = seeded(1_000_000, 1_000_000);
        let (a0, _) = assets();
        let before = ledger.snapshot();

        let err = LiquidityEngine::add_liquidity(&mut ledger, a0, u(1), U256::zero()).unwrap_err();
        assert_eq!(err, AmmError::ZeroLiquidityMinted);
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_mint_overflow() {
        let (a0, a1) = assets();
        let err = LiquidityEngine::quote_mint(&Pair::new(a0, a1), U256::MAX, u(2)).unwrap_err();
        assert_eq!(err, AmmError::Math(MathError::Overflow));
    }

    #[test]
    fn test_burn_pro_rata() {
        let mut ledger = seeded(500_000, 500_000);
        // provider owns everything except the locked 1000
        let owned = ledger.pair().total_shares - u(1_000);

        let quote = LiquidityEngine::remove_liquidity(&mut ledger, owned).unwrap();
        let expected = u(500_000) - u(500_000) * u(1_000) / u(500_000);
        assert_eq!(quote.amount0, expected);
        assert_eq!(quote.amount1, expected);
        assert_eq!(ledger.pair().total_shares, u(1_000));
        assert_eq!(ledger.pair().reserve0, u(1_000));
    }

    #[test]
    fn test_burn_rejects_zero_and_excess() {
        let mut ledger = seeded(500_000, 500_000);
        let total = ledger.pair().total_shares;

        assert!(matches!(
            LiquidityEngine::remove_liquidity(&mut ledger, U256::zero()),
            Err(AmmError::InsufficientShares { .. })
        ));
        assert_eq!(
            LiquidityEngine::remove_liquidity(&mut ledger, total + 1),
            Err(AmmError::InsufficientShares {
                requested: total + 1,
                total
            })
        );
    }

    #[test]
    fn test_burn_dust_is_zero_output() {
        // reserves far smaller than supply so one share floors to nothing
        let (a0, a1) = assets();
        let mut pair = Pair::new(a0, a1);
        pair.reserve0 = u(10);
        pair.reserve1 = u(10);
        pair.total_shares = u(1_000_000);

        assert_eq!(LiquidityEngine::quote_burn(&pair, u(1)), Err(AmmError::ZeroOutput));
    }

    #[test]
    fn test_burn_all_drains() {
        let mut ledger = seeded(500_000, 500_000);
        let total = ledger.pair().total_shares;

        let quote = LiquidityEngine::remove_liquidity(&mut ledger, total).unwrap();
        assert_eq!(quote.amount0, u(500_000));
        assert!(ledger.pair().reserve0.is_zero());
        assert!(ledger.pair().total_shares.is_zero());
    }

    #[test]
    fn test_quote_counterpart() {
        let ledger = seeded(1_000_000, 2_000_000);
        let (a0, a1) = assets();

        assert_eq!(LiquidityEngine::quote_counterpart(ledger.pair(), a0, u(1_000)).unwrap(), u(2_000));
        assert_eq!(LiquidityEngine::quote_counterpart(ledger.pair(), a1, u(1_001)).unwrap(), u(500));
        assert_eq!(
            LiquidityEngine::quote_counterpart(ledger.pair(), a0, U256::zero()),
            Err(AmmError::ZeroInput)
        );
    }

    #[test]
    fn test_quote_counterpart_empty_pair() {
        let (a0, a1) = assets();
        assert!(matches!(
            LiquidityEngine::quote_counterpart(&Pair::new(a0, a1), a0, u(1)),
            Err(AmmError::InsufficientLiquidity { .. })
        ));
    }
}
