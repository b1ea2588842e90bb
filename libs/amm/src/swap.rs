//! Constant-product swap math with exact integer calculations
//!
//! The 0.3% fee is taken off the input before it reaches the curve:
//!
//! ```text
//! amount_in_with_fee = amount_in * 997 / 1000
//! amount_out         = amount_in_with_fee * reserve_out / (reserve_in + amount_in_with_fee)
//! ```
//!
//! which is the floor solution of
//! `(reserve_in + amount_in_with_fee) * (reserve_out - amount_out) = reserve_in * reserve_out`.

use crate::constants::{fee_denominator, fee_numerator, FEE_DENOMINATOR, FEE_NUMERATOR};
use crate::error::{AmmError, MathError, Result};
use crate::ledger::{Pair, ReserveLedger, Side};
use crate::math;
use tracing::{debug, warn};
use types::{AssetId, U256, U512};

/// Result of an executed swap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapOutcome {
    pub asset_in: AssetId,
    pub asset_out: AssetId,
    pub amount_in: U256,
    pub amount_out: U256,
}

/// Swap quoting and execution
#[derive(Debug, Clone, Copy)]
pub struct SwapEngine {
    invariant_checks: bool,
}

impl Default for SwapEngine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl SwapEngine {
    pub fn new(invariant_checks: bool) -> Self {
        Self { invariant_checks }
    }

    pub fn from_config(config: &config::EngineConfig) -> Self {
        Self::new(config.invariant_checks)
    }

    pub fn invariant_checks(&self) -> bool {
        self.invariant_checks
    }

    /// Exact output for selling `amount_in` of `asset_in` into `pair`
    pub fn quote_output(pair: &Pair, asset_in: AssetId, amount_in: U256) -> Result<U256> {
        let side_in = pair.side_of(asset_in)?;
        if amount_in.is_zero() {
            return Err(AmmError::ZeroInput);
        }

        let (reserve_in, reserve_out) = pair.oriented_reserves(side_in);
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(AmmError::InsufficientLiquidity {
                reserve_in,
                reserve_out,
            });
        }

        let amount_in_with_fee = math::mul_div(amount_in, fee_numerator(), fee_denominator())?;
        let amount_out = math::mul_div(
            amount_in_with_fee,
            reserve_out,
            math::add(reserve_in, amount_in_with_fee)?,
        )?;

        if amount_out.is_zero() {
            return Err(AmmError::ZeroOutput);
        }

        debug!(
            pair = %pair.key,
            %asset_in,
            %amount_in,
            %amount_out,
            "Quoted output"
        );
        Ok(amount_out)
    }

    /// Smallest input of the other asset whose quoted output is at least `amount_out` of `asset_out`
    pub fn quote_input(pair: &Pair, asset_out: AssetId, amount_out: U256) -> Result<U256> {
        let side_out = pair.side_of(asset_out)?;
        if amount_out.is_zero() {
            return Err(AmmError::ZeroOutput);
        }

        let (reserve_in, reserve_out) = pair.oriented_reserves(side_out.opposite());
        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
            return Err(AmmError::InsufficientLiquidity {
                reserve_in,
                reserve_out,
            });
        }

        // smallest post-fee input that reaches amount_out on the curve
        let with_fee = math::div_ceil(
            math::mul(amount_out, reserve_in)?,
            math::sub(reserve_out, amount_out)?,
        )?;
        // smallest gross input whose floored fee-adjusted value reaches with_fee
        let amount_in = math::div_ceil(math::mul(with_fee, fee_denominator())?, fee_numerator())?;

        debug!(
            pair = %pair.key,
            %asset_out,
            %amount_out,
            %amount_in,
            "Quoted input"
        );
        Ok(amount_in)
    }

    /// Execute a swap whose input is already in pool custody
    ///
    /// `min_amount_out` is an optional slippage floor; `None` applies no guard.
    pub fn swap(
        &self,
        ledger: &mut ReserveLedger,
        asset_in: AssetId,
        amount_in: U256,
        min_amount_out: Option<U256>,
    ) -> Result<SwapOutcome> {
        let before = ledger.snapshot();
        let side_in = before.side_of(asset_in)?;
        let amount_out = Self::quote_output(&before, asset_in, amount_in)?;

        if let Some(min_amount_out) = min_amount_out {
            if amount_out < min_amount_out {
                warn!(
                    pair = %before.key,
                    %amount_out,
                    %min_amount_out,
                    "Swap rejected by slippage guard"
                );
                return Err(AmmError::SlippageExceeded {
                    amount_out,
                    min_amount_out,
                });
            }
        }

        let mut staged = ledger.clone();
        staged.apply_swap(side_in, amount_in, amount_out)?;

        if self.invariant_checks {
            if let Err(e) = Self::check_invariant(&before, side_in, amount_in, staged.pair()) {
                warn!(pair = %before.key, error = %e, "Swap post-condition failed");
                return Err(e);
            }
        }

        *ledger = staged;

        Ok(SwapOutcome {
            asset_in,
            asset_out: before.asset(side_in.opposite()),
            amount_in,
            amount_out,
        })
    }

    /// Fee-adjusted constant-product post-condition
    ///
    /// `(new_in * 1000 - amount_in * 3) * new_out >= reserve_in * reserve_out * 1000`,
    /// evaluated in 512 bits.
    pub fn check_invariant(before: &Pair, side_in: Side, amount_in: U256, after: &Pair) -> Result<()> {
        let (reserve_in, reserve_out) = before.oriented_reserves(side_in);
        let (new_in, new_out) = after.oriented_reserves(side_in);

        let denominator = U512::from(FEE_DENOMINATOR);
        let fee_portion = U512::from(FEE_DENOMINATOR - FEE_NUMERATOR);

        let adjusted_in = (U512::from(new_in) * denominator)
            .checked_sub(U512::from(amount_in) * fee_portion)
            .ok_or(MathError::Underflow)?;
        let lhs = adjusted_in
            .checked_mul(U512::from(new_out))
            .ok_or(MathError::Overflow)?;
        let rhs = math::mul_wide(reserve_in, reserve_out)
            .checked_mul(denominator)
            .ok_or(MathError::Overflow)?;

        if lhs < rhs {
            return Err(AmmError::InvariantViolation {
                reason: format!(
                    "pair {} fee-adjusted product regressed: reserves ({}, {}) -> ({}, {})",
                    before.key, reserve_in, reserve_out, new_in, new_out
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn assets() -> (AssetId, AssetId) {
        (AssetId::from_bytes([0x0a; 20]), AssetId::from_bytes([0x0b; 20]))
    }

    fn pair_with(reserve0: u64, reserve1: u64) -> Pair {
        let (a0, a1) = assets();
        let mut pair = Pair::new(a0, a1);
        pair.reserve0 = u(reserve0);
        pair.reserve1 = u(reserve1);
        pair.total_shares = if reserve0 == 0 && reserve1 == 0 { U256::zero() } else { u(1_000) };
        pair
    }

    fn ledger_with(reserve0: u64, reserve1: u64) -> ReserveLedger {
        ReserveLedger::restore(pair_with(reserve0, reserve1)).unwrap()
    }

    #[test]
    fn test_fee_math_concrete_case() {
        let (a0, _) = assets();
        let out = SwapEngine::quote_output(&pair_with(100_000, 100_000), a0, u(1_000)).unwrap();
        assert_eq!(out, u(987));
    }

    #[test]
    fn test_quote_rejects_unknown_asset_first() {
        let stranger = AssetId::from_bytes([0xee; 20]);
        // zero input and empty reserves would also fail; the asset check comes first
        assert!(matches!(
            SwapEngine::quote_output(&pair_with(0, 0), stranger, U256::zero()),
            Err(AmmError::UnknownAsset { .. })
        ));
    }

    #[test]
    fn test_quote_zero_input() {
        let (a0, _) = assets();
        assert_eq!(
            SwapEngine::quote_output(&pair_with(100, 100), a0, U256::zero()),
            Err(AmmError::ZeroInput)
        );
    }

    #[test]
    fn test_quote_zero_liquidity() {
        let (a0, a1) = assets();
        let empty = pair_with(0, 0);
        for amount in [1u64, 1_000, u64::MAX] {
            assert!(matches!(
                SwapEngine::quote_output(&empty, a0, u(amount)),
                Err(AmmError::InsufficientLiquidity { .. })
            ));
            assert!(matches!(
                SwapEngine::quote_output(&empty, a1, u(amount)),
                Err(AmmError::InsufficientLiquidity { .. })
            ));
        }
    }

    #[test]
    fn test_quote_dust_input_is_zero_output() {
        let (a0, _) = assets();
        // 1 * 997 / 1000 floors to zero before reaching the curve
        assert_eq!(
            SwapEngine::quote_output(&pair_with(100_000, 100_000), a0, u(1)),
            Err(AmmError::ZeroOutput)
        );
    }

    #[test]
    fn test_swap_updates_reserves() {
        let (a0, a1) = assets();
        let mut ledger = ledger_with(100_000, 100_000);

        let outcome = SwapEngine::default()
            .swap(&mut ledger, a0, u(1_000), None)
            .unwrap();

        assert_eq!(outcome.amount_out, u(987));
        assert_eq!(outcome.asset_out, a1);
        assert_eq!(ledger.pair().reserve0, u(101_000));
        assert_eq!(ledger.pair().reserve1, u(99_013));
    }

    #[test]
    fn test_swap_reverse_direction() {
        let (a0, a1) = assets();
        let mut ledger = ledger_with(100_000, 100_000);

        let outcome = SwapEngine::default()
            .swap(&mut ledger, a1, u(1_000), Some(u(987)))
            .unwrap();

        assert_eq!(outcome.asset_out, a0);
        assert_eq!(ledger.pair().reserve0, u(99_013));
        assert_eq!(ledger.pair().reserve1, u(101_000));
    }

    #[test]
    fn test_slippage_rejection_leaves_state() {
        let (a0, _) = assets();
        let mut ledger = ledger_with(100_000, 100_000);
        let before = ledger.snapshot();

        let err = SwapEngine::default()
            .swap(&mut ledger, a0, u(1_000), Some(u(988)))
            .unwrap_err();

        assert_eq!(
            err,
            AmmError::SlippageExceeded {
                amount_out: u(987),
                min_amount_out: u(988)
            }
        );
        assert_eq!(ledger.snapshot(), before);
    }

    #[test]
    fn test_invariant_check_detects_regression() {
        let before = pair_with(100_000, 100_000);

        // output one unit larger than the curve allows for a fee-less trade
        let mut tampered = before;
        tampered.reserve0 = u(101_000);
        tampered.reserve1 = u(100_000 - 1_000);
        assert!(matches!(
            SwapEngine::check_invariant(&before, Side::Zero, u(1_000), &tampered),
            Err(AmmError::InvariantViolation { .. })
        ));

        let mut honest = before;
        honest.reserve0 = u(101_000);
        honest.reserve1 = u(99_013);
        assert!(SwapEngine::check_invariant(&before, Side::Zero, u(1_000), &honest).is_ok());
    }

    #[test]
    fn test_invariant_check_past_256_bits() {
        let (a0, a1) = assets();
        let mut pair = Pair::new(a0, a1);
        pair.reserve0 = U256::one() << 127;
        pair.reserve1 = U256::one() << 127;
        pair.total_shares = U256::one() << 127;
        let mut ledger = ReserveLedger::restore(pair).unwrap();

        // reserve product times 1000 exceeds 256 bits; the check still succeeds
        let outcome = SwapEngine::default()
            .swap(&mut ledger, a0, U256::one() << 120, None)
            .unwrap();
        assert!(!outcome.amount_out.is_zero());
        assert!(ledger.pair().reserve0 > pair.reserve0);
    }

    #[test]
    fn test_quote_input_inverse() {
        let (a0, a1) = assets();
        let pair = pair_with(100_000, 250_000);

        for target in [1u64, 10, 987, 5_000, 100_000] {
            let needed = SwapEngine::quote_input(&pair, a1, u(target)).unwrap();
            let got = SwapEngine::quote_output(&pair, a0, needed).unwrap();
            assert!(got >= u(target), "input {} yields {} < {}", needed, got, target);

            if needed > U256::one() {
                let short = SwapEngine::quote_output(&pair, a0, needed - 1).unwrap_or_default();
                assert!(short < u(target), "input {} is not minimal for {}", needed, target);
            }
        }
    }

    #[test]
    fn test_quote_input_exceeding_reserve() {
        let (_, a1) = assets();
        let pair = pair_with(100_000, 100_000);

        assert!(matches!(
            SwapEngine::quote_input(&pair, a1, u(100_000)),
            Err(AmmError::InsufficientLiquidity { .. })
        ));
        assert_eq!(SwapEngine::quote_input(&pair, a1, U256::zero()), Err(AmmError::ZeroOutput));
    }

    #[test]
    fn test_checks_can_be_disabled() {
        let (a0, _) = assets();
        let config = config::EngineConfig::from_toml_str("invariant_checks = false").unwrap();
        let engine = SwapEngine::from_config(&config);
        assert!(!engine.invariant_checks());
        assert!(SwapEngine::default().invariant_checks());

        let mut unchecked = ledger_with(100_000, 100_000);
        let mut checked = unchecked.clone();
        let outcome = engine.swap(&mut unchecked, a0, u(1_000), None).unwrap();

        assert_eq!(outcome.amount_out, u(987));
        SwapEngine::default().swap(&mut checked, a0, u(1_000), None).unwrap();
        assert_eq!(unchecked, checked);
    }
}
