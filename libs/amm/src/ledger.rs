//! Reserve Ledger
//!
//! Owns the mutable numeric state of one pair: both reserves and the LP share supply.
//! Engines compute amounts against a [`Pair`] value and hand the results to the ledger,
//! which validates the resulting state and commits all three fields together or not at all.

use crate::error::{AmmError, Result};
use crate::math;
use serde::{Deserialize, Serialize};
use types::{AssetId, PairKey, U256};

/// Which side of a pair an asset sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Zero,
    One,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Zero => Side::One,
            Side::One => Side::Zero,
        }
    }
}

/// Lifecycle phase of a registered pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PairPhase {
    /// Created, zero reserves and zero shares
    Empty,
    /// Positive reserves and positive shares
    Active,
}

/// Complete state of a single pair
///
/// A `Pair` handed out by the registry is a consistent copy taken under the pair's lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
    pub key: PairKey,
    pub asset0: AssetId,
    pub asset1: AssetId,
    pub reserve0: U256,
    pub reserve1: U256,
    pub total_shares: U256,
}

impl Pair {
    /// Fresh zero-state pair; `asset0 < asset1` is required
    pub fn new(asset0: AssetId, asset1: AssetId) -> Self {
        Self {
            key: PairKey::from_sorted(asset0, asset1),
            asset0,
            asset1,
            reserve0: U256::zero(),
            reserve1: U256::zero(),
            total_shares: U256::zero(),
        }
    }

    pub fn phase(&self) -> PairPhase {
        if self.total_shares.is_zero() {
            PairPhase::Empty
        } else {
            PairPhase::Active
        }
    }

    pub fn contains(&self, asset: AssetId) -> bool {
        asset == self.asset0 || asset == self.asset1
    }

    /// Side of `asset`, or `UnknownAsset`
    pub fn side_of(&self, asset: AssetId) -> Result<Side> {
        if asset == self.asset0 {
            Ok(Side::Zero)
        } else if asset == self.asset1 {
            Ok(Side::One)
        } else {
            Err(AmmError::UnknownAsset {
                asset,
                key: self.key,
            })
        }
    }

    pub fn asset(&self, side: Side) -> AssetId {
        match side {
            Side::Zero => self.asset0,
            Side::One => self.asset1,
        }
    }

    pub fn reserve(&self, side: Side) -> U256 {
        match side {
            Side::Zero => self.reserve0,
            Side::One => self.reserve1,
        }
    }

    /// `(reserve_in, reserve_out)` for a trade entering on `side_in`
    pub fn oriented_reserves(&self, side_in: Side) -> (U256, U256) {
        (self.reserve(side_in), self.reserve(side_in.opposite()))
    }

    /// Map two amounts given in caller order onto `(amount0, amount1)`
    pub fn order_amounts(&self, asset_a: AssetId, amount_a: U256, amount_b: U256) -> Result<(U256, U256)> {
        match self.side_of(asset_a)? {
            Side::Zero => Ok((amount_a, amount_b)),
            Side::One => Ok((amount_b, amount_a)),
        }
    }

    /// Zero-or-all-positive shape check
    pub fn check_shape(&self) -> Result<()> {
        let zeros = [self.reserve0, self.reserve1, self.total_shares]
            .iter()
            .filter(|v| v.is_zero())
            .count();

        match zeros {
            0 | 3 => Ok(()),
            _ => Err(AmmError::InvariantViolation {
                reason: format!(
                    "pair {} reserves ({}, {}) and supply {} must be all zero or all positive",
                    self.key, self.reserve0, self.reserve1, self.total_shares
                ),
            }),
        }
    }
}

/// Exclusive owner of a pair's reserves and share supply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReserveLedger {
    pair: Pair,
}

impl ReserveLedger {
    pub fn new(asset0: AssetId, asset1: AssetId) -> Self {
        Self {
            pair: Pair::new(asset0, asset1),
        }
    }

    /// Rebuild a ledger from previously persisted state
    pub fn restore(pair: Pair) -> Result<Self> {
        if pair.asset0 >= pair.asset1 || pair.key != PairKey::from_sorted(pair.asset0, pair.asset1) {
            return Err(AmmError::InvariantViolation {
                reason: format!("pair {} has unsorted assets or a mismatched key", pair.key),
            });
        }
        pair.check_shape()?;
        Ok(Self { pair })
    }

    pub fn pair(&self) -> &Pair {
        &self.pair
    }

    pub fn snapshot(&self) -> Pair {
        self.pair
    }

    /// Credit a deposit and the shares minted for it (locked shares included)
    pub(crate) fn apply_deposit(&mut self, amount0: U256, amount1: U256, shares: U256) -> Result<()> {
        let next = Pair {
            reserve0: math::add(self.pair.reserve0, amount0)?,
            reserve1: math::add(self.pair.reserve1, amount1)?,
            total_shares: math::add(self.pair.total_shares, shares)?,
            ..self.pair
        };
        self.commit(next)
    }

    /// Burn shares and debit the payout
    pub(crate) fn apply_withdrawal(&mut self, shares: U256, amount0: U256, amount1: U256) -> Result<()> {
        let next = Pair {
            reserve0: math::sub(self.pair.reserve0, amount0)?,
            reserve1: math::sub(self.pair.reserve1, amount1)?,
            total_shares: math::sub(self.pair.total_shares, shares)?,
            ..self.pair
        };
        self.commit(next)
    }

    /// Credit `amount_in` on `side_in` and debit `amount_out` on the other side
    pub(crate) fn apply_swap(&mut self, side_in: Side, amount_in: U256, amount_out: U256) -> Result<()> {
        let mut next = self.pair;
        match side_in {
            Side::Zero => {
                next.reserve0 = math::add(next.reserve0, amount_in)?;
                next.reserve1 = math::sub(next.reserve1, amount_out)?;
            }
            Side::One => {
                next.reserve1 = math::add(next.reserve1, amount_in)?;
                next.reserve0 = math::sub(next.reserve0, amount_out)?;
            }
        }
        self.commit(next)
    }

    fn commit(&mut self, next: Pair) -> Result<()> {
        next.check_shape()?;
        self.pair = next;
        Ok(())
    }
}
