//! Settlement collaborator
//!
//! Pool accounting assumes funds are already in custody when an operation runs. Crediting
//! minted shares and paying outputs is delegated to a [`Settlement`] implementation. The
//! exchange stages the new pair state, settles, and commits only when settlement succeeds.

use crate::error::SettlementError;
use dashmap::DashMap;
use types::{AccountId, AssetId, PairKey, U256};

/// External ledger that moves shares and assets for the pool
///
/// Each call is all-or-nothing: on `Err` nothing was credited or paid.
///
/// Calls are made while the exchange holds the pair's write lock. Implementations must not
/// call back into the exchange for the same pair; the lock is not reentrant and such a call
/// deadlocks.
pub trait Settlement: Send + Sync {
    /// Credit freshly minted LP shares of `pair` to `to`
    fn credit_shares(&self, pair: PairKey, to: AccountId, shares: U256) -> Result<(), SettlementError>;

    /// Pay every `(asset, amount)` in `payouts` out of pool custody to `to`
    fn pay_out(&self, to: AccountId, payouts: &[(AssetId, U256)]) -> Result<(), SettlementError>;
}

/// In-memory settlement keeping LP balances and paid-out totals
#[derive(Debug, Default)]
pub struct MemorySettlement {
    shares: DashMap<(PairKey, AccountId), U256>,
    payouts: DashMap<(AssetId, AccountId), U256>,
}

impl MemorySettlement {
    pub fn new() -> Self {
        Self::default()
    }

    /// LP shares of `pair` held by `account`
    pub fn share_balance(&self, pair: PairKey, account: AccountId) -> U256 {
        self.shares
            .get(&(pair, account))
            .map(|balance| *balance)
            .unwrap_or_default()
    }

    /// Total of `asset` paid out to `account`
    pub fn paid_out(&self, asset: AssetId, account: AccountId) -> U256 {
        self.payouts
            .get(&(asset, account))
            .map(|total| *total)
            .unwrap_or_default()
    }

    /// Move `shares` from `account` back into pool custody ahead of a withdrawal
    pub fn debit_shares(&self, pair: PairKey, account: AccountId, shares: U256) -> Result<(), SettlementError> {
        let mut balance = self.shares.entry((pair, account)).or_default();
        let held = *balance;
        *balance = held.checked_sub(shares).ok_or_else(|| {
            SettlementError::Rejected(format!(
                "account {:?} holds {} shares of {}, cannot debit {}",
                account, held, pair, shares
            ))
        })?;
        Ok(())
    }
}

impl Settlement for MemorySettlement {
    fn credit_shares(&self, pair: PairKey, to: AccountId, shares: U256) -> Result<(), SettlementError> {
        let mut balance = self.shares.entry((pair, to)).or_default();
        let held = *balance;
        *balance = held
            .checked_add(shares)
            .ok_or_else(|| SettlementError::Rejected(format!("share balance overflow for {:?}", to)))?;
        Ok(())
    }

    fn pay_out(&self, to: AccountId, payouts: &[(AssetId, U256)]) -> Result<(), SettlementError> {
        let mut applied = Vec::with_capacity(payouts.len());

        for &(asset, amount) in payouts {
            let mut total = self.payouts.entry((asset, to)).or_default();
            match total.checked_add(amount) {
                Some(next) => {
                    *total = next;
                    applied.push((asset, amount));
                }
                None => {
                    drop(total);
                    // undo earlier legs so the batch leaves no trace
                    for (asset, amount) in applied {
                        if let Some(mut paid) = self.payouts.get_mut(&(asset, to)) {
                            *paid -= amount;
                        }
                    }
                    return Err(SettlementError::Rejected(format!(
                        "payout total overflow for {:?} in {}",
                        to, asset
                    )));
                }
            }
        }
        Ok(())
    }
}
