//! Error types for pool accounting
//!
//! Every failure is terminal for the attempted operation and leaves pool state untouched.
//! Nothing here is retried; the caller decides what to do with the surrounding transaction.

use thiserror::Error;
use types::{AssetId, PairKey, U256};

/// Fixed-width integer arithmetic failures
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    /// Result exceeds `U256::MAX`
    #[error("Arithmetic overflow")]
    Overflow,

    /// Subtrahend larger than minuend
    #[error("Arithmetic underflow")]
    Underflow,

    #[error("Division by zero")]
    DivisionByZero,
}

/// Failure reported by the external ledger collaborator
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettlementError {
    #[error("Settlement rejected: {0}")]
    Rejected(String),

    #[error("Settlement unavailable: {0}")]
    Unavailable(String),
}

/// Pool accounting errors
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AmmError {
    #[error("Identical assets: {0}")]
    IdenticalAssets(AssetId),

    #[error("Pair already exists: {key}")]
    PairExists { key: PairKey },

    #[error("Pair not found: {pair}")]
    PairNotFound { pair: String },

    #[error("Asset {asset} is not part of pair {key}")]
    UnknownAsset { asset: AssetId, key: PairKey },

    #[error("Input amount is zero")]
    ZeroInput,

    #[error("Output amount floors to zero")]
    ZeroOutput,

    #[error("Insufficient liquidity: reserves ({reserve_in}, {reserve_out})")]
    InsufficientLiquidity { reserve_in: U256, reserve_out: U256 },

    #[error("Insufficient initial liquidity: sqrt(amount0 * amount1) = {root} must exceed {minimum}")]
    InsufficientInitialLiquidity { root: U256, minimum: U256 },

    #[error("Deposit mints zero liquidity")]
    ZeroLiquidityMinted,

    #[error("Insufficient shares: requested {requested}, total supply {total}")]
    InsufficientShares { requested: U256, total: U256 },

    #[error("Slippage exceeded: output {amount_out} below minimum {min_amount_out}")]
    SlippageExceeded { amount_out: U256, min_amount_out: U256 },

    #[error("Invariant violation: {reason}")]
    InvariantViolation { reason: String },

    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Settlement(#[from] SettlementError),
}

pub type Result<T> = std::result::Result<T, AmmError>;
