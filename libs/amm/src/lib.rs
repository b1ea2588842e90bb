//! # PairPool AMM - Constant-Product Pool Accounting Engine
//!
//! ## Purpose
//!
//! Exact integer accounting for two-asset constant-product pools: pair registration, LP share
//! minting and burning, and fee-adjusted swaps. Every amount is a `U256` in the asset's
//! smallest unit and every division floors in the pool's favour.
//!
//! ## Integration Points
//!
//! - **Input**: funds or shares already in pool custody, supplied by the external ledger
//! - **Output**: shares to credit and assets to pay, handed to a [`Settlement`] implementation
//! - **Configuration**: [`config::EngineConfig`] toggles the swap post-condition check
//! - **Display**: [`PoolOverview`] renders reserves, LP supply and spot prices
//!
//! ## Architecture Role
//!
//! ```text
//! Exchange ──> PairRegistry ──> Arc<RwLock<ReserveLedger>> (one per pair)
//!    │               │
//!    │               └── LiquidityEngine / SwapEngine compute on a staged ReserveLedger
//!    └── Settlement (credit_shares, pay_out), then the staged state is committed
//! ```
//!
//! ## Example
//!
//! ```rust
//! use amm::{Exchange, MemorySettlement};
//! use config::EngineConfig;
//! use std::sync::Arc;
//! use types::{AccountId, AssetId, U256};
//!
//! let settlement = Arc::new(MemorySettlement::new());
//! let exchange = Exchange::new(&EngineConfig::default(), settlement.clone());
//! let (a, b) = (AssetId::from_bytes([1; 20]), AssetId::from_bytes([2; 20]));
//!
//! exchange.create_pair(a, b).unwrap();
//! exchange
//!     .add_liquidity(a, b, U256::from(100_000), U256::from(100_000), AccountId::zero())
//!     .unwrap();
//!
//! let out = exchange.swap(a, b, U256::from(1_000), None, AccountId::zero()).unwrap();
//! assert_eq!(out.amount_out, U256::from(987));
//! ```

pub mod constants;
pub mod error;
pub mod exchange;
pub mod ledger;
pub mod liquidity;
pub mod math;
pub mod overview;
pub mod pool_traits;
pub mod registry;
pub mod settlement;
pub mod swap;

pub use constants::{FEE_BPS, MINIMUM_LIQUIDITY};
pub use error::{AmmError, MathError, Result, SettlementError};
pub use exchange::Exchange;
pub use ledger::{Pair, PairPhase, ReserveLedger, Side};
pub use liquidity::{BurnQuote, LiquidityEngine, MintQuote};
pub use overview::PoolOverview;
pub use pool_traits::AmmPool;
pub use registry::{AllPairs, PairHandle, PairRegistry};
pub use settlement::{MemorySettlement, Settlement};
pub use swap::{SwapEngine, SwapOutcome};
