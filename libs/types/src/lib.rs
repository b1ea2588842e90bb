//! # PairPool Types
//!
//! Identifier and display types shared by the PairPool accounting engine.
//!
//! ## Design Philosophy
//!
//! - **Smallest Units Only**: Every amount the engine touches is a `U256` in the asset's
//!   smallest integer unit. Decimal strings exist only at the display boundary.
//! - **Ordered Identifiers**: [`AssetId`] is totally ordered by its raw 20 bytes, which is
//!   what makes pair keys independent of argument order.
//! - **Deterministic Keys**: [`PairKey`] is `keccak256(asset0 ‖ asset1)` over the sorted pair.
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{AssetId, AssetMetadata, PairKey};
//!
//! let usdc = AssetId::from_bytes([0x11; 20]);
//! let weth = AssetId::from_bytes([0x22; 20]);
//!
//! let (asset0, asset1) = types::sort_assets(weth, usdc).unwrap();
//! assert_eq!(asset0, usdc);
//! assert_eq!(PairKey::from_sorted(asset0, asset1), PairKey::from_sorted(usdc, weth));
//!
//! let meta = AssetMetadata::new("USDC", "USD Coin", 6);
//! assert_eq!(meta.parse_amount("1.5").unwrap(), 1_500_000u64.into());
//! ```

pub mod asset;
pub mod errors;
pub mod pair_key;
pub mod precision;

pub use asset::{sort_assets, AccountId, AssetId, AssetMetadata};
pub use errors::UnitsError;
pub use pair_key::PairKey;
pub use precision::{format_units, parse_units, to_decimal, LP_SHARE_DECIMALS};

/// Native integer width of the external ledger
pub use ethers_core::types::{Address, H256, U256, U512};
