//! Asset and account identifiers
//!
//! Assets are referenced by their full 20-byte address. The ordering of [`AssetId`] is the
//! lexicographic order of those bytes, so sorting two assets is stable across processes.

use crate::errors::UnitsError;
use crate::precision;
use ethers_core::types::{Address, H160, U256};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account that receives LP shares or payouts
pub type AccountId = Address;

/// Opaque, totally ordered token reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub Address);

impl AssetId {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(H160(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_fixed_bytes()
    }

    pub fn address(&self) -> Address {
        self.0
    }
}

impl From<Address> for AssetId {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl FromStr for AssetId {
    type Err = hex::FromHexError;

    /// Parse a `0x`-prefixed (or bare) 40 character hex address
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(trimmed, &mut bytes)?;
        Ok(Self::from_bytes(bytes))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.as_bytes()))
    }
}

/// Order two assets, or `None` when they are the same asset
pub fn sort_assets(a: AssetId, b: AssetId) -> Option<(AssetId, AssetId)> {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => Some((a, b)),
        std::cmp::Ordering::Greater => Some((b, a)),
        std::cmp::Ordering::Equal => None,
    }
}

/// Display metadata supplied by the ledger collaborator
///
/// Never used for accounting: the engine works in smallest units only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMetadata {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
}

impl AssetMetadata {
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            decimals,
        }
    }

    /// Render a smallest-unit amount as a decimal string, e.g. `1500000` → `"1.500000"` for 6 decimals
    pub fn format_amount(&self, amount: U256) -> Result<String, UnitsError> {
        precision::format_units(amount, self.decimals)
    }

    /// Parse a human amount into smallest units
    pub fn parse_amount(&self, input: &str) -> Result<U256, UnitsError> {
        precision::parse_units(input, self.decimals)
    }
}
