//! Pair key derivation
//!
//! A pair is addressed by `keccak256(asset0 ‖ asset1)` over the two sorted 20-byte addresses,
//! the same salt a factory uses to place a pair deterministically.

use crate::asset::AssetId;
use ethers_core::types::H256;
use ethers_core::utils::keccak256;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Deterministic identifier of an unordered asset pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PairKey(pub H256);

impl PairKey {
    /// Derive the key from assets already in sorted order (`asset0 < asset1`)
    pub fn from_sorted(asset0: AssetId, asset1: AssetId) -> Self {
        debug_assert!(asset0 < asset1, "pair key requires sorted assets");

        let mut preimage = [0u8; 40];
        preimage[..20].copy_from_slice(asset0.as_bytes());
        preimage[20..].copy_from_slice(asset1.as_bytes());
        Self(H256(keccak256(preimage)))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_fixed_bytes()
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.as_bytes()))
    }
}
