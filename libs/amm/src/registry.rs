//! Pair Registry
//!
//! Owns every pair keyed by [`PairKey`]. Each pair lives behind its own lock so distinct
//! pairs never contend; the registry maps themselves are concurrent.

use crate::error::{AmmError, Result};
use crate::ledger::{Pair, ReserveLedger};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;
use types::{sort_assets, AssetId, PairKey};

/// Shared handle to one pair's ledger
pub type PairHandle = Arc<RwLock<ReserveLedger>>;

/// Registry of all pairs
#[derive(Default)]
pub struct PairRegistry {
    pairs: DashMap<PairKey, PairHandle>,

    /// Keys in creation order
    order: RwLock<Vec<PairKey>>,

    /// Asset -> keys of pairs containing it, in creation order
    asset_index: DashMap<AssetId, Vec<PairKey>>,
}

impl PairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a registry from persisted pair states, preserving their order
    pub fn restore(pairs: impl IntoIterator<Item = Pair>) -> Result<Self> {
        let registry = Self::new();
        for pair in pairs {
            let ledger = ReserveLedger::restore(pair)?;
            registry.insert(ledger)?;
        }
        info!("Restored pair registry with {} pairs", registry.len());
        Ok(registry)
    }

    /// Register a new zero-state pair and return its key
    pub fn create_pair(&self, asset_a: AssetId, asset_b: AssetId) -> Result<PairKey> {
        let (asset0, asset1) = sort_assets(asset_a, asset_b).ok_or(AmmError::IdenticalAssets(asset_a))?;
        let key = self.insert(ReserveLedger::new(asset0, asset1))?;

        info!(pair = %key, %asset0, %asset1, "Created pair");
        Ok(key)
    }

    fn insert(&self, ledger: ReserveLedger) -> Result<PairKey> {
        let pair = ledger.snapshot();

        match self.pairs.entry(pair.key) {
            Entry::Occupied(_) => Err(AmmError::PairExists { key: pair.key }),
            Entry::Vacant(slot) => {
                // indices are updated while the shard is held so creation order matches visibility
                self.order.write().push(pair.key);
                self.asset_index.entry(pair.asset0).or_default().push(pair.key);
                self.asset_index.entry(pair.asset1).or_default().push(pair.key);
                slot.insert(Arc::new(RwLock::new(ledger)));
                Ok(pair.key)
            }
        }
    }

    /// Order-insensitive handle lookup
    pub fn handle(&self, asset_a: AssetId, asset_b: AssetId) -> Result<PairHandle> {
        let not_found = || AmmError::PairNotFound {
            pair: format!("{}/{}", asset_a, asset_b),
        };
        let (asset0, asset1) = sort_assets(asset_a, asset_b).ok_or_else(not_found)?;

        self.handle_by_key(PairKey::from_sorted(asset0, asset1))
            .ok_or_else(not_found)
    }

    pub fn handle_by_key(&self, key: PairKey) -> Option<PairHandle> {
        self.pairs.get(&key).map(|entry| Arc::clone(entry.value()))
    }

    /// Order-insensitive lookup of a consistent pair snapshot
    pub fn get_pair(&self, asset_a: AssetId, asset_b: AssetId) -> Result<Pair> {
        Ok(self.handle(asset_a, asset_b)?.read().snapshot())
    }

    pub fn get_by_key(&self, key: PairKey) -> Result<Pair> {
        self.handle_by_key(key)
            .map(|handle| handle.read().snapshot())
            .ok_or_else(|| AmmError::PairNotFound { pair: key.to_string() })
    }

    /// Creation-ordered keys of the pairs that existed at the time of the call
    pub fn all_pairs(&self) -> AllPairs<'_> {
        AllPairs {
            order: &self.order,
            position: 0,
            end: self.order.read().len(),
        }
    }

    /// Keys of every pair containing `asset`, in creation order
    pub fn pairs_for_asset(&self, asset: AssetId) -> Vec<PairKey> {
        self.asset_index
            .get(&asset)
            .map(|keys| keys.value().clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// Lazy, restartable walk over pair keys in creation order
///
/// Bounded by the pair count when the walk was started; pairs created afterwards are not
/// visited. Clone to restart from the current position.
#[derive(Clone)]
pub struct AllPairs<'a> {
    order: &'a RwLock<Vec<PairKey>>,
    position: usize,
    end: usize,
}

impl Iterator for AllPairs<'_> {
    type Item = PairKey;

    fn next(&mut self) -> Option<PairKey> {
        if self.position >= self.end {
            return None;
        }
        let key = self.order.read().get(self.position).copied();
        self.position += 1;
        key
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AllPairs<'_> {}
