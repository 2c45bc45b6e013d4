//! Append-only pool list with symmetric pair lookup.

use core::fmt;
use std::collections::HashMap;

use tracing::info;

use crate::domain::{AccountId, AssetId, PairKey};
use crate::error::DexError;
use crate::pools::ConstantProductPool;

/// Tag mixed into derived pool account identities.
const POOL_ACCOUNT_TAG: [u8; 4] = *b"pool";

/// Position of a pool in the registry's creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PoolId(usize);

impl PoolId {
    /// Returns the creation index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

/// Owns all pools and resolves asset pairs to them.
///
/// Pools are never removed, so a [`PoolId`] stays valid for the
/// registry's lifetime.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::AssetId;
/// use hydra_dex::registry::PoolRegistry;
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
///
/// let mut registry = PoolRegistry::new();
/// let id = registry.create(a, b).expect("new pair");
/// assert_eq!(registry.lookup(b, a), Some(id));
/// assert!(registry.create(b, a).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolRegistry {
    pools: Vec<ConstantProductPool>,
    by_pair: HashMap<PairKey, PoolId>,
}

impl PoolRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates and registers the pool for `(x, y)`, bound in that order.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAsset`] if `x == y`.
    /// - [`DexError::InvalidAsset`] if either asset is null.
    /// - [`DexError::PoolExists`] if the unordered pair is registered.
    pub fn create(&mut self, x: AssetId, y: AssetId) -> Result<PoolId, DexError> {
        let key = PairKey::new(x, y)?;
        if self.by_pair.contains_key(&key) {
            return Err(DexError::PoolExists);
        }
        let id = PoolId(self.pools.len());
        let account = AccountId::derived(POOL_ACCOUNT_TAG, id.0 as u64);
        let mut pool = ConstantProductPool::new(account);
        pool.initialize(x, y)?;

        self.pools.push(pool);
        self.by_pair.insert(key, id);
        info!(%id, asset_a = %x, asset_b = %y, %account, "pool created");
        Ok(id)
    }

    /// Returns the pool id for the unordered pair, if registered.
    #[must_use]
    pub fn lookup(&self, x: AssetId, y: AssetId) -> Option<PoolId> {
        let key = PairKey::new(x, y).ok()?;
        self.by_pair.get(&key).copied()
    }

    /// Like [`lookup`](Self::lookup), failing with
    /// [`DexError::PoolDoesNotExist`].
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolDoesNotExist`] if the pair is unregistered.
    pub fn resolve(&self, x: AssetId, y: AssetId) -> Result<PoolId, DexError> {
        self.lookup(x, y).ok_or(DexError::PoolDoesNotExist)
    }

    /// Returns the pool with the given id.
    #[must_use]
    pub fn get(&self, id: PoolId) -> Option<&ConstantProductPool> {
        self.pools.get(id.0)
    }

    /// Returns the pool with the given id, mutably.
    pub fn get_mut(&mut self, id: PoolId) -> Option<&mut ConstantProductPool> {
        self.pools.get_mut(id.0)
    }

    /// Returns the id of the `index`-th pool ever created.
    #[must_use]
    pub fn at(&self, index: usize) -> Option<PoolId> {
        (index < self.pools.len()).then_some(PoolId(index))
    }

    /// Number of pools ever created.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    /// Returns `true` if no pool has been created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// Iterates over `(id, pool)` in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (PoolId, &ConstantProductPool)> {
        self.pools
            .iter()
            .enumerate()
            .map(|(index, pool)| (PoolId(index), pool))
    }
}
