//! Multi-hop route description.

use super::AssetId;
use crate::error::DexError;

/// An ordered route of at least two assets.
///
/// Each consecutive pair is one hop through the pool registered for that
/// pair.  Construction only checks the length; hop resolution happens in
/// the router.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{AssetId, SwapPath};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
/// let c = AssetId::from_bytes([3u8; 32]);
///
/// let path = SwapPath::new(vec![a, b, c]).expect("two hops");
/// assert_eq!(path.hop_count(), 2);
/// assert!(SwapPath::new(vec![a]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SwapPath(Vec<AssetId>);

impl SwapPath {
    /// Creates a path from an ordered asset list.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidPath`] if fewer than two assets are given.
    pub fn new(assets: Vec<AssetId>) -> Result<Self, DexError> {
        if assets.len() < 2 {
            return Err(DexError::InvalidPath);
        }
        Ok(Self(assets))
    }

    /// Returns the assets in route order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.0
    }

    /// Returns the number of hops (`len - 1`).
    #[must_use]
    pub fn hop_count(&self) -> usize {
        self.0.len() - 1
    }

    /// First asset of the route.
    #[must_use]
    pub fn first(&self) -> AssetId {
        self.0[0]
    }

    /// Last asset of the route.
    #[must_use]
    pub fn last(&self) -> AssetId {
        self.0[self.0.len() - 1]
    }

    /// Iterates over `(asset_in, asset_out)` hops in route order.
    pub fn hops(&self) -> impl DoubleEndedIterator<Item = (AssetId, AssetId)> + '_ {
        self.0.windows(2).map(|w| (w[0], w[1]))
    }
}

impl TryFrom<Vec<AssetId>> for SwapPath {
    type Error = DexError;

    fn try_from(assets: Vec<AssetId>) -> Result<Self, Self::Error> {
        Self::new(assets)
    }
}

impl TryFrom<&[AssetId]> for SwapPath {
    type Error = DexError;

    fn try_from(assets: &[AssetId]) -> Result<Self, Self::Error> {
        Self::new(assets.to_vec())
    }
}
