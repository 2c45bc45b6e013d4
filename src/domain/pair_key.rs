//! Order-independent key for an asset pair.

use super::AssetId;
use crate::error::DexError;

/// Canonical, unordered key for a pair of distinct, non-null assets.
///
/// The two identities are sorted on construction, so `(A, B)` and `(B, A)`
/// produce the same key.  The registry uses it for its symmetric lookup;
/// pools themselves keep the caller's original order.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{AssetId, PairKey};
///
/// let a = AssetId::from_bytes([1u8; 32]);
/// let b = AssetId::from_bytes([2u8; 32]);
/// assert_eq!(PairKey::new(a, b).expect("valid"), PairKey::new(b, a).expect("valid"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PairKey {
    low: AssetId,
    high: AssetId,
}

impl PairKey {
    /// Creates the canonical key for `x` and `y`.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAsset`] if `x == y`.
    /// - [`DexError::InvalidAsset`] if either identity is null.
    pub fn new(x: AssetId, y: AssetId) -> Result<Self, DexError> {
        if x == y {
            return Err(DexError::IdenticalAsset);
        }
        if x.is_null() || y.is_null() {
            return Err(DexError::InvalidAsset);
        }
        let (low, high) = if x < y { (x, y) } else { (y, x) };
        Ok(Self { low, high })
    }

    /// Returns the lower identity.
    #[must_use]
    pub const fn low(&self) -> AssetId {
        self.low
    }

    /// Returns the higher identity.
    #[must_use]
    pub const fn high(&self) -> AssetId {
        self.high
    }

    /// Returns `true` if `asset` is one side of the pair.
    #[must_use]
    pub fn contains(&self, asset: &AssetId) -> bool {
        self.low == *asset || self.high == *asset
    }
}
