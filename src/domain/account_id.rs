//! Ledger account identity.

use core::fmt;

/// An account that can hold ledger balances and pool shares: a trader,
/// the router, the native adapter, or a pool.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::AccountId;
///
/// let pool = AccountId::derived(*b"pool", 7);
/// assert_ne!(pool, AccountId::derived(*b"pool", 8));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AccountId([u8; 32]);

impl AccountId {
    /// The null account.
    pub const NULL: Self = Self([0u8; 32]);

    /// Creates an `AccountId` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives a deterministic system account from a 4-byte tag and an index.
    ///
    /// Derived accounts start with `0xff`, a prefix never produced by
    /// [`from_bytes`](Self::from_bytes) callers in this crate.
    #[must_use]
    pub const fn derived(tag: [u8; 4], index: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[0] = 0xff;
        bytes[1] = tag[0];
        bytes[2] = tag[1];
        bytes[3] = tag[2];
        bytes[4] = tag[3];
        let idx = index.to_be_bytes();
        let mut i = 0;
        while i < 8 {
            bytes[24 + i] = idx[i];
            i += 1;
        }
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the all-zero account.
    #[must_use]
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0[..4] {
            write!(f, "{byte:02x}")?;
        }
        write!(f, "..")?;
        for byte in &self.0[28..] {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_accounts_are_distinct_per_index_and_tag() {
        let a = AccountId::derived(*b"pool", 0);
        let b = AccountId::derived(*b"pool", 1);
        let c = AccountId::derived(*b"rtr0", 0);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert!(!a.is_null());
    }

    #[test]
    fn derived_layout() {
        let a = AccountId::derived(*b"pool", 258);
        let bytes = a.as_bytes();
        assert_eq!(bytes[0], 0xff);
        assert_eq!(&bytes[1..5], b"pool");
        assert_eq!(bytes[30], 1);
        assert_eq!(bytes[31], 2);
    }

    #[test]
    fn display() {
        let a = AccountId::from_bytes([1u8; 32]);
        assert_eq!(a.to_string(), "0x01010101..01010101");
    }
}
