//! Configuration for the router and its native-asset adapter.

use crate::domain::{AccountId, AssetId};
use crate::error::DexError;

/// Identities the router needs to operate.
///
/// # Fields
///
/// - `router_account`: ledger account the router uses as spender and as
///   the transit account between hops.
/// - `native_asset`: the environment's raw native coin.  It can never be
///   pooled directly.
/// - `wrapped_native`: the poolable asset the adapter issues one-for-one
///   against the native coin.
/// - `adapter_account`: ledger account holding the native backing.
///
/// # Validation
///
/// All four identities must be non-null, the two assets must differ and
/// the two accounts must differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RouterConfig {
    router_account: AccountId,
    native_asset: AssetId,
    wrapped_native: AssetId,
    adapter_account: AccountId,
}

impl RouterConfig {
    /// Creates a new `RouterConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if any invariant from
    /// [`validate`](Self::validate) fails.
    pub fn new(
        router_account: AccountId,
        native_asset: AssetId,
        wrapped_native: AssetId,
        adapter_account: AccountId,
    ) -> Result<Self, DexError> {
        let config = Self {
            router_account,
            native_asset,
            wrapped_native,
            adapter_account,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] with the failing rule.
    pub fn validate(&self) -> Result<(), DexError> {
        if self.router_account.is_null() || self.adapter_account.is_null() {
            return Err(DexError::InvalidConfiguration("null account"));
        }
        if self.native_asset.is_null() || self.wrapped_native.is_null() {
            return Err(DexError::InvalidConfiguration("null asset"));
        }
        if self.native_asset == self.wrapped_native {
            return Err(DexError::InvalidConfiguration(
                "native and wrapped native must differ",
            ));
        }
        if self.router_account == self.adapter_account {
            return Err(DexError::InvalidConfiguration(
                "router and adapter accounts must differ",
            ));
        }
        Ok(())
    }

    /// Returns the router's ledger account.
    #[must_use]
    pub const fn router_account(&self) -> AccountId {
        self.router_account
    }

    /// Returns the raw native coin identity.
    #[must_use]
    pub const fn native_asset(&self) -> AssetId {
        self.native_asset
    }

    /// Returns the wrapped native asset identity.
    #[must_use]
    pub const fn wrapped_native(&self) -> AssetId {
        self.wrapped_native
    }

    /// Returns the adapter's ledger account.
    #[must_use]
    pub const fn adapter_account(&self) -> AccountId {
        self.adapter_account
    }
}
