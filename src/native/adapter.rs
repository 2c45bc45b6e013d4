//! Deposit/withdraw wrapper for the native coin.

use tracing::debug;

use crate::config::RouterConfig;
use crate::domain::{AccountId, Amount, AssetId};
use crate::error::DexError;
use crate::traits::MintableLedger;

/// Issues the wrapped native asset against native coin it holds.
///
/// The adapter's account always holds exactly as much native coin as the
/// outstanding supply of the wrapped asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeAdapter {
    native: AssetId,
    wrapped: AssetId,
    account: AccountId,
}

impl NativeAdapter {
    /// Creates the adapter described by `config`.
    #[must_use]
    pub const fn from_config(config: &RouterConfig) -> Self {
        Self {
            native: config.native_asset(),
            wrapped: config.wrapped_native(),
            account: config.adapter_account(),
        }
    }

    /// The raw native coin.
    #[must_use]
    pub const fn native_asset(&self) -> AssetId {
        self.native
    }

    /// The wrapped asset.
    #[must_use]
    pub const fn wrapped_asset(&self) -> AssetId {
        self.wrapped
    }

    /// The account holding the native backing.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// Outstanding wrapped supply.
    pub fn total_wrapped<L: MintableLedger>(&self, ledger: &L) -> Amount {
        ledger.total_supply(self.wrapped)
    }

    /// Fails unless the adapter holds at least `amount` native coin to
    /// release.
    ///
    /// Wrapped units issued outside the adapter are not backed, so the
    /// outstanding supply alone does not guarantee this.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if the backing is short.
    pub fn ensure_backed<L: MintableLedger>(&self, ledger: &L, amount: Amount) -> Result<(), DexError> {
        if ledger.balance_of(self.native, self.account) < amount {
            return Err(DexError::InsufficientBalance);
        }
        Ok(())
    }

    /// Takes `amount` native coin from `from` and mints the same amount of
    /// the wrapped asset to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if `amount` is zero.
    /// - [`DexError::InvalidAccount`] if `to` is null.
    /// - [`DexError::InsufficientBalance`] if `from` holds too little
    ///   native coin.
    pub fn deposit<L: MintableLedger>(
        &self,
        ledger: &mut L,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        if amount.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        if to.is_null() {
            return Err(DexError::InvalidAccount);
        }
        if ledger.balance_of(self.native, from) < amount {
            return Err(DexError::InsufficientBalance);
        }
        let _new_supply = ledger
            .total_supply(self.wrapped)
            .checked_add(&amount)
            .ok_or(DexError::Overflow("wrapped supply overflow"))?;
        ledger.transfer(self.native, from, self.account, amount)?;
        ledger.mint(self.wrapped, to, amount)?;
        debug!(%from, %to, %amount, "native wrapped");
        Ok(())
    }

    /// Burns `amount` of `from`'s wrapped asset and releases the same
    /// amount of native coin to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if `amount` is zero.
    /// - [`DexError::InvalidAccount`] if `to` is null.
    /// - [`DexError::InsufficientBalance`] if `from` holds too little of
    ///   the wrapped asset.
    pub fn withdraw<L: MintableLedger>(
        &self,
        ledger: &mut L,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        if amount.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        if to.is_null() {
            return Err(DexError::InvalidAccount);
        }
        if ledger.balance_of(self.wrapped, from) < amount {
            return Err(DexError::InsufficientBalance);
        }
        self.ensure_backed(ledger, amount)?;
        ledger.burn(self.wrapped, from, amount)?;
        ledger.transfer(self.native, self.account, to, amount)?;
        debug!(%from, %to, %amount, "native unwrapped");
        Ok(())
    }
}
