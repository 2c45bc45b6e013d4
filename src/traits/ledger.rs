//! Fungible-asset ledger abstraction.
//!
//! The DEX core never holds value itself: pools, the router and the
//! native adapter record reserves and shares, and move the underlying
//! assets through a [`Ledger`].  The ledger is an external collaborator;
//! [`MemoryLedger`](crate::ledger::MemoryLedger) is the in-process
//! implementation used by tests and the demo.
//!
//! # Contract
//!
//! Every mutating method is all-or-nothing: on `Err`, no balance or
//! allowance has changed.  Transfers of [`Amount::ZERO`] succeed and move
//! nothing.  An allowance of [`Amount::MAX`] is unlimited and is never
//! consumed.

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::DexError;

/// Per-asset balances and allowances with ERC-20 style movement.
pub trait Ledger {
    /// Returns `holder`'s balance of `asset`.
    #[must_use]
    fn balance_of(&self, asset: AssetId, holder: AccountId) -> Amount;

    /// Returns how much of `owner`'s `asset` the `spender` may move.
    #[must_use]
    fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> Amount;

    /// Moves `amount` of `asset` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidAccount`] if `to` is the null account.
    /// - [`DexError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError>;

    /// Moves `amount` of `owner`'s `asset` to `to` on behalf of `spender`,
    /// consuming the allowance.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAllowance`] if the allowance is short.
    /// - Any error of [`transfer`](Self::transfer).
    fn transfer_from(
        &mut self,
        asset: AssetId,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError>;

    /// Sets the allowance of `spender` over `owner`'s `asset` to `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidAccount`] if either account is null.
    fn approve(
        &mut self,
        asset: AssetId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), DexError>;
}

/// A [`Ledger`] that can also create and destroy units of an asset.
///
/// Only the native adapter uses this, to issue and retire the wrapped
/// native asset one-for-one against the coin it holds.
pub trait MintableLedger: Ledger {
    /// Returns the outstanding supply of `asset`.
    #[must_use]
    fn total_supply(&self, asset: AssetId) -> Amount;

    /// Creates `amount` of `asset` in `to`'s balance.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidAccount`] if `to` is the null account.
    /// - [`DexError::Overflow`] if the supply would overflow.
    fn mint(&mut self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), DexError>;

    /// Destroys `amount` of `asset` from `from`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds less than
    /// `amount`.
    fn burn(&mut self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), DexError>;
}
