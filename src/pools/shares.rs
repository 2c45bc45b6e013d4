//! Pool share accounting.

use std::collections::HashMap;

use crate::domain::{AccountId, Amount};
use crate::error::DexError;
use crate::math::CheckedArithmetic;

/// Balances, allowances and the locked reserve of one pool's shares.
///
/// `total` always equals the sum of holder balances plus `locked`.
/// Locked shares belong to nobody: they can be added to but never moved
/// or burned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareBook {
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
    locked: Amount,
    total: Amount,
}

impl ShareBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding shares, locked ones included.
    pub const fn total(&self) -> Amount {
        self.total
    }

    /// Permanently locked shares.
    pub const fn locked(&self) -> Amount {
        self.locked
    }

    /// Transferable balance of `holder`.
    pub fn balance_of(&self, holder: &AccountId) -> Amount {
        self.balances.get(holder).copied().unwrap_or(Amount::ZERO)
    }

    /// Shares `spender` may move on behalf of `owner`.
    pub fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn set_balance(&mut self, holder: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&holder);
        } else {
            self.balances.insert(holder, amount);
        }
    }

    /// Adds `amount` to the locked reserve.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the total overflows.
    pub fn lock(&mut self, amount: Amount) -> Result<(), DexError> {
        let total = self.total.safe_add(&amount)?;
        self.locked = self.locked.safe_add(&amount)?;
        self.total = total;
        Ok(())
    }

    /// Issues `amount` new shares to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the total overflows.
    pub fn mint(&mut self, to: AccountId, amount: Amount) -> Result<(), DexError> {
        let total = self.total.safe_add(&amount)?;
        let balance = self.balance_of(&to).safe_add(&amount)?;
        self.total = total;
        self.set_balance(to, balance);
        Ok(())
    }

    /// Destroys `amount` of `from`'s shares.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds less.
    pub fn burn(&mut self, from: AccountId, amount: Amount) -> Result<(), DexError> {
        let balance = self.balance_of(&from);
        if balance < amount {
            return Err(DexError::InsufficientBalance);
        }
        self.total = self.total.safe_sub(&amount)?;
        self.set_balance(from, balance.safe_sub(&amount)?);
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    pub fn approve(&mut self, owner: AccountId, spender: AccountId, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Fails with [`DexError::InsufficientAllowance`] unless `spender` may
    /// move `amount` of `owner`'s shares.  An owner needs no allowance.
    pub fn check_allowance(
        &self,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        if owner != spender && self.allowance(owner, spender) < amount {
            return Err(DexError::InsufficientAllowance);
        }
        Ok(())
    }

    /// Consumes `amount` of `spender`'s allowance over `owner`'s shares.
    ///
    /// No-op when `spender == owner` or the allowance is unlimited.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientAllowance`] if the allowance is short.
    pub fn spend_allowance(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.check_allowance(&owner, &spender, amount)?;
        if owner == spender {
            return Ok(());
        }
        let allowed = self.allowance(&owner, &spender);
        if allowed != Amount::MAX {
            self.allowances
                .insert((owner, spender), allowed.safe_sub(&amount)?);
        }
        Ok(())
    }

    /// Moves `amount` shares from `from` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InsufficientBalance`] if `from` holds less.
    pub fn transfer(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(DexError::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }
        let to_balance = self.balance_of(&to).safe_add(&amount)?;
        self.set_balance(from, from_balance.safe_sub(&amount)?);
        self.set_balance(to, to_balance);
        Ok(())
    }
}
