//! In-memory ledger for tests, simulations and the demo.

use std::collections::HashMap;

use tracing::trace;

use crate::domain::{AccountId, Amount, AssetId};
use crate::error::DexError;
use crate::math::CheckedArithmetic;
use crate::traits::{Ledger, MintableLedger};

/// A [`MintableLedger`] backed by hash maps.
///
/// Any asset can be minted, which makes it convenient for seeding test
/// accounts.  Zero balances are removed so two ledgers with the same
/// holdings compare equal.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{AccountId, Amount, AssetId};
/// use hydra_dex::ledger::MemoryLedger;
/// use hydra_dex::traits::{Ledger, MintableLedger};
///
/// let usd = AssetId::from_bytes([1u8; 32]);
/// let alice = AccountId::from_bytes([10u8; 32]);
/// let bob = AccountId::from_bytes([11u8; 32]);
///
/// let mut ledger = MemoryLedger::new();
/// ledger.mint(usd, alice, Amount::new(100)).expect("mint");
/// ledger.transfer(usd, alice, bob, Amount::new(40)).expect("transfer");
/// assert_eq!(ledger.balance_of(usd, bob), Amount::new(40));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryLedger {
    balances: HashMap<(AssetId, AccountId), Amount>,
    allowances: HashMap<(AssetId, AccountId, AccountId), Amount>,
    supply: HashMap<AssetId, Amount>,
}

impl MemoryLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set_balance(&mut self, asset: AssetId, holder: AccountId, amount: Amount) {
        if amount.is_zero() {
            self.balances.remove(&(asset, holder));
        } else {
            self.balances.insert((asset, holder), amount);
        }
    }

    /// New balances of `(from, to)` after moving `amount`, without
    /// applying them.
    fn plan_transfer(
        &self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(Amount, Amount), DexError> {
        if to.is_null() {
            return Err(DexError::InvalidAccount);
        }
        let from_balance = self.balance_of(asset, from);
        if from_balance < amount {
            return Err(DexError::InsufficientBalance);
        }
        if from == to {
            return Ok((from_balance, from_balance));
        }
        let new_from = from_balance.safe_sub(&amount)?;
        let new_to = self.balance_of(asset, to).safe_add(&amount)?;
        Ok((new_from, new_to))
    }
}

impl Ledger for MemoryLedger {
    fn balance_of(&self, asset: AssetId, holder: AccountId) -> Amount {
        self.balances
            .get(&(asset, holder))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn allowance(&self, asset: AssetId, owner: AccountId, spender: AccountId) -> Amount {
        self.allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or(Amount::ZERO)
    }

    fn transfer(
        &mut self,
        asset: AssetId,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        let (new_from, new_to) = self.plan_transfer(asset, from, to, amount)?;
        if from != to {
            self.set_balance(asset, from, new_from);
            self.set_balance(asset, to, new_to);
        }
        trace!(%asset, %from, %to, %amount, "ledger transfer");
        Ok(())
    }

    fn transfer_from(
        &mut self,
        asset: AssetId,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        let allowed = self.allowance(asset, owner, spender);
        if allowed < amount {
            return Err(DexError::InsufficientAllowance);
        }
        let (new_from, new_to) = self.plan_transfer(asset, owner, to, amount)?;
        if allowed != Amount::MAX {
            let remaining = allowed.safe_sub(&amount)?;
            self.allowances.insert((asset, owner, spender), remaining);
        }
        if owner != to {
            self.set_balance(asset, owner, new_from);
            self.set_balance(asset, to, new_to);
        }
        trace!(%asset, %spender, %owner, %to, %amount, "ledger transfer_from");
        Ok(())
    }

    fn approve(
        &mut self,
        asset: AssetId,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        if owner.is_null() || spender.is_null() {
            return Err(DexError::InvalidAccount);
        }
        self.allowances.insert((asset, owner, spender), amount);
        Ok(())
    }
}

impl MintableLedger for MemoryLedger {
    fn total_supply(&self, asset: AssetId) -> Amount {
        self.supply.get(&asset).copied().unwrap_or(Amount::ZERO)
    }

    fn mint(&mut self, asset: AssetId, to: AccountId, amount: Amount) -> Result<(), DexError> {
        if to.is_null() {
            return Err(DexError::InvalidAccount);
        }
        let supply = self.total_supply(asset).safe_add(&amount)?;
        let balance = self.balance_of(asset, to).safe_add(&amount)?;
        self.supply.insert(asset, supply);
        self.set_balance(asset, to, balance);
        Ok(())
    }

    fn burn(&mut self, asset: AssetId, from: AccountId, amount: Amount) -> Result<(), DexError> {
        let balance = self.balance_of(asset, from);
        if balance < amount {
            return Err(DexError::InsufficientBalance);
        }
        let supply = self.total_supply(asset).safe_sub(&amount)?;
        self.supply.insert(asset, supply);
        self.set_balance(asset, from, balance.safe_sub(&amount)?);
        Ok(())
    }
}
