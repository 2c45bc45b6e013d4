//! Constant Product pool engine (`x × y = k`).
//!
//! One pool owns the reserves of exactly two assets, issues and burns
//! proportional shares, and prices swaps with the constant-product
//! formula.  The 30 bp fee is deducted from the input **before** pricing
//! and stays in the reserves, so `k` grows with every trade.
//!
//! # Swap Algorithm (asset in → asset out)
//!
//! 1. `effective_in = floor(amount_in × 9 970 / 10 000)`
//! 2. `amount_out = floor(reserve_out × effective_in / (reserve_in + effective_in))`
//! 3. `reserve_in += amount_in` (fee stays in the pool)
//! 4. `reserve_out -= amount_out`
//!
//! # Invariant
//!
//! Step 2 rounds down, which is the same as keeping
//! `reserve_out' = ceil(k / (reserve_in + effective_in))`, so
//! `k_after ≥ k_before` holds for every swap.  The check is repeated on
//! the new reserves before they are committed.
//!
//! # Value movement
//!
//! [`deposit`](ConstantProductPool::deposit),
//! [`withdraw`](ConstantProductPool::withdraw) and
//! [`swap`](ConstantProductPool::swap) move assets through a
//! [`Ledger`] between the counterparty and the pool's own account.  Each
//! computes its full outcome and checks the ledger balances it needs
//! before the first transfer, so a failing call changes nothing.

use tracing::{debug, info};

use super::ShareBook;
use crate::domain::{AccountId, Amount, AssetId, PairKey, Rounding, TradingFee};
use crate::error::DexError;
use crate::math::{cmp_products, sqrt_product, CheckedArithmetic};
use crate::traits::Ledger;

/// Shares locked in the pool on the first deposit.
pub const MINIMUM_SHARES: Amount = Amount::new(1_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    A,
    B,
}

/// Outcome of a deposit, computed before any value moves.
#[derive(Debug, Clone, Copy)]
struct DepositPlan {
    /// Shares credited to the recipient.
    minted: Amount,
    /// Shares locked in the pool (first deposit only).
    locked: Amount,
    reserve_a: Amount,
    reserve_b: Amount,
}

/// A Constant Product pool (`x · y = k`) for one asset pair.
///
/// Created unbound by [`new`](Self::new) and bound once through
/// [`initialize`](Self::initialize).  The pair keeps the order it was
/// initialized with.
///
/// # State
///
/// - `reserve_a` / `reserve_b`: recorded balances of each asset (fees included)
/// - `shares`: holder balances, allowances and the locked reserve
///
/// # Example
///
/// ```rust
/// use hydra_dex::domain::{AccountId, Amount, AssetId};
/// use hydra_dex::ledger::MemoryLedger;
/// use hydra_dex::pools::ConstantProductPool;
/// use hydra_dex::traits::MintableLedger;
///
/// let usd = AssetId::from_bytes([1u8; 32]);
/// let eur = AssetId::from_bytes([2u8; 32]);
/// let lp = AccountId::from_bytes([10u8; 32]);
///
/// let mut ledger = MemoryLedger::new();
/// ledger.mint(usd, lp, Amount::new(500_000)).expect("mint");
/// ledger.mint(eur, lp, Amount::new(2_000_000)).expect("mint");
///
/// let mut pool = ConstantProductPool::new(AccountId::derived(*b"pool", 0));
/// pool.initialize(usd, eur).expect("bound");
/// pool.deposit(&mut ledger, lp, Amount::new(500_000), Amount::new(2_000_000), lp)
///     .expect("deposit");
///
/// let out = pool.quote_out(usd, Amount::new(250_000)).expect("quote");
/// assert_eq!(out, Amount::new(665_331));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantProductPool {
    account: AccountId,
    assets: Option<(AssetId, AssetId)>,
    fee: TradingFee,
    reserve_a: Amount,
    reserve_b: Amount,
    shares: ShareBook,
}

impl ConstantProductPool {
    /// Creates an unbound, empty pool whose holdings live in `account`.
    #[must_use]
    pub fn new(account: AccountId) -> Self {
        Self {
            account,
            assets: None,
            fee: TradingFee::STANDARD,
            reserve_a: Amount::ZERO,
            reserve_b: Amount::ZERO,
            shares: ShareBook::new(),
        }
    }

    /// Binds the pool to `(asset_a, asset_b)`, in that order.
    ///
    /// # Errors
    ///
    /// - [`DexError::AlreadyInitialized`] if the pool is already bound.
    /// - [`DexError::IdenticalAsset`] / [`DexError::InvalidAsset`] for an
    ///   invalid pair.
    pub fn initialize(&mut self, asset_a: AssetId, asset_b: AssetId) -> Result<(), DexError> {
        if self.assets.is_some() {
            return Err(DexError::AlreadyInitialized);
        }
        PairKey::new(asset_a, asset_b)?;
        self.assets = Some((asset_a, asset_b));
        Ok(())
    }

    /// Returns `true` once the pool is bound to a pair.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.assets.is_some()
    }

    /// The ledger account holding the pool's reserves.
    #[must_use]
    pub const fn account(&self) -> AccountId {
        self.account
    }

    /// The bound pair, in initialization order.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::PoolNotInitialized`] on an unbound pool.
    pub fn assets(&self) -> Result<(AssetId, AssetId), DexError> {
        self.assets.ok_or(DexError::PoolNotInitialized)
    }

    /// The trading fee charged on every swap.
    #[must_use]
    pub const fn fee(&self) -> TradingFee {
        self.fee
    }

    /// Returns `(reserve_a, reserve_b)`.
    pub const fn reserves(&self) -> (Amount, Amount) {
        (self.reserve_a, self.reserve_b)
    }

    /// Recorded reserve of `asset`.
    ///
    /// # Errors
    ///
    /// [`DexError::PoolNotInitialized`] or [`DexError::InvalidAsset`].
    pub fn reserve_of(&self, asset: AssetId) -> Result<Amount, DexError> {
        Ok(match self.side_of(asset)? {
            Side::A => self.reserve_a,
            Side::B => self.reserve_b,
        })
    }

    /// Outstanding shares, locked ones included.
    pub const fn total_shares(&self) -> Amount {
        self.shares.total()
    }

    /// Share balance of `holder`.  For the pool's own account this is the
    /// locked reserve.
    pub fn share_balance_of(&self, holder: AccountId) -> Amount {
        if holder == self.account {
            return self.shares.locked();
        }
        self.shares.balance_of(&holder)
    }

    /// Shares `spender` may move on behalf of `owner`.
    pub fn share_allowance(&self, owner: AccountId, spender: AccountId) -> Amount {
        self.shares.allowance(&owner, &spender)
    }

    /// `reserve_a × reserve_b`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the product exceeds `u128`.
    pub fn k(&self) -> Result<Amount, DexError> {
        self.reserve_a
            .safe_mul(&self.reserve_b)
            .map_err(|_| DexError::Overflow("k overflow"))
    }

    // -- pricing --------------------------------------------------------------

    fn side_of(&self, asset: AssetId) -> Result<Side, DexError> {
        let (a, b) = self.assets()?;
        if asset == a {
            Ok(Side::A)
        } else if asset == b {
            Ok(Side::B)
        } else {
            Err(DexError::InvalidAsset)
        }
    }

    /// `(reserve_in, reserve_out)` when `side` is sold.
    const fn oriented(&self, side: Side) -> (Amount, Amount) {
        match side {
            Side::A => (self.reserve_a, self.reserve_b),
            Side::B => (self.reserve_b, self.reserve_a),
        }
    }

    /// Output for selling `amount_in` of `asset_in`.
    ///
    /// Pure: reserves are not touched.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if `amount_in` is zero, or the
    ///   fee-adjusted input or the output rounds to zero.
    /// - [`DexError::InsufficientLiquidity`] if either reserve is zero.
    /// - [`DexError::InvalidAsset`] if `asset_in` is not in the pool.
    /// - [`DexError::PoolNotInitialized`] on an unbound pool.
    pub fn quote_out(&self, asset_in: AssetId, amount_in: Amount) -> Result<Amount, DexError> {
        let (reserve_in, reserve_out) = self.oriented(self.side_of(asset_in)?);
        self.compute_out(amount_in, reserve_in, reserve_out)
    }

    /// Smallest input that makes [`quote_out`](Self::quote_out) return at
    /// least `amount_out` of `asset_out`.
    ///
    /// Formula: `n = ceil(reserve_in × amount_out / (reserve_out − amount_out))`,
    /// then `amount_in = ceil(n × 10 000 / 9 970)`.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if `amount_out` is zero.
    /// - [`DexError::InsufficientLiquidity`] if a reserve is zero or
    ///   `amount_out ≥ reserve_out`.
    /// - [`DexError::InvalidAsset`] if `asset_out` is not in the pool.
    /// - [`DexError::PoolNotInitialized`] on an unbound pool.
    pub fn quote_in(&self, asset_out: AssetId, amount_out: Amount) -> Result<Amount, DexError> {
        let (reserve_out, reserve_in) = self.oriented(self.side_of(asset_out)?);
        if amount_out.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() || amount_out >= reserve_out {
            return Err(DexError::InsufficientLiquidity);
        }
        let remaining = reserve_out.safe_sub(&amount_out)?;
        let net = reserve_in.safe_mul_div(&amount_out, &remaining, Rounding::Up)?;
        self.fee.gross_for_net(net)
    }

    fn compute_out(
        &self,
        amount_in: Amount,
        reserve_in: Amount,
        reserve_out: Amount,
    ) -> Result<Amount, DexError> {
        if amount_in.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        let effective_in = self.fee.net_of_fee(amount_in)?;
        if effective_in.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        let denominator = reserve_in.safe_add(&effective_in)?;
        let amount_out = reserve_out.safe_mul_div(&effective_in, &denominator, Rounding::Down)?;
        if amount_out.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        Ok(amount_out)
    }

    /// New `(reserve_in, reserve_out)` after a trade, checked against `k`.
    fn plan_swap(
        &self,
        side: Side,
        amount_in: Amount,
        amount_out: Amount,
    ) -> Result<(Amount, Amount), DexError> {
        let (reserve_in, reserve_out) = self.oriented(side);
        let new_in = reserve_in.safe_add(&amount_in)?;
        let new_out = reserve_out
            .checked_sub(&amount_out)
            .ok_or(DexError::InsufficientLiquidity)?;
        if cmp_products(new_in.get(), new_out.get(), reserve_in.get(), reserve_out.get()).is_lt() {
            return Err(DexError::InvariantViolation);
        }
        Ok((new_in, new_out))
    }

    fn set_oriented(&mut self, side: Side, reserve_in: Amount, reserve_out: Amount) {
        match side {
            Side::A => {
                self.reserve_a = reserve_in;
                self.reserve_b = reserve_out;
            }
            Side::B => {
                self.reserve_b = reserve_in;
                self.reserve_a = reserve_out;
            }
        }
    }

    /// Applies a trade to the recorded reserves without moving value.
    ///
    /// The router runs this on scratch copies to simulate multi-hop routes
    /// before committing any of them.
    pub(crate) fn record_swap(
        &mut self,
        asset_in: AssetId,
        amount_in: Amount,
    ) -> Result<Amount, DexError> {
        let side = self.side_of(asset_in)?;
        let (reserve_in, reserve_out) = self.oriented(side);
        let amount_out = self.compute_out(amount_in, reserve_in, reserve_out)?;
        let (new_in, new_out) = self.plan_swap(side, amount_in, amount_out)?;
        self.set_oriented(side, new_in, new_out);
        Ok(amount_out)
    }

    /// Sells `amount_in` of `asset_in` from `payer` and sends the output
    /// to `recipient`.
    ///
    /// # Errors
    ///
    /// - Any error of [`quote_out`](Self::quote_out).
    /// - [`DexError::SlippageExceeded`] if the output is below
    ///   `amount_out_min`.
    /// - [`DexError::InvalidAccount`] if `recipient` is null.
    /// - [`DexError::InsufficientBalance`] if `payer` cannot cover
    ///   `amount_in`.
    /// - [`DexError::InvariantViolation`] if `k` would decrease.
    pub fn swap<L: Ledger>(
        &mut self,
        ledger: &mut L,
        payer: AccountId,
        asset_in: AssetId,
        amount_in: Amount,
        amount_out_min: Amount,
        recipient: AccountId,
    ) -> Result<Amount, DexError> {
        let side = self.side_of(asset_in)?;
        let (asset_a, asset_b) = self.assets()?;
        let asset_out = if side == Side::A { asset_b } else { asset_a };
        if recipient.is_null() {
            return Err(DexError::InvalidAccount);
        }

        let (reserve_in, reserve_out) = self.oriented(side);
        let amount_out = self.compute_out(amount_in, reserve_in, reserve_out)?;
        if amount_out < amount_out_min {
            return Err(DexError::SlippageExceeded {
                minimum: amount_out_min,
                actual: amount_out,
            });
        }
        let (new_in, new_out) = self.plan_swap(side, amount_in, amount_out)?;

        if ledger.balance_of(asset_in, payer) < amount_in
            || ledger.balance_of(asset_out, self.account) < amount_out
        {
            return Err(DexError::InsufficientBalance);
        }
        ledger.transfer(asset_in, payer, self.account, amount_in)?;
        ledger.transfer(asset_out, self.account, recipient, amount_out)?;
        self.set_oriented(side, new_in, new_out);

        debug!(
            pool = %self.account,
            %asset_in,
            %amount_in,
            %amount_out,
            "swap"
        );
        Ok(amount_out)
    }

    // -- liquidity ------------------------------------------------------------

    fn plan_deposit(&self, amount_a: Amount, amount_b: Amount) -> Result<DepositPlan, DexError> {
        self.assets()?;
        if amount_a.is_zero() || amount_b.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        let total = self.shares.total();
        let (minted, locked) = if total.is_zero() {
            let root = Amount::new(sqrt_product(amount_a.get(), amount_b.get()));
            let minted = root
                .checked_sub(&MINIMUM_SHARES)
                .ok_or(DexError::InsufficientLiquidity)?;
            (minted, MINIMUM_SHARES)
        } else {
            let share_a = amount_a.safe_mul_div(&total, &self.reserve_a, Rounding::Down)?;
            let share_b = amount_b.safe_mul_div(&total, &self.reserve_b, Rounding::Down)?;
            (share_a.min(share_b), Amount::ZERO)
        };
        if minted.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        let _new_total = total.safe_add(&minted)?.safe_add(&locked)?;
        Ok(DepositPlan {
            minted,
            locked,
            reserve_a: self.reserve_a.safe_add(&amount_a)?,
            reserve_b: self.reserve_b.safe_add(&amount_b)?,
        })
    }

    /// Shares a deposit of `(amount_a, amount_b)` would mint for the
    /// depositor.
    ///
    /// # Errors
    ///
    /// As [`deposit`](Self::deposit), minus the ledger checks.
    pub fn preview_deposit(&self, amount_a: Amount, amount_b: Amount) -> Result<Amount, DexError> {
        self.plan_deposit(amount_a, amount_b).map(|plan| plan.minted)
    }

    /// Pulls `(amount_a, amount_b)` from `payer` and mints shares to
    /// `recipient`.
    ///
    /// The first deposit mints `floor(sqrt(a × b))` shares and locks
    /// [`MINIMUM_SHARES`] of them in the pool.  Later deposits mint
    /// `floor(min(a × total / reserve_a, b × total / reserve_b))`.
    /// Reserves always grow by the full amounts.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if either amount is zero.
    /// - [`DexError::InsufficientLiquidity`] if no shares would be minted.
    /// - [`DexError::InvalidAccount`] if `recipient` is null or the pool.
    /// - [`DexError::InsufficientBalance`] if `payer` cannot cover both
    ///   amounts.
    /// - [`DexError::PoolNotInitialized`] on an unbound pool.
    pub fn deposit<L: Ledger>(
        &mut self,
        ledger: &mut L,
        payer: AccountId,
        amount_a: Amount,
        amount_b: Amount,
        recipient: AccountId,
    ) -> Result<Amount, DexError> {
        let (asset_a, asset_b) = self.assets()?;
        if recipient.is_null() || recipient == self.account {
            return Err(DexError::InvalidAccount);
        }
        let DepositPlan {
            minted,
            locked,
            reserve_a: new_a,
            reserve_b: new_b,
        } = self.plan_deposit(amount_a, amount_b)?;

        if ledger.balance_of(asset_a, payer) < amount_a
            || ledger.balance_of(asset_b, payer) < amount_b
        {
            return Err(DexError::InsufficientBalance);
        }
        ledger.transfer(asset_a, payer, self.account, amount_a)?;
        ledger.transfer(asset_b, payer, self.account, amount_b)?;

        if !locked.is_zero() {
            self.shares.lock(locked)?;
        }
        self.shares.mint(recipient, minted)?;
        self.reserve_a = new_a;
        self.reserve_b = new_b;

        info!(
            pool = %self.account,
            %amount_a,
            %amount_b,
            shares = %minted,
            "liquidity added"
        );
        Ok(minted)
    }

    /// Assets `shares` would redeem: `floor(shares × reserve_x / total)`.
    ///
    /// # Errors
    ///
    /// [`DexError::InsufficientLiquidity`] if `shares` is zero, exceeds
    /// the unlocked supply, or both outputs round to zero.
    pub fn preview_withdraw(&self, shares: Amount) -> Result<(Amount, Amount), DexError> {
        self.assets()?;
        let total = self.shares.total();
        let unlocked = total.safe_sub(&self.shares.locked())?;
        if shares.is_zero() || shares > unlocked {
            return Err(DexError::InsufficientLiquidity);
        }
        let out_a = shares.safe_mul_div(&self.reserve_a, &total, Rounding::Down)?;
        let out_b = shares.safe_mul_div(&self.reserve_b, &total, Rounding::Down)?;
        if out_a.is_zero() && out_b.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        Ok((out_a, out_b))
    }

    /// Burns `shares` of `owner` and pays the proportional reserves to
    /// `recipient`.
    ///
    /// When `spender != owner` the spender's share allowance is consumed.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientLiquidity`] if `shares` is zero, exceeds
    ///   `owner`'s balance, or both outputs round to zero.
    /// - [`DexError::InsufficientAllowance`] if the spender's allowance is
    ///   short.
    /// - [`DexError::InvalidAccount`] if `recipient` is null.
    /// - [`DexError::PoolNotInitialized`] on an unbound pool.
    pub fn withdraw<L: Ledger>(
        &mut self,
        ledger: &mut L,
        spender: AccountId,
        owner: AccountId,
        shares: Amount,
        recipient: AccountId,
    ) -> Result<(Amount, Amount), DexError> {
        let (asset_a, asset_b) = self.assets()?;
        if recipient.is_null() {
            return Err(DexError::InvalidAccount);
        }
        if shares > self.shares.balance_of(&owner) {
            return Err(DexError::InsufficientLiquidity);
        }
        let (out_a, out_b) = self.preview_withdraw(shares)?;
        self.shares.check_allowance(&owner, &spender, shares)?;
        let new_a = self.reserve_a.safe_sub(&out_a)?;
        let new_b = self.reserve_b.safe_sub(&out_b)?;

        if ledger.balance_of(asset_a, self.account) < out_a
            || ledger.balance_of(asset_b, self.account) < out_b
        {
            return Err(DexError::InsufficientBalance);
        }
        ledger.transfer(asset_a, self.account, recipient, out_a)?;
        ledger.transfer(asset_b, self.account, recipient, out_b)?;

        self.shares.spend_allowance(owner, spender, shares)?;
        self.shares.burn(owner, shares)?;
        self.reserve_a = new_a;
        self.reserve_b = new_b;

        info!(
            pool = %self.account,
            %shares,
            amount_a = %out_a,
            amount_b = %out_b,
            "liquidity removed"
        );
        Ok((out_a, out_b))
    }

    // -- shares ---------------------------------------------------------------

    fn ensure_holder(&self, account: AccountId) -> Result<(), DexError> {
        if account.is_null() || account == self.account {
            return Err(DexError::InvalidAccount);
        }
        Ok(())
    }

    /// Sets `spender`'s allowance over `owner`'s shares.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidAccount`] for a null or pool account,
    /// [`DexError::PoolNotInitialized`] on an unbound pool.
    pub fn approve_shares(
        &mut self,
        owner: AccountId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.assets()?;
        self.ensure_holder(owner)?;
        if spender.is_null() {
            return Err(DexError::InvalidAccount);
        }
        self.shares.approve(owner, spender, amount);
        Ok(())
    }

    /// Moves `amount` of `from`'s shares to `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::InvalidAccount`] if either side is null or the pool,
    /// [`DexError::InsufficientBalance`] if `from` holds less.
    pub fn transfer_shares(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.assets()?;
        self.ensure_holder(from)?;
        self.ensure_holder(to)?;
        self.shares.transfer(from, to, amount)
    }

    /// Moves `amount` of `owner`'s shares to `to` on behalf of `spender`.
    ///
    /// # Errors
    ///
    /// As [`transfer_shares`](Self::transfer_shares), plus
    /// [`DexError::InsufficientAllowance`].
    pub fn transfer_shares_from(
        &mut self,
        spender: AccountId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.assets()?;
        self.ensure_holder(owner)?;
        self.ensure_holder(to)?;
        if self.shares.balance_of(&owner) < amount {
            return Err(DexError::InsufficientBalance);
        }
        self.shares.spend_allowance(owner, spender, amount)?;
        self.shares.transfer(owner, to, amount)
    }
}
