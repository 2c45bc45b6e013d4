//! The DEX router.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::LiquidityReceipt;
use crate::config::RouterConfig;
use crate::domain::{AccountId, Amount, AssetId, CallContext, Rounding, SwapPath};
use crate::error::DexError;
use crate::math::CheckedArithmetic;
use crate::native::NativeAdapter;
use crate::pools::ConstantProductPool;
use crate::registry::{PoolId, PoolRegistry};
use crate::traits::MintableLedger;

/// Pools and per-step amounts of a simulated route.
///
/// `amounts[0]` is the input; `amounts[i + 1]` is the output of hop `i`.
#[derive(Debug)]
struct Route {
    pools: Vec<PoolId>,
    amounts: Vec<Amount>,
}

impl Route {
    fn amount_out(&self) -> Amount {
        self.amounts.last().copied().unwrap_or(Amount::ZERO)
    }
}

/// Entry point for pool creation, liquidity and swaps.
///
/// The router owns the [`PoolRegistry`] and the ledger handle.  Every
/// public operation is all-or-nothing: validation, pool simulation and
/// ledger balance/allowance checks run before the first value moves, so
/// an `Err` leaves reserves, shares and balances untouched.
///
/// Callers approve the router's account (see
/// [`RouterConfig::router_account`]) on the ledger for the assets it pulls,
/// and on a pool's shares before removing liquidity.
///
/// # Example
///
/// ```rust
/// use hydra_dex::config::RouterConfig;
/// use hydra_dex::domain::{AccountId, Amount, AssetId, CallContext};
/// use hydra_dex::ledger::MemoryLedger;
/// use hydra_dex::router::Router;
/// use hydra_dex::traits::{Ledger, MintableLedger};
///
/// let router_account = AccountId::from_bytes([0xa0; 32]);
/// let config = RouterConfig::new(
///     router_account,
///     AssetId::from_bytes([0xee; 32]),
///     AssetId::from_bytes([0xef; 32]),
///     AccountId::from_bytes([0xa1; 32]),
/// )
/// .expect("valid config");
///
/// let usd = AssetId::from_bytes([1u8; 32]);
/// let eur = AssetId::from_bytes([2u8; 32]);
/// let alice = AccountId::from_bytes([10u8; 32]);
///
/// let mut ledger = MemoryLedger::new();
/// for asset in [usd, eur] {
///     ledger.mint(asset, alice, Amount::new(10_000_000)).expect("mint");
///     ledger.approve(asset, alice, router_account, Amount::MAX).expect("approve");
/// }
///
/// let mut router = Router::new(config, ledger).expect("router");
/// router.create_pool(usd, eur).expect("pool");
///
/// let ctx = CallContext::new(alice, 100);
/// router
///     .add_liquidity(ctx, usd, eur, Amount::new(550_000), Amount::new(2_200_000), alice, 100)
///     .expect("liquidity");
///
/// let amounts = router
///     .swap(ctx, Amount::new(20_000), Amount::new(76_000), &[usd, eur], alice, 100)
///     .expect("swap");
/// assert_eq!(amounts, vec![Amount::new(20_000), Amount::new(76_969)]);
/// ```
#[derive(Debug, Clone)]
pub struct Router<L> {
    config: RouterConfig,
    ledger: L,
    registry: PoolRegistry,
    adapter: NativeAdapter,
}

impl<L: MintableLedger> Router<L> {
    /// Creates a router with an empty registry over `ledger`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidConfiguration`] if `config` is invalid.
    pub fn new(config: RouterConfig, ledger: L) -> Result<Self, DexError> {
        config.validate()?;
        Ok(Self {
            adapter: NativeAdapter::from_config(&config),
            config,
            ledger,
            registry: PoolRegistry::new(),
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Returns the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Returns the ledger mutably, for funding and approvals.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    /// Returns the registry.
    #[must_use]
    pub const fn registry(&self) -> &PoolRegistry {
        &self.registry
    }

    /// Returns the native adapter.
    #[must_use]
    pub const fn adapter(&self) -> &NativeAdapter {
        &self.adapter
    }

    /// The wrapped native asset.
    #[must_use]
    pub const fn wrapped_native(&self) -> AssetId {
        self.config.wrapped_native()
    }

    // -- registry -------------------------------------------------------------

    /// Creates the pool for `(x, y)`, bound in that order.
    ///
    /// # Errors
    ///
    /// - [`DexError::IdenticalAsset`] if `x == y`.
    /// - [`DexError::InvalidAsset`] if either is null or the raw native coin.
    /// - [`DexError::PoolExists`] if a pool exists for the pair in either
    ///   order.
    pub fn create_pool(&mut self, x: AssetId, y: AssetId) -> Result<PoolId, DexError> {
        self.check_pair(x, y)?;
        self.registry.create(x, y)
    }

    /// Returns the pool for the unordered pair, if any.
    #[must_use]
    pub fn get_pool(&self, x: AssetId, y: AssetId) -> Option<PoolId> {
        self.registry.lookup(x, y)
    }

    /// Returns the pool with the given id.
    #[must_use]
    pub fn pool(&self, id: PoolId) -> Option<&ConstantProductPool> {
        self.registry.get(id)
    }

    /// Number of pools ever created.
    #[must_use]
    pub fn all_pools_length(&self) -> usize {
        self.registry.len()
    }

    /// The `index`-th pool ever created.
    #[must_use]
    pub fn all_pools(&self, index: usize) -> Option<PoolId> {
        self.registry.at(index)
    }

    // -- validation -----------------------------------------------------------

    fn check_asset(&self, asset: AssetId) -> Result<(), DexError> {
        if asset.is_null() || asset == self.config.native_asset() {
            return Err(DexError::InvalidAsset);
        }
        Ok(())
    }

    fn check_pair(&self, x: AssetId, y: AssetId) -> Result<(), DexError> {
        if x == y {
            return Err(DexError::IdenticalAsset);
        }
        self.check_asset(x)?;
        self.check_asset(y)
    }

    fn check_deadline(ctx: &CallContext, deadline: u64) -> Result<(), DexError> {
        ctx.ensure_not_expired(deadline).map_err(|err| {
            warn!(
                caller = %ctx.caller(),
                deadline,
                now = ctx.timestamp(),
                "request rejected: deadline passed"
            );
            err
        })
    }

    fn check_minimum(actual: Amount, minimum: Amount) -> Result<(), DexError> {
        if actual < minimum {
            warn!(%actual, %minimum, "request rejected: slippage");
            return Err(DexError::SlippageExceeded { minimum, actual });
        }
        Ok(())
    }

    fn check_recipient(recipient: AccountId) -> Result<(), DexError> {
        if recipient.is_null() {
            return Err(DexError::InvalidAccount);
        }
        Ok(())
    }

    /// Fails unless the router can pull `amount` of `asset` from `owner`.
    fn check_pull(&self, asset: AssetId, owner: AccountId, amount: Amount) -> Result<(), DexError> {
        if self.ledger.balance_of(asset, owner) < amount {
            return Err(DexError::InsufficientBalance);
        }
        if self
            .ledger
            .allowance(asset, owner, self.config.router_account())
            < amount
        {
            return Err(DexError::InsufficientAllowance);
        }
        Ok(())
    }

    fn pull(&mut self, asset: AssetId, owner: AccountId, amount: Amount) -> Result<(), DexError> {
        let router = self.config.router_account();
        self.ledger
            .transfer_from(asset, router, owner, router, amount)
    }

    fn pool_ref(&self, id: PoolId) -> Result<&ConstantProductPool, DexError> {
        self.registry.get(id).ok_or(DexError::PoolDoesNotExist)
    }

    /// Maps amounts given in `(first, other)` order onto the pool's
    /// `(a, b)` order.
    fn orient(
        pool: &ConstantProductPool,
        first: AssetId,
        amount_first: Amount,
        amount_other: Amount,
    ) -> Result<(Amount, Amount), DexError> {
        let (asset_a, _) = pool.assets()?;
        if asset_a == first {
            Ok((amount_first, amount_other))
        } else {
            Ok((amount_other, amount_first))
        }
    }

    // -- liquidity ------------------------------------------------------------

    /// Deposits `amount_x` of `x` and `amount_y` of `y` from the caller and
    /// mints shares to `recipient`.
    ///
    /// Both amounts are used in full; the pool never auto-creates.
    ///
    /// # Errors
    ///
    /// - [`DexError::DeadlinePassed`] if `deadline < ctx.timestamp()`.
    /// - [`DexError::IdenticalAsset`] / [`DexError::InvalidAsset`] for a
    ///   bad pair.
    /// - [`DexError::InsufficientAmount`] if either amount is zero.
    /// - [`DexError::PoolDoesNotExist`] if the pair has no pool.
    /// - [`DexError::InsufficientLiquidity`] if no shares would be minted.
    /// - [`DexError::InsufficientBalance`] / [`DexError::InsufficientAllowance`]
    ///   if the router cannot pull the amounts.
    #[allow(clippy::too_many_arguments)]
    pub fn add_liquidity(
        &mut self,
        ctx: CallContext,
        x: AssetId,
        y: AssetId,
        amount_x: Amount,
        amount_y: Amount,
        recipient: AccountId,
        deadline: u64,
    ) -> Result<LiquidityReceipt, DexError> {
        Self::check_deadline(&ctx, deadline)?;
        self.check_pair(x, y)?;
        if amount_x.is_zero() || amount_y.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        Self::check_recipient(recipient)?;
        let id = self.registry.resolve(x, y)?;

        let pool = self.pool_ref(id)?;
        let (amount_a, amount_b) = Self::orient(pool, x, amount_x, amount_y)?;
        let _shares = pool.preview_deposit(amount_a, amount_b)?;
        if recipient == pool.account() {
            return Err(DexError::InvalidAccount);
        }
        let caller = ctx.caller();
        self.check_pull(x, caller, amount_x)?;
        self.check_pull(y, caller, amount_y)?;

        self.pull(x, caller, amount_x)?;
        self.pull(y, caller, amount_y)?;
        let router = self.config.router_account();
        let pool = self
            .registry
            .get_mut(id)
            .ok_or(DexError::PoolDoesNotExist)?;
        let shares = pool.deposit(&mut self.ledger, router, amount_a, amount_b, recipient)?;

        info!(%id, %caller, %amount_x, %amount_y, %shares, "add_liquidity");
        Ok(LiquidityReceipt::new(amount_x, amount_y, shares))
    }

    /// Deposits `asset` against the native coin, wrapped through the
    /// adapter.
    ///
    /// `native_amount` is the most native coin the caller offers.  On a
    /// pool with reserves only the ratio-matching portion is used: the
    /// native side is `floor(amount_desired × r_native / r_asset)` if that
    /// fits, otherwise the asset side shrinks to
    /// `floor(native_amount × r_asset / r_native)`.  The unused remainder
    /// never leaves the caller.  On an empty pool both amounts are used as
    /// given.
    ///
    /// The receipt reports `(asset, native)` amounts.
    ///
    /// # Errors
    ///
    /// As [`add_liquidity`](Self::add_liquidity); [`DexError::IdenticalAsset`]
    /// if `asset` is the wrapped native asset itself.
    pub fn add_liquidity_native(
        &mut self,
        ctx: CallContext,
        asset: AssetId,
        amount_desired: Amount,
        recipient: AccountId,
        deadline: u64,
        native_amount: Amount,
    ) -> Result<LiquidityReceipt, DexError> {
        Self::check_deadline(&ctx, deadline)?;
        let wrapped = self.config.wrapped_native();
        self.check_pair(asset, wrapped)?;
        if amount_desired.is_zero() || native_amount.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        Self::check_recipient(recipient)?;
        let id = self.registry.resolve(asset, wrapped)?;

        let pool = self.pool_ref(id)?;
        let reserve_asset = pool.reserve_of(asset)?;
        let reserve_native = pool.reserve_of(wrapped)?;
        let (used_asset, used_native) = if reserve_asset.is_zero() && reserve_native.is_zero() {
            (amount_desired, native_amount)
        } else {
            let optimal_native =
                amount_desired.safe_mul_div(&reserve_native, &reserve_asset, Rounding::Down)?;
            if optimal_native <= native_amount {
                (amount_desired, optimal_native)
            } else {
                let optimal_asset =
                    native_amount.safe_mul_div(&reserve_asset, &reserve_native, Rounding::Down)?;
                (optimal_asset, native_amount)
            }
        };
        let (amount_a, amount_b) = Self::orient(pool, asset, used_asset, used_native)?;
        let _shares = pool.preview_deposit(amount_a, amount_b)?;
        if recipient == pool.account() {
            return Err(DexError::InvalidAccount);
        }
        let caller = ctx.caller();
        self.check_pull(asset, caller, used_asset)?;
        if self.ledger.balance_of(self.config.native_asset(), caller) < used_native {
            return Err(DexError::InsufficientBalance);
        }

        let router = self.config.router_account();
        self.pull(asset, caller, used_asset)?;
        self.adapter
            .deposit(&mut self.ledger, caller, router, used_native)?;
        let pool = self
            .registry
            .get_mut(id)
            .ok_or(DexError::PoolDoesNotExist)?;
        let shares = pool.deposit(&mut self.ledger, router, amount_a, amount_b, recipient)?;

        info!(
            %id,
            %caller,
            amount = %used_asset,
            native = %used_native,
            %shares,
            "add_liquidity_native"
        );
        Ok(LiquidityReceipt::new(used_asset, used_native, shares))
    }

    /// Burns `shares` of the caller's `(x, y)` shares and pays the
    /// proportional reserves to `recipient`.
    ///
    /// The router withdraws as spender, so the caller must have approved
    /// it on the pool's shares.  Returns `(amount_x, amount_y)`.
    ///
    /// # Errors
    ///
    /// - [`DexError::DeadlinePassed`], bad pair errors as
    ///   [`add_liquidity`](Self::add_liquidity).
    /// - [`DexError::PoolDoesNotExist`] if the pair has no pool.
    /// - [`DexError::InsufficientLiquidity`] if `shares` is zero or exceeds
    ///   the caller's balance.
    /// - [`DexError::InsufficientAllowance`] without a share approval.
    pub fn remove_liquidity(
        &mut self,
        ctx: CallContext,
        x: AssetId,
        y: AssetId,
        shares: Amount,
        recipient: AccountId,
        deadline: u64,
    ) -> Result<(Amount, Amount), DexError> {
        Self::check_deadline(&ctx, deadline)?;
        self.check_pair(x, y)?;
        Self::check_recipient(recipient)?;
        let id = self.registry.resolve(x, y)?;
        let caller = ctx.caller();
        let router = self.config.router_account();

        let pool = self
            .registry
            .get_mut(id)
            .ok_or(DexError::PoolDoesNotExist)?;
        if shares.is_zero() || shares > pool.share_balance_of(caller) {
            return Err(DexError::InsufficientLiquidity);
        }
        let (out_a, out_b) = pool.withdraw(&mut self.ledger, router, caller, shares, recipient)?;
        let (amount_x, amount_y) = Self::orient(pool, x, out_a, out_b)?;

        info!(%id, %caller, %shares, %amount_x, %amount_y, "remove_liquidity");
        Ok((amount_x, amount_y))
    }

    /// Like [`remove_liquidity`](Self::remove_liquidity) for an
    /// `(asset, native)` pool; the native side is unwrapped before it is
    /// paid.  Returns `(amount_asset, amount_native)`.
    ///
    /// # Errors
    ///
    /// As [`remove_liquidity`](Self::remove_liquidity).
    pub fn remove_liquidity_native(
        &mut self,
        ctx: CallContext,
        asset: AssetId,
        shares: Amount,
        recipient: AccountId,
        deadline: u64,
    ) -> Result<(Amount, Amount), DexError> {
        Self::check_deadline(&ctx, deadline)?;
        let wrapped = self.config.wrapped_native();
        self.check_pair(asset, wrapped)?;
        Self::check_recipient(recipient)?;
        let id = self.registry.resolve(asset, wrapped)?;
        let caller = ctx.caller();
        let router = self.config.router_account();

        let pool = self.pool_ref(id)?;
        if shares.is_zero() || shares > pool.share_balance_of(caller) {
            return Err(DexError::InsufficientLiquidity);
        }
        let (preview_a, preview_b) = pool.preview_withdraw(shares)?;
        let (_, preview_native) = Self::orient(pool, asset, preview_a, preview_b)?;
        self.adapter.ensure_backed(&self.ledger, preview_native)?;

        let pool = self
            .registry
            .get_mut(id)
            .ok_or(DexError::PoolDoesNotExist)?;
        let (out_a, out_b) = pool.withdraw(&mut self.ledger, router, caller, shares, router)?;
        let (amount_asset, amount_native) = Self::orient(pool, asset, out_a, out_b)?;

        self.ledger
            .transfer(asset, router, recipient, amount_asset)?;
        if !amount_native.is_zero() {
            self.adapter
                .withdraw(&mut self.ledger, router, recipient, amount_native)?;
        }

        info!(
            %id,
            %caller,
            %shares,
            amount = %amount_asset,
            native = %amount_native,
            "remove_liquidity_native"
        );
        Ok((amount_asset, amount_native))
    }

    // -- shares ---------------------------------------------------------------

    /// Lets `spender` move up to `amount` of the caller's shares in `pool`.
    ///
    /// # Errors
    ///
    /// [`DexError::PoolDoesNotExist`] for an unknown id, otherwise as
    /// [`ConstantProductPool::approve_shares`].
    pub fn approve_shares(
        &mut self,
        ctx: CallContext,
        pool: PoolId,
        spender: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.registry
            .get_mut(pool)
            .ok_or(DexError::PoolDoesNotExist)?
            .approve_shares(ctx.caller(), spender, amount)
    }

    /// Moves `amount` of the caller's shares in `pool` to `to`.
    ///
    /// # Errors
    ///
    /// [`DexError::PoolDoesNotExist`] for an unknown id, otherwise as
    /// [`ConstantProductPool::transfer_shares`].
    pub fn transfer_shares(
        &mut self,
        ctx: CallContext,
        pool: PoolId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.registry
            .get_mut(pool)
            .ok_or(DexError::PoolDoesNotExist)?
            .transfer_shares(ctx.caller(), to, amount)
    }

    /// Moves `amount` of `owner`'s shares in `pool` to `to`, spending the
    /// caller's allowance.
    ///
    /// # Errors
    ///
    /// [`DexError::PoolDoesNotExist`] for an unknown id, otherwise as
    /// [`ConstantProductPool::transfer_shares_from`].
    pub fn transfer_shares_from(
        &mut self,
        ctx: CallContext,
        pool: PoolId,
        owner: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.registry
            .get_mut(pool)
            .ok_or(DexError::PoolDoesNotExist)?
            .transfer_shares_from(ctx.caller(), owner, to, amount)
    }

    // -- quotes ---------------------------------------------------------------

    /// Per-step amounts of selling `amount_in` along `path`.
    ///
    /// Each hop is quoted against the pool's current reserves.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidPath`] if `path` has fewer than two assets.
    /// - [`DexError::PoolDoesNotExist`] for a missing hop.
    /// - Any error of [`ConstantProductPool::quote_out`].
    pub fn get_amounts_out(
        &self,
        amount_in: Amount,
        path: &[AssetId],
    ) -> Result<Vec<Amount>, DexError> {
        let path = SwapPath::try_from(path)?;
        let mut amounts = Vec::with_capacity(path.assets().len());
        amounts.push(amount_in);
        let mut current = amount_in;
        for (asset_in, asset_out) in path.hops() {
            let id = self.registry.resolve(asset_in, asset_out)?;
            current = self.pool_ref(id)?.quote_out(asset_in, current)?;
            amounts.push(current);
        }
        debug!(hops = path.hop_count(), %amount_in, amount_out = %current, "quoted amounts out");
        Ok(amounts)
    }

    /// Output of selling `amount_in` along `path`.
    ///
    /// # Errors
    ///
    /// As [`get_amounts_out`](Self::get_amounts_out).
    pub fn get_amount_out(&self, amount_in: Amount, path: &[AssetId]) -> Result<Amount, DexError> {
        let amounts = self.get_amounts_out(amount_in, path)?;
        amounts.last().copied().ok_or(DexError::InvalidPath)
    }

    /// Per-step inputs needed to receive `amount_out` at the end of `path`.
    ///
    /// Walks the path backwards, rounding up at every hop.
    ///
    /// # Errors
    ///
    /// - [`DexError::InvalidPath`] if `path` has fewer than two assets.
    /// - [`DexError::PoolDoesNotExist`] for a missing hop.
    /// - Any error of [`ConstantProductPool::quote_in`].
    pub fn get_amounts_in(
        &self,
        amount_out: Amount,
        path: &[AssetId],
    ) -> Result<Vec<Amount>, DexError> {
        let path = SwapPath::try_from(path)?;
        let mut amounts = vec![Amount::ZERO; path.assets().len()];
        let mut current = amount_out;
        let mut index = amounts.len() - 1;
        amounts[index] = current;
        for (asset_in, asset_out) in path.hops().rev() {
            let id = self.registry.resolve(asset_in, asset_out)?;
            current = self.pool_ref(id)?.quote_in(asset_out, current)?;
            index -= 1;
            amounts[index] = current;
        }
        debug!(hops = path.hop_count(), amount_in = %current, %amount_out, "quoted amounts in");
        Ok(amounts)
    }

    /// Input needed to receive `amount_out` at the end of `path`.
    ///
    /// # Errors
    ///
    /// As [`get_amounts_in`](Self::get_amounts_in).
    pub fn get_amount_in(&self, amount_out: Amount, path: &[AssetId]) -> Result<Amount, DexError> {
        let amounts = self.get_amounts_in(amount_out, path)?;
        amounts.first().copied().ok_or(DexError::InvalidPath)
    }

    /// Amount of `asset_out` matching `amount` of `asset_in` at the pool's
    /// current ratio: `floor(amount × r_out / r_in)`, no fee.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAmount`] if `amount` is zero.
    /// - [`DexError::PoolDoesNotExist`] if the pair has no pool.
    /// - [`DexError::InsufficientLiquidity`] if the pool is empty.
    pub fn quote_liquidity(
        &self,
        asset_in: AssetId,
        asset_out: AssetId,
        amount: Amount,
    ) -> Result<Amount, DexError> {
        if amount.is_zero() {
            return Err(DexError::InsufficientAmount);
        }
        let pool = self.pool_ref(self.registry.resolve(asset_in, asset_out)?)?;
        let reserve_in = pool.reserve_of(asset_in)?;
        let reserve_out = pool.reserve_of(asset_out)?;
        if reserve_in.is_zero() || reserve_out.is_zero() {
            return Err(DexError::InsufficientLiquidity);
        }
        amount.safe_mul_div(&reserve_out, &reserve_in, Rounding::Down)
    }

    // -- swaps ----------------------------------------------------------------

    /// Resolves every hop of `path` and runs it on scratch copies of the
    /// touched pools, so a path that revisits a pool sees its own effect.
    fn simulate(&self, path: &SwapPath, amount_in: Amount) -> Result<Route, DexError> {
        let mut scratch: HashMap<PoolId, ConstantProductPool> = HashMap::new();
        let mut pools = Vec::with_capacity(path.hop_count());
        let mut amounts = Vec::with_capacity(path.assets().len());
        amounts.push(amount_in);
        let mut current = amount_in;
        for (asset_in, asset_out) in path.hops() {
            let id = self.registry.resolve(asset_in, asset_out)?;
            let pool = match scratch.entry(id) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(self.pool_ref(id)?.clone()),
            };
            current = pool.record_swap(asset_in, current)?;
            pools.push(id);
            amounts.push(current);
        }
        Ok(Route { pools, amounts })
    }

    /// Executes a simulated route from the router's account, delivering
    /// the final output to `recipient`.  Returns the amount delivered.
    fn execute(
        &mut self,
        path: &SwapPath,
        route: &Route,
        recipient: AccountId,
    ) -> Result<Amount, DexError> {
        let router = self.config.router_account();
        let last = route.pools.len().saturating_sub(1);
        let mut delivered = route.amounts[0];
        for (step, ((asset_in, _), id)) in path.hops().zip(&route.pools).enumerate() {
            let to = if step == last { recipient } else { router };
            let pool = self
                .registry
                .get_mut(*id)
                .ok_or(DexError::PoolDoesNotExist)?;
            delivered = pool.swap(
                &mut self.ledger,
                router,
                asset_in,
                delivered,
                route.amounts[step + 1],
                to,
            )?;
        }
        Ok(delivered)
    }

    /// Sells exactly `amount_in` of `path[0]` from the caller along `path`
    /// and sends the output to `recipient`.
    ///
    /// Returns the per-step amounts.
    ///
    /// # Errors
    ///
    /// - [`DexError::DeadlinePassed`] if `deadline < ctx.timestamp()`.
    /// - [`DexError::InvalidPath`] if `path` has fewer than two assets.
    /// - [`DexError::PoolDoesNotExist`] for a missing hop.
    /// - [`DexError::SlippageExceeded`] if the final output is below
    ///   `amount_out_min`.
    /// - [`DexError::InsufficientBalance`] / [`DexError::InsufficientAllowance`]
    ///   if the router cannot pull `amount_in`.
    pub fn swap(
        &mut self,
        ctx: CallContext,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &[AssetId],
        recipient: AccountId,
        deadline: u64,
    ) -> Result<Vec<Amount>, DexError> {
        Self::check_deadline(&ctx, deadline)?;
        let path = SwapPath::try_from(path)?;
        Self::check_recipient(recipient)?;
        let route = self.simulate(&path, amount_in)?;
        Self::check_minimum(route.amount_out(), amount_out_min)?;
        let caller = ctx.caller();
        self.check_pull(path.first(), caller, amount_in)?;

        self.pull(path.first(), caller, amount_in)?;
        let amount_out = self.execute(&path, &route, recipient)?;

        info!(%caller, hops = path.hop_count(), %amount_in, %amount_out, "swap");
        Ok(route.amounts)
    }

    /// Wraps `native_amount` of the caller's native coin and sells it along
    /// `path`, which must start at the wrapped native asset.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap); [`DexError::InvalidPath`] if `path` does
    /// not start at the wrapped native asset.
    pub fn swap_native_for_assets(
        &mut self,
        ctx: CallContext,
        native_amount: Amount,
        amount_out_min: Amount,
        path: &[AssetId],
        recipient: AccountId,
        deadline: u64,
    ) -> Result<Vec<Amount>, DexError> {
        Self::check_deadline(&ctx, deadline)?;
        let path = SwapPath::try_from(path)?;
        if path.first() != self.config.wrapped_native() {
            return Err(DexError::InvalidPath);
        }
        Self::check_recipient(recipient)?;
        let route = self.simulate(&path, native_amount)?;
        Self::check_minimum(route.amount_out(), amount_out_min)?;
        let caller = ctx.caller();
        if self.ledger.balance_of(self.config.native_asset(), caller) < native_amount {
            return Err(DexError::InsufficientBalance);
        }

        let router = self.config.router_account();
        self.adapter
            .deposit(&mut self.ledger, caller, router, native_amount)?;
        let amount_out = self.execute(&path, &route, recipient)?;

        info!(
            %caller,
            hops = path.hop_count(),
            native_in = %native_amount,
            %amount_out,
            "swap_native_for_assets"
        );
        Ok(route.amounts)
    }

    /// Sells `amount_in` of `path[0]` along `path`, which must end at the
    /// wrapped native asset, and pays the unwrapped native coin to
    /// `recipient`.
    ///
    /// # Errors
    ///
    /// As [`swap`](Self::swap); [`DexError::InvalidPath`] if `path` does
    /// not end at the wrapped native asset.
    pub fn swap_assets_for_native(
        &mut self,
        ctx: CallContext,
        amount_in: Amount,
        amount_out_min: Amount,
        path: &[AssetId],
        recipient: AccountId,
        deadline: u64,
    ) -> Result<Vec<Amount>, DexError> {
        Self::check_deadline(&ctx, deadline)?;
        let path = SwapPath::try_from(path)?;
        if path.last() != self.config.wrapped_native() {
            return Err(DexError::InvalidPath);
        }
        Self::check_recipient(recipient)?;
        let route = self.simulate(&path, amount_in)?;
        Self::check_minimum(route.amount_out(), amount_out_min)?;
        let caller = ctx.caller();
        self.check_pull(path.first(), caller, amount_in)?;
        self.adapter.ensure_backed(&self.ledger, route.amount_out())?;

        let router = self.config.router_account();
        self.pull(path.first(), caller, amount_in)?;
        let native_out = self.execute(&path, &route, router)?;
        self.adapter
            .withdraw(&mut self.ledger, router, recipient, native_out)?;

        info!(
            %caller,
            hops = path.hop_count(),
            %amount_in,
            %native_out,
            "swap_assets_for_native"
        );
        Ok(route.amounts)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::ledger::MemoryLedger;
    use crate::pools::MINIMUM_SHARES;
    use crate::traits::Ledger;

    // -- helpers --------------------------------------------------------------

    const ROUTER: AccountId = AccountId::from_bytes([0xa0; 32]);
    const ADAPTER: AccountId = AccountId::from_bytes([0xa1; 32]);
    const ALICE: AccountId = AccountId::from_bytes([0x10; 32]);
    const BOB: AccountId = AccountId::from_bytes([0x11; 32]);
    const NATIVE: AssetId = AssetId::from_bytes([0xee; 32]);
    const WRAPPED: AssetId = AssetId::from_bytes([0xef; 32]);
    const USD: AssetId = AssetId::from_bytes([1u8; 32]);
    const EUR: AssetId = AssetId::from_bytes([2u8; 32]);
    const GBP: AssetId = AssetId::from_bytes([3u8; 32]);

    const NOW: u64 = 1_000;
    const FUNDS: u128 = 1_000_000_000_000;

    fn ctx(caller: AccountId) -> CallContext {
        CallContext::new(caller, NOW)
    }

    fn router() -> Router<MemoryLedger> {
        let Ok(config) = RouterConfig::new(ROUTER, NATIVE, WRAPPED, ADAPTER) else {
            panic!("valid config");
        };
        let mut ledger = MemoryLedger::new();
        for who in [ALICE, BOB] {
            for asset in [USD, EUR, GBP, NATIVE] {
                let Ok(()) = ledger.mint(asset, who, Amount::new(FUNDS)) else {
                    panic!("mint failed");
                };
                let Ok(()) = ledger.approve(asset, who, ROUTER, Amount::MAX) else {
                    panic!("approve failed");
                };
            }
        }
        let Ok(router) = Router::new(config, ledger) else {
            panic!("valid router");
        };
        router
    }

    fn with_pool(x: AssetId, y: AssetId, rx: u128, ry: u128) -> (Router<MemoryLedger>, PoolId) {
        let mut router = router();
        let id = seed(&mut router, x, y, rx, ry);
        (router, id)
    }

    fn seed(router: &mut Router<MemoryLedger>, x: AssetId, y: AssetId, rx: u128, ry: u128) -> PoolId {
        let Ok(id) = router.create_pool(x, y) else {
            panic!("create failed");
        };
        let Ok(_) = router.add_liquidity(ctx(ALICE), x, y, Amount::new(rx), Amount::new(ry), ALICE, NOW)
        else {
            panic!("seed failed");
        };
        id
    }

    fn reserves(router: &Router<MemoryLedger>, id: PoolId) -> (Amount, Amount) {
        let Some(pool) = router.pool(id) else {
            panic!("pool exists");
        };
        pool.reserves()
    }

    // -- create_pool ----------------------------------------------------------

    #[test]
    fn create_pool_rejects_duplicate_in_either_order() {
        let mut router = router();
        let Ok(id) = router.create_pool(USD, EUR) else {
            panic!("expected Ok");
        };
        assert_eq!(router.create_pool(EUR, USD), Err(DexError::PoolExists));
        assert_eq!(router.get_pool(EUR, USD), Some(id));
        assert_eq!(router.all_pools_length(), 1);
        assert_eq!(router.all_pools(0), Some(id));
    }

    #[test]
    fn create_pool_rejects_bad_assets() {
        let mut router = router();
        assert_eq!(router.create_pool(USD, USD), Err(DexError::IdenticalAsset));
        assert_eq!(router.create_pool(USD, AssetId::NULL), Err(DexError::InvalidAsset));
        assert_eq!(router.create_pool(NATIVE, USD), Err(DexError::InvalidAsset));
        let Ok(_) = router.create_pool(WRAPPED, USD) else {
            panic!("wrapped native is poolable");
        };
    }

    // -- add_liquidity --------------------------------------------------------

    #[test]
    fn add_liquidity_after_deadline_changes_nothing() {
        let mut router = router();
        let Ok(id) = router.create_pool(USD, EUR) else {
            panic!("expected Ok");
        };
        let ledger_before = router.ledger().clone();
        let result = router.add_liquidity(
            ctx(ALICE),
            USD,
            EUR,
            Amount::new(10_000),
            Amount::new(10_000),
            ALICE,
            NOW - 1,
        );
        assert_eq!(result, Err(DexError::DeadlinePassed));
        assert_eq!(router.ledger(), &ledger_before);
        assert_eq!(reserves(&router, id), (Amount::ZERO, Amount::ZERO));
    }

    #[test]
    fn add_liquidity_never_auto_creates() {
        let mut router = router();
        assert_eq!(
            router.add_liquidity(ctx(ALICE), USD, EUR, Amount::new(5_000), Amount::new(5_000), ALICE, NOW),
            Err(DexError::PoolDoesNotExist)
        );
        assert_eq!(router.all_pools_length(), 0);
    }

    #[test]
    fn add_liquidity_validation_order() {
        let mut router = router();
        assert_eq!(
            router.add_liquidity(ctx(ALICE), USD, USD, Amount::ZERO, Amount::ZERO, ALICE, NOW),
            Err(DexError::IdenticalAsset)
        );
        assert_eq!(
            router.add_liquidity(ctx(ALICE), USD, EUR, Amount::ZERO, Amount::new(1), ALICE, NOW),
            Err(DexError::InsufficientAmount)
        );
    }

    #[test]
    fn add_liquidity_in_reverse_order_maps_amounts() {
        let (mut router, id) = with_pool(USD, EUR, 500_000, 2_000_000);
        let Ok(receipt) = router.add_liquidity(
            ctx(BOB),
            EUR,
            USD,
            Amount::new(200_000),
            Amount::new(50_000),
            BOB,
            NOW,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(receipt.amount_x(), Amount::new(200_000));
        assert_eq!(receipt.shares(), Amount::new(100_000));
        assert_eq!(reserves(&router, id), (Amount::new(550_000), Amount::new(2_200_000)));
        let Some(pool) = router.pool(id) else {
            panic!("pool exists");
        };
        assert_eq!(pool.share_balance_of(BOB), Amount::new(100_000));
        assert_eq!(pool.share_balance_of(pool.account()), MINIMUM_SHARES);
    }

    #[test]
    fn add_liquidity_without_allowance_changes_nothing() {
        let (mut router, id) = with_pool(USD, EUR, 500_000, 2_000_000);
        let Ok(()) = router.ledger_mut().approve(EUR, BOB, ROUTER, Amount::new(10)) else {
            panic!("expected Ok");
        };
        let before = router.ledger().clone();
        assert_eq!(
            router.add_liquidity(ctx(BOB), USD, EUR, Amount::new(5_000), Amount::new(20_000), BOB, NOW),
            Err(DexError::InsufficientAllowance)
        );
        assert_eq!(router.ledger(), &before);
        assert_eq!(reserves(&router, id), (Amount::new(500_000), Amount::new(2_000_000)));
    }

    // -- remove_liquidity -----------------------------------------------------

    #[test]
    fn remove_liquidity_over_balance_changes_nothing() {
        let (mut router, id) = with_pool(USD, EUR, 500_000, 2_000_000);
        let Ok(()) = router.approve_shares(ctx(ALICE), id, ROUTER, Amount::MAX) else {
            panic!("expected Ok");
        };
        assert_eq!(
            router.remove_liquidity(ctx(ALICE), USD, EUR, Amount::new(999_001), ALICE, NOW),
            Err(DexError::InsufficientLiquidity)
        );
        assert_eq!(
            router.remove_liquidity(ctx(ALICE), USD, EUR, Amount::ZERO, ALICE, NOW),
            Err(DexError::InsufficientLiquidity)
        );
        assert_eq!(reserves(&router, id), (Amount::new(500_000), Amount::new(2_000_000)));
    }

    #[test]
    fn remove_liquidity_needs_share_approval() {
        let (mut router, id) = with_pool(USD, EUR, 500_000, 2_000_000);
        assert_eq!(
            router.remove_liquidity(ctx(ALICE), USD, EUR, Amount::new(100_000), BOB, NOW),
            Err(DexError::InsufficientAllowance)
        );
        let Ok(()) = router.approve_shares(ctx(ALICE), id, ROUTER, Amount::new(100_000)) else {
            panic!("expected Ok");
        };
        let Ok((eur, usd)) =
            router.remove_liquidity(ctx(ALICE), EUR, USD, Amount::new(100_000), BOB, NOW)
        else {
            panic!("expected Ok");
        };
        assert_eq!((eur, usd), (Amount::new(200_000), Amount::new(50_000)));
        assert_eq!(router.ledger().balance_of(EUR, BOB), Amount::new(FUNDS + 200_000));
    }

    #[test]
    fn remove_liquidity_missing_pool() {
        let mut router = router();
        assert_eq!(
            router.remove_liquidity(ctx(ALICE), USD, EUR, Amount::new(1), ALICE, NOW),
            Err(DexError::PoolDoesNotExist)
        );
    }

    // -- swaps ----------------------------------------------------------------

    #[test]
    fn swap_pinned_scenario() {
        let (mut router, id) = with_pool(USD, EUR, 550_000, 2_200_000);
        let Ok(amounts) =
            router.swap(ctx(BOB), Amount::new(20_000), Amount::ZERO, &[USD, EUR], BOB, NOW)
        else {
            panic!("expected Ok");
        };
        assert_eq!(amounts, vec![Amount::new(20_000), Amount::new(76_969)]);
        assert_eq!(reserves(&router, id), (Amount::new(570_000), Amount::new(2_123_031)));
        assert_eq!(router.ledger().balance_of(EUR, BOB), Amount::new(FUNDS + 76_969));
        assert_eq!(router.ledger().balance_of(EUR, ROUTER), Amount::ZERO);
    }

    #[test]
    fn swap_slippage_changes_nothing() {
        let (mut router, id) = with_pool(USD, EUR, 550_000, 2_200_000);
        let before = router.ledger().clone();
        assert_eq!(
            router.swap(ctx(BOB), Amount::new(20_000), Amount::new(80_000), &[USD, EUR], BOB, NOW),
            Err(DexError::SlippageExceeded {
                minimum: Amount::new(80_000),
                actual: Amount::new(76_969),
            })
        );
        assert_eq!(router.ledger(), &before);
        assert_eq!(reserves(&router, id), (Amount::new(550_000), Amount::new(2_200_000)));
    }

    #[test]
    fn swap_rejects_bad_paths() {
        let (mut router, _) = with_pool(USD, EUR, 550_000, 2_200_000);
        assert_eq!(
            router.swap(ctx(BOB), Amount::new(1_000), Amount::ZERO, &[USD], BOB, NOW),
            Err(DexError::InvalidPath)
        );
        assert_eq!(
            router.swap(ctx(BOB), Amount::new(1_000), Amount::ZERO, &[USD, EUR, GBP], BOB, NOW),
            Err(DexError::PoolDoesNotExist)
        );
        assert_eq!(
            router.swap(ctx(BOB), Amount::new(1_000), Amount::ZERO, &[USD, EUR], BOB, NOW - 1),
            Err(DexError::DeadlinePassed)
        );
    }

    #[test]
    fn multi_hop_quotes_compose() {
        let mut router = router();
        seed(&mut router, USD, EUR, 500_000, 2_000_000);
        seed(&mut router, EUR, GBP, 3_000_000, 1_000_000);
        let x = Amount::new(40_000);
        let (Ok(direct), Ok(first)) = (
            router.get_amount_out(x, &[USD, EUR, GBP]),
            router.get_amount_out(x, &[USD, EUR]),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(router.get_amount_out(first, &[EUR, GBP]), Ok(direct));
    }

    #[test]
    fn multi_hop_swap_matches_quote() {
        let mut router = router();
        seed(&mut router, USD, EUR, 500_000, 2_000_000);
        seed(&mut router, EUR, GBP, 3_000_000, 1_000_000);
        let path = [USD, EUR, GBP];
        let Ok(quoted) = router.get_amounts_out(Amount::new(40_000), &path) else {
            panic!("expected Ok");
        };
        let Ok(executed) = router.swap(ctx(BOB), Amount::new(40_000), Amount::ZERO, &path, BOB, NOW)
        else {
            panic!("expected Ok");
        };
        assert_eq!(quoted, executed);
        assert_eq!(router.ledger().balance_of(GBP, BOB), Amount::new(FUNDS + executed[2].get()));
        assert_eq!(router.ledger().balance_of(EUR, ROUTER), Amount::ZERO);
    }

    #[test]
    fn get_amount_in_covers_requested_output() {
        let mut router = router();
        seed(&mut router, USD, EUR, 500_000, 2_000_000);
        seed(&mut router, EUR, GBP, 3_000_000, 1_000_000);
        let path = [USD, EUR, GBP];
        let Ok(needed) = router.get_amount_in(Amount::new(10_000), &path) else {
            panic!("expected Ok");
        };
        let Ok(out) = router.get_amount_out(needed, &path) else {
            panic!("expected Ok");
        };
        assert!(out >= Amount::new(10_000));
    }

    #[test]
    fn round_trip_path_revisits_pool() {
        let (mut router, id) = with_pool(USD, EUR, 500_000, 2_000_000);
        let Ok(amounts) =
            router.swap(ctx(BOB), Amount::new(10_000), Amount::ZERO, &[USD, EUR, USD], BOB, NOW)
        else {
            panic!("expected Ok");
        };
        assert!(amounts[2] < amounts[0]);
        let Some(pool) = router.pool(id) else {
            panic!("pool exists");
        };
        assert_eq!(router.ledger().balance_of(USD, pool.account()), reserves(&router, id).0);
        assert_eq!(router.ledger().balance_of(EUR, pool.account()), reserves(&router, id).1);
    }

    #[test]
    fn quote_liquidity_uses_ratio() {
        let (router, _) = with_pool(USD, EUR, 500_000, 2_000_000);
        assert_eq!(router.quote_liquidity(USD, EUR, Amount::new(1_000)), Ok(Amount::new(4_000)));
        assert_eq!(router.quote_liquidity(EUR, USD, Amount::new(1_000)), Ok(Amount::new(250)));
        assert_eq!(
            router.quote_liquidity(USD, GBP, Amount::new(1_000)),
            Err(DexError::PoolDoesNotExist)
        );
    }

    // -- native ---------------------------------------------------------------

    #[test]
    fn add_liquidity_native_uses_ratio_matching_portion() {
        let mut router = router();
        let Ok(id) = router.create_pool(USD, WRAPPED) else {
            panic!("expected Ok");
        };
        let Ok(first) = router.add_liquidity_native(
            ctx(ALICE),
            USD,
            Amount::new(1_000_000),
            ALICE,
            NOW,
            Amount::new(500_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(first.amount_y(), Amount::new(500_000));
        assert_eq!(router.adapter().total_wrapped(router.ledger()), Amount::new(500_000));

        // native side capped by the ratio
        let Ok(second) = router.add_liquidity_native(
            ctx(BOB),
            USD,
            Amount::new(100_000),
            BOB,
            NOW,
            Amount::new(80_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!((second.amount_x(), second.amount_y()), (Amount::new(100_000), Amount::new(50_000)));
        assert_eq!(router.ledger().balance_of(NATIVE, BOB), Amount::new(FUNDS - 50_000));

        // asset side scaled down to the native offered
        let Ok(third) = router.add_liquidity_native(
            ctx(BOB),
            USD,
            Amount::new(100_000),
            BOB,
            NOW,
            Amount::new(20_000),
        ) else {
            panic!("expected Ok");
        };
        assert_eq!((third.amount_x(), third.amount_y()), (Amount::new(40_000), Amount::new(20_000)));
        assert_eq!(reserves(&router, id), (Amount::new(1_140_000), Amount::new(570_000)));
        assert_eq!(router.ledger().balance_of(NATIVE, ADAPTER), Amount::new(570_000));
    }

    #[test]
    fn add_liquidity_native_rejects_wrapped_and_missing_pool() {
        let mut router = router();
        assert_eq!(
            router.add_liquidity_native(ctx(ALICE), WRAPPED, Amount::new(1), ALICE, NOW, Amount::new(1)),
            Err(DexError::IdenticalAsset)
        );
        assert_eq!(
            router.add_liquidity_native(ctx(ALICE), USD, Amount::new(5_000), ALICE, NOW, Amount::new(5_000)),
            Err(DexError::PoolDoesNotExist)
        );
    }

    #[test]
    fn native_swaps_both_directions() {
        let mut router = router();
        let Ok(_) = router.create_pool(USD, WRAPPED) else {
            panic!("expected Ok");
        };
        let Ok(_) = router.add_liquidity_native(
            ctx(ALICE),
            USD,
            Amount::new(2_000_000),
            ALICE,
            NOW,
            Amount::new(1_000_000),
        ) else {
            panic!("expected Ok");
        };

        let Ok(bought) = router.swap_native_for_assets(
            ctx(BOB),
            Amount::new(10_000),
            Amount::ZERO,
            &[WRAPPED, USD],
            BOB,
            NOW,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(router.ledger().balance_of(NATIVE, BOB), Amount::new(FUNDS - 10_000));
        assert_eq!(router.ledger().balance_of(USD, BOB), Amount::new(FUNDS + bought[1].get()));

        let Ok(sold) = router.swap_assets_for_native(
            ctx(BOB),
            Amount::new(5_000),
            Amount::ZERO,
            &[USD, WRAPPED],
            BOB,
            NOW,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(
            router.ledger().balance_of(NATIVE, BOB),
            Amount::new(FUNDS - 10_000 + sold[1].get())
        );
        assert_eq!(router.ledger().balance_of(WRAPPED, ROUTER), Amount::ZERO);
        assert_eq!(
            router.adapter().total_wrapped(router.ledger()),
            router.ledger().balance_of(NATIVE, ADAPTER)
        );
    }

    #[test]
    fn native_swaps_check_path_ends() {
        let mut router = router();
        assert_eq!(
            router.swap_native_for_assets(ctx(BOB), Amount::new(1), Amount::ZERO, &[USD, WRAPPED], BOB, NOW),
            Err(DexError::InvalidPath)
        );
        assert_eq!(
            router.swap_assets_for_native(ctx(BOB), Amount::new(1), Amount::ZERO, &[WRAPPED, USD], BOB, NOW),
            Err(DexError::InvalidPath)
        );
    }

    /// A `USD/WRAPPED` pool whose wrapped side was minted directly, so the
    /// adapter holds no native backing for it.
    fn unbacked_native_pool() -> (Router<MemoryLedger>, PoolId) {
        let mut router = router();
        let ledger = router.ledger_mut();
        let Ok(()) = ledger.mint(WRAPPED, ALICE, Amount::new(500_000)) else {
            panic!("mint failed");
        };
        let Ok(()) = ledger.approve(WRAPPED, ALICE, ROUTER, Amount::MAX) else {
            panic!("approve failed");
        };
        let id = seed(&mut router, USD, WRAPPED, 500_000, 500_000);
        (router, id)
    }

    #[test]
    fn swap_assets_for_native_without_backing_changes_nothing() {
        let (mut router, id) = unbacked_native_pool();
        let ledger_before = router.ledger().clone();
        let Some(pool_before) = router.pool(id).cloned() else {
            panic!("pool exists");
        };
        assert_eq!(
            router.swap_assets_for_native(
                ctx(BOB),
                Amount::new(10_000),
                Amount::ZERO,
                &[USD, WRAPPED],
                BOB,
                NOW
            ),
            Err(DexError::InsufficientBalance)
        );
        assert_eq!(router.ledger(), &ledger_before);
        assert_eq!(router.pool(id), Some(&pool_before));
        assert_eq!(router.ledger().balance_of(WRAPPED, ROUTER), Amount::ZERO);
    }

    #[test]
    fn remove_liquidity_native_without_backing_changes_nothing() {
        let (mut router, id) = unbacked_native_pool();
        let Ok(()) = router.approve_shares(ctx(ALICE), id, ROUTER, Amount::MAX) else {
            panic!("expected Ok");
        };
        let ledger_before = router.ledger().clone();
        let Some(pool_before) = router.pool(id).cloned() else {
            panic!("pool exists");
        };
        assert_eq!(
            router.remove_liquidity_native(ctx(ALICE), USD, Amount::new(100_000), ALICE, NOW),
            Err(DexError::InsufficientBalance)
        );
        assert_eq!(router.ledger(), &ledger_before);
        assert_eq!(router.pool(id), Some(&pool_before));
        assert_eq!(reserves(&router, id), (Amount::new(500_000), Amount::new(500_000)));
    }

    #[test]
    fn remove_liquidity_native_unwraps() {
        let mut router = router();
        let Ok(id) = router.create_pool(WRAPPED, USD) else {
            panic!("expected Ok");
        };
        let Ok(receipt) = router.add_liquidity_native(
            ctx(ALICE),
            USD,
            Amount::new(2_000_000),
            ALICE,
            NOW,
            Amount::new(500_000),
        ) else {
            panic!("expected Ok");
        };
        let Ok(()) = router.approve_shares(ctx(ALICE), id, ROUTER, Amount::MAX) else {
            panic!("expected Ok");
        };
        let Ok((usd, native)) =
            router.remove_liquidity_native(ctx(ALICE), USD, receipt.shares(), BOB, NOW)
        else {
            panic!("expected Ok");
        };
        assert_eq!(router.ledger().balance_of(USD, BOB), Amount::new(FUNDS + usd.get()));
        assert_eq!(router.ledger().balance_of(NATIVE, BOB), Amount::new(FUNDS + native.get()));
        assert_eq!(router.ledger().balance_of(WRAPPED, BOB), Amount::ZERO);
        // 1000 locked shares keep a residue: sqrt(2e6 * 5e5) = 1e6 total
        assert_eq!(reserves(&router, id), (Amount::new(500), Amount::new(2_000)));
    }
}
