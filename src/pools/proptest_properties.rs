//! Property-based tests using `proptest` for pool and routing invariants.
//!
//! 1. **Swap reversibility**: a round trip A→B→A returns at most the input.
//! 2. **Invariant preservation**: `k` never decreases across swaps.
//! 3. **Liquidity conservation**: deposit then withdraw returns at most the
//!    deposit.
//! 4. **Locked shares**: the pool's own share balance stays at the minimum.
//! 5. **Quote minimality**: `quote_in` is the smallest sufficient input.
//! 6. **Path composition**: a two-hop quote equals two one-hop quotes.
//! 7. **Atomic failure**: a rejected swap leaves pool and ledger untouched.
//! 8. **Deposit growth**: a valid deposit strictly raises `total_shares` and
//!    grows each reserve by exactly the deposited amount.

use proptest::prelude::*;

use super::{ConstantProductPool, MINIMUM_SHARES};
use crate::config::RouterConfig;
use crate::domain::{AccountId, Amount, AssetId, CallContext};
use crate::error::DexError;
use crate::ledger::MemoryLedger;
use crate::router::Router;
use crate::traits::{Ledger, MintableLedger};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

const USD: AssetId = AssetId::from_bytes([1u8; 32]);
const EUR: AssetId = AssetId::from_bytes([2u8; 32]);
const GBP: AssetId = AssetId::from_bytes([3u8; 32]);
const LP: AccountId = AccountId::from_bytes([10u8; 32]);
const TRADER: AccountId = AccountId::from_bytes([11u8; 32]);
const POOL: AccountId = AccountId::derived(*b"pool", 0);
const FUNDS: u128 = 1_000_000_000_000;

fn funded_ledger() -> MemoryLedger {
    let mut ledger = MemoryLedger::new();
    for who in [LP, TRADER] {
        for asset in [USD, EUR, GBP] {
            let Ok(()) = ledger.mint(asset, who, Amount::new(FUNDS)) else {
                panic!("mint failed");
            };
        }
    }
    ledger
}

fn make_pool(ra: u128, rb: u128) -> (ConstantProductPool, MemoryLedger) {
    let mut ledger = funded_ledger();
    let mut pool = ConstantProductPool::new(POOL);
    let Ok(()) = pool.initialize(USD, EUR) else {
        panic!("valid pair");
    };
    let Ok(_) = pool.deposit(&mut ledger, LP, Amount::new(ra), Amount::new(rb), LP) else {
        panic!("seed deposit failed");
    };
    (pool, ledger)
}

fn product(pool: &ConstantProductPool) -> u128 {
    let (a, b) = pool.reserves();
    a.get() * b.get()
}

fn make_router(r1: (u128, u128), r2: (u128, u128)) -> Router<MemoryLedger> {
    let router_account = AccountId::from_bytes([0xa0; 32]);
    let Ok(config) = RouterConfig::new(
        router_account,
        AssetId::from_bytes([0xee; 32]),
        AssetId::from_bytes([0xef; 32]),
        AccountId::from_bytes([0xa1; 32]),
    ) else {
        panic!("valid config");
    };
    let mut ledger = funded_ledger();
    for asset in [USD, EUR, GBP] {
        let Ok(()) = ledger.approve(asset, LP, router_account, Amount::MAX) else {
            panic!("approve failed");
        };
    }
    let Ok(mut router) = Router::new(config, ledger) else {
        panic!("valid router");
    };
    let ctx = CallContext::new(LP, 0);
    for (x, y, (rx, ry)) in [(USD, EUR, r1), (EUR, GBP, r2)] {
        let Ok(_) = router.create_pool(x, y) else {
            panic!("create failed");
        };
        let Ok(_) = router.add_liquidity(ctx, x, y, Amount::new(rx), Amount::new(ry), LP, 0)
        else {
            panic!("seed failed");
        };
    }
    router
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Reserve values in range [10_000, 10_000_000] to avoid extremes.
fn reserve_strategy() -> impl Strategy<Value = u128> {
    10_000u128..=10_000_000u128
}

/// Trade sizes up to a fifth of a pool seeded by `reserve_strategy`.
fn trade_strategy() -> impl Strategy<Value = u128> {
    1u128..=2_000u128
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_swap_reversibility(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trade in trade_strategy(),
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let Ok(received) =
            pool.swap(&mut ledger, TRADER, USD, Amount::new(trade), Amount::ZERO, TRADER)
        else {
            return Ok(());
        };
        let Ok(back) = pool.swap(&mut ledger, TRADER, EUR, received, Amount::ZERO, TRADER) else {
            return Ok(());
        };
        prop_assert!(
            back.get() <= trade,
            "round-trip should lose value: final={} > original={}",
            back, trade
        );
    }

    #[test]
    fn prop_k_never_decreases(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trades in proptest::collection::vec((trade_strategy(), any::<bool>()), 1..8),
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        for (trade, sell_usd) in trades {
            let before = product(&pool);
            let asset_in = if sell_usd { USD } else { EUR };
            if pool
                .swap(&mut ledger, TRADER, asset_in, Amount::new(trade), Amount::ZERO, TRADER)
                .is_ok()
            {
                prop_assert!(product(&pool) >= before);
            } else {
                prop_assert_eq!(product(&pool), before);
            }
        }
    }

    #[test]
    fn prop_deposit_withdraw_never_profits(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        da in 1u128..=1_000_000u128,
        db in 1u128..=1_000_000u128,
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let Ok(shares) = pool.deposit(&mut ledger, TRADER, Amount::new(da), Amount::new(db), TRADER)
        else {
            return Ok(());
        };
        let Ok((wa, wb)) = pool.withdraw(&mut ledger, TRADER, TRADER, shares, TRADER) else {
            return Ok(());
        };
        prop_assert!(wa.get() <= da, "withdrew {} of A after depositing {}", wa, da);
        prop_assert!(wb.get() <= db, "withdrew {} of B after depositing {}", wb, db);
        prop_assert_eq!(ledger.balance_of(USD, POOL), pool.reserves().0);
        prop_assert_eq!(ledger.balance_of(EUR, POOL), pool.reserves().1);
    }

    #[test]
    fn prop_deposit_grows_state(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trade in trade_strategy(),
        da in 1u128..=1_000_000u128,
        db in 1u128..=1_000_000u128,
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let _ = pool.swap(&mut ledger, TRADER, USD, Amount::new(trade), Amount::ZERO, TRADER);
        let (before_a, before_b) = pool.reserves();
        let total_before = pool.total_shares();
        let held_before = pool.share_balance_of(TRADER);

        let Ok(minted) = pool.deposit(&mut ledger, TRADER, Amount::new(da), Amount::new(db), TRADER)
        else {
            return Ok(());
        };
        prop_assert!(!minted.is_zero());
        prop_assert!(pool.total_shares() > total_before);
        prop_assert_eq!(pool.total_shares().get(), total_before.get() + minted.get());
        prop_assert_eq!(pool.share_balance_of(TRADER).get(), held_before.get() + minted.get());
        prop_assert_eq!(pool.reserves().0.get(), before_a.get() + da);
        prop_assert_eq!(pool.reserves().1.get(), before_b.get() + db);
        prop_assert_eq!(ledger.balance_of(USD, POOL), pool.reserves().0);
        prop_assert_eq!(ledger.balance_of(EUR, POOL), pool.reserves().1);
    }

    #[test]
    fn prop_locked_shares_stay_put(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trade in trade_strategy(),
        burn_fraction in 1u128..=100u128,
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        prop_assert_eq!(pool.share_balance_of(POOL), MINIMUM_SHARES);

        let _ = pool.swap(&mut ledger, TRADER, USD, Amount::new(trade), Amount::ZERO, TRADER);
        let owned = pool.share_balance_of(LP).get();
        let burn = (owned * burn_fraction / 100).max(1);
        let Ok(_) = pool.withdraw(&mut ledger, LP, LP, Amount::new(burn), LP) else {
            return Ok(());
        };
        prop_assert_eq!(pool.share_balance_of(POOL), MINIMUM_SHARES);
        prop_assert!(pool.total_shares() >= MINIMUM_SHARES);
    }

    #[test]
    fn prop_quote_in_is_minimal(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        wanted in 1u128..=5_000u128,
    ) {
        let (pool, _) = make_pool(ra, rb);
        let Ok(needed) = pool.quote_in(EUR, Amount::new(wanted)) else {
            return Ok(());
        };
        let Ok(out) = pool.quote_out(USD, needed) else {
            return Ok(());
        };
        prop_assert!(out.get() >= wanted, "quote_in({}) = {} only buys {}", wanted, needed, out);

        let smaller = Amount::new(needed.get() - 1);
        match pool.quote_out(USD, smaller) {
            Ok(short) => {
                prop_assert!(short.get() < wanted, "{} also buys {}", smaller, short);
            }
            Err(err) => {
                prop_assert_eq!(err, DexError::InsufficientAmount);
            }
        }
    }

    #[test]
    fn prop_path_quotes_compose(
        r1 in (reserve_strategy(), reserve_strategy()),
        r2 in (reserve_strategy(), reserve_strategy()),
        trade in trade_strategy(),
    ) {
        let router = make_router(r1, r2);
        let x = Amount::new(trade);
        let Ok(direct) = router.get_amount_out(x, &[USD, EUR, GBP]) else {
            return Ok(());
        };
        let Ok(first) = router.get_amount_out(x, &[USD, EUR]) else {
            return Ok(());
        };
        prop_assert_eq!(router.get_amount_out(first, &[EUR, GBP]), Ok(direct));
    }

    #[test]
    fn prop_rejected_swap_is_atomic(
        ra in reserve_strategy(),
        rb in reserve_strategy(),
        trade in trade_strategy(),
    ) {
        let (mut pool, mut ledger) = make_pool(ra, rb);
        let Ok(quoted) = pool.quote_out(USD, Amount::new(trade)) else {
            return Ok(());
        };
        let pool_before = pool.clone();
        let ledger_before = ledger.clone();
        let Some(too_much) = quoted.checked_add(&Amount::new(1)) else {
            return Ok(());
        };
        let result = pool.swap(&mut ledger, TRADER, USD, Amount::new(trade), too_much, TRADER);
        prop_assert!(
            matches!(result, Err(DexError::SlippageExceeded { .. })),
            "expected slippage rejection, got {:?}",
            result
        );
        prop_assert_eq!(pool, pool_before);
        prop_assert_eq!(ledger, ledger_before);
    }
}
