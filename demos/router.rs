//! Router walkthrough.
//!
//! Demonstrates creating pools, adding liquidity, quoting and executing a
//! multi-hop swap, trading the native coin through its wrapped form, and
//! withdrawing liquidity.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=hydra_dex=debug cargo run --example router
//! ```

use hydra_dex::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Constant Product DEX (x · y = k) ===\n");

    // ── 1. Router and ledger ────────────────────────────────────────────
    let router_account = AccountId::from_bytes([0xa0; 32]);
    let native = AssetId::from_bytes([0xee; 32]);
    let wrapped = AssetId::from_bytes([0xef; 32]);
    let config = RouterConfig::new(router_account, native, wrapped, AccountId::from_bytes([0xa1; 32]))?;

    let usd = AssetId::from_bytes([1u8; 32]);
    let eur = AssetId::from_bytes([2u8; 32]);
    let gbp = AssetId::from_bytes([3u8; 32]);
    let alice = AccountId::from_bytes([10u8; 32]);
    let bob = AccountId::from_bytes([11u8; 32]);

    let mut ledger = MemoryLedger::new();
    for who in [alice, bob] {
        for asset in [usd, eur, gbp, native] {
            ledger.mint(asset, who, Amount::new(100_000_000))?;
            ledger.approve(asset, who, router_account, Amount::MAX)?;
        }
    }
    let mut router = Router::new(config, ledger)?;

    // ── 2. Pools ────────────────────────────────────────────────────────
    let usd_eur = router.create_pool(usd, eur)?;
    let eur_gbp = router.create_pool(eur, gbp)?;
    let usd_native = router.create_pool(usd, wrapped)?;
    println!("Pools created: {}", router.all_pools_length());

    let now = 1_700_000_000;
    let deadline = now + 300;
    let ctx = CallContext::new(alice, now);
    router.add_liquidity(ctx, usd, eur, Amount::new(550_000), Amount::new(2_200_000), alice, deadline)?;
    router.add_liquidity(ctx, eur, gbp, Amount::new(3_000_000), Amount::new(1_000_000), alice, deadline)?;
    let receipt = router.add_liquidity_native(
        ctx,
        usd,
        Amount::new(2_000_000),
        alice,
        deadline,
        Amount::new(1_000_000),
    )?;
    println!("Native pool seeded, {} shares minted", receipt.shares());

    for id in [usd_eur, eur_gbp, usd_native] {
        if let Some(pool) = router.pool(id) {
            let (ra, rb) = pool.reserves();
            println!("  {id}: reserves ({ra}, {rb}), shares {}", pool.total_shares());
        }
    }

    // ── 3. Single-hop swap ──────────────────────────────────────────────
    let bob_ctx = CallContext::new(bob, now);
    let amounts = router.swap(bob_ctx, Amount::new(20_000), Amount::ZERO, &[usd, eur], bob, deadline)?;
    println!("\nSold {} USD for {} EUR", amounts[0], amounts[1]);

    // ── 4. Multi-hop swap with a slippage bound ─────────────────────────
    let path = [usd, eur, gbp];
    let quoted = router.get_amount_out(Amount::new(10_000), &path)?;
    let needed = router.get_amount_in(quoted, &path)?;
    println!("\nQuote: 10000 USD -> {quoted} GBP (min input for that output: {needed})");
    let amounts = router.swap(bob_ctx, Amount::new(10_000), quoted, &path, bob, deadline)?;
    println!("Executed: {amounts:?}");

    match router.swap(bob_ctx, Amount::new(10_000), quoted, &path, bob, deadline) {
        Err(DexError::SlippageExceeded { minimum, actual }) => {
            println!("Repeat at the stale quote rejected: wanted {minimum}, pool offers {actual}");
        }
        other => println!("Unexpected: {other:?}"),
    }

    // ── 5. Native coin ──────────────────────────────────────────────────
    let bought =
        router.swap_native_for_assets(bob_ctx, Amount::new(5_000), Amount::ZERO, &[wrapped, usd], bob, deadline)?;
    println!("\nSold {} native for {} USD", bought[0], bought[1]);
    let sold =
        router.swap_assets_for_native(bob_ctx, bought[1], Amount::ZERO, &[usd, wrapped], bob, deadline)?;
    println!("Sold {} USD back for {} native", sold[0], sold[1]);

    // ── 6. Withdraw ─────────────────────────────────────────────────────
    router.approve_shares(ctx, usd_eur, router_account, Amount::MAX)?;
    let Some(owned) = router.pool(usd_eur).map(|pool| pool.share_balance_of(alice)) else {
        return Err("pool missing".into());
    };
    let (usd_out, eur_out) = router.remove_liquidity(ctx, usd, eur, owned, alice, deadline)?;
    println!("\nAlice burned {owned} shares for {usd_out} USD and {eur_out} EUR");
    if let Some(pool) = router.pool(usd_eur) {
        println!("  {usd_eur} keeps {} locked shares", pool.total_shares());
    }

    Ok(())
}
