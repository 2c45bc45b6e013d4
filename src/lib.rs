//! # Hydra DEX
//!
//! Constant-product exchange core: pools of two assets priced by
//! `x · y = k`, a router that owns the pool registry and chains pools
//! into multi-hop paths, and an adapter that lets the native coin trade
//! as a wrapped asset.
//!
//! Every trade pays a fixed 0.30% fee on its input, which stays in the
//! pool's reserves.  All amounts are unsigned 128-bit integers and every
//! division rounds in the pool's favour.  Intermediate products are
//! computed in 256 bits, so no operation overflows on reserves that fit
//! in a `u128`.
//!
//! # Quick Start
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! hydra-dex = "0.1"
//! ```
//!
//! ## Create a pool, add liquidity and swap
//!
//! ```rust
//! use hydra_dex::prelude::*;
//!
//! // 1. Configure the router and fund a trader on the in-memory ledger
//! let router_account = AccountId::from_bytes([0xa0; 32]);
//! let config = RouterConfig::new(
//!     router_account,
//!     AssetId::from_bytes([0xee; 32]), // native coin
//!     AssetId::from_bytes([0xef; 32]), // its wrapped form
//!     AccountId::from_bytes([0xa1; 32]),
//! )
//! .expect("valid config");
//!
//! let usd = AssetId::from_bytes([1u8; 32]);
//! let eur = AssetId::from_bytes([2u8; 32]);
//! let alice = AccountId::from_bytes([10u8; 32]);
//!
//! let mut ledger = MemoryLedger::new();
//! for asset in [usd, eur] {
//!     ledger.mint(asset, alice, Amount::new(1_000_000_000)).expect("mint");
//!     ledger.approve(asset, alice, router_account, Amount::MAX).expect("approve");
//! }
//! let mut router = Router::new(config, ledger).expect("valid router");
//!
//! // 2. Create the pool and seed it
//! let pool = router.create_pool(usd, eur).expect("new pair");
//! let ctx = CallContext::new(alice, 1_700_000_000);
//! let receipt = router
//!     .add_liquidity(ctx, usd, eur, Amount::new(500_000), Amount::new(2_000_000), alice, u64::MAX)
//!     .expect("liquidity added");
//! assert_eq!(receipt.shares(), Amount::new(999_000)); // 1 000 shares stay locked
//!
//! // 3. Quote and execute a swap
//! let quoted = router.get_amount_out(Amount::new(10_000), &[usd, eur]).expect("quote");
//! let amounts = router
//!     .swap(ctx, Amount::new(10_000), quoted, &[usd, eur], alice, u64::MAX)
//!     .expect("swap succeeded");
//! assert_eq!(amounts[1], quoted);
//! assert!(router.pool(pool).is_some());
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │   Consumer   │  CallContext + deadline on every call
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐      ┌───────────────┐
//! │    Router    │─────▶│ NativeAdapter │  native coin ⇄ wrapped asset
//! └──────┬───────┘      └───────────────┘
//!        │ PoolRegistry (PairKey → PoolId)
//!        ▼
//! ┌──────────────┐
//! │    Pools     │  ConstantProductPool, ShareBook
//! └──────┬───────┘
//!        │ Ledger / MintableLedger traits
//!        ▼
//! ┌──────────────┐
//! │    Ledger    │  MemoryLedger, or any host ledger
//! └──────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`AssetId`](domain::AssetId), [`SwapPath`](domain::SwapPath), etc. |
//! | [`traits`] | Ledger abstractions: [`Ledger`](traits::Ledger), [`MintableLedger`](traits::MintableLedger) |
//! | [`ledger`] | [`MemoryLedger`](ledger::MemoryLedger) in-memory ledger |
//! | [`pools`]  | [`ConstantProductPool`](pools::ConstantProductPool) engine and share accounting |
//! | [`registry`] | [`PoolRegistry`](registry::PoolRegistry) keyed by unordered pair |
//! | [`router`] | [`Router`](router::Router) entry point |
//! | [`native`] | [`NativeAdapter`](native::NativeAdapter) wrap/unwrap |
//! | [`config`] | [`RouterConfig`](config::RouterConfig) |
//! | [`math`]   | Checked and 256-bit wide arithmetic |
//! | [`error`]  | [`DexError`](error::DexError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod ledger;
pub mod math;
pub mod native;
pub mod pools;
pub mod prelude;
pub mod registry;
pub mod router;
pub mod traits;
