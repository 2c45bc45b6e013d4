//! Request orchestration over the registry, the pools and the ledger.
//!
//! [`Router`] is the public entry point: it validates requests, resolves
//! pools and multi-hop paths, wraps and unwraps the native coin, and
//! moves value through the ledger on behalf of the caller.

mod dex_router;
mod receipt;

pub use dex_router::Router;
pub use receipt::LiquidityReceipt;
