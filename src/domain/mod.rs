//! Fundamental domain value types used throughout the DEX core.
//!
//! This module contains the value types that model the exchange domain:
//! asset and account identities, amounts, the trading fee, pair keys,
//! swap paths and the per-call context.  All types are newtypes with
//! validated constructors so invalid values cannot reach the pools.

mod account_id;
mod amount;
mod asset_id;
mod basis_points;
mod call_context;
mod fee;
mod pair_key;
mod rounding;
mod swap_path;

pub use account_id::AccountId;
pub use amount::Amount;
pub use asset_id::AssetId;
pub use basis_points::BasisPoints;
pub use call_context::CallContext;
pub use fee::TradingFee;
pub use pair_key::PairKey;
pub use rounding::Rounding;
pub use swap_path::SwapPath;
