//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use hydra_dex::prelude::*;
//! ```

pub use crate::domain::{
    AccountId, Amount, AssetId, BasisPoints, CallContext, PairKey, Rounding, SwapPath, TradingFee,
};

pub use crate::traits::{Ledger, MintableLedger};

pub use crate::math::CheckedArithmetic;

pub use crate::config::RouterConfig;

pub use crate::error::{DexError, Result};

pub use crate::ledger::MemoryLedger;
pub use crate::native::NativeAdapter;
pub use crate::pools::{ConstantProductPool, MINIMUM_SHARES};
pub use crate::registry::{PoolId, PoolRegistry};
pub use crate::router::{LiquidityReceipt, Router};
