//! Pool registry: one pool per unordered asset pair.
//!
//! The registry is the single place pools are created.  It owns every
//! [`ConstantProductPool`](crate::pools::ConstantProductPool), keeps them
//! in an append-only list and indexes them by
//! [`PairKey`](crate::domain::PairKey) so `(A, B)` and `(B, A)` resolve to
//! the same pool.

mod pool_registry;

pub use pool_registry::{PoolId, PoolRegistry};
