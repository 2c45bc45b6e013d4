//! Native-asset adapter.
//!
//! The environment's native coin is not a ledger asset the pools can hold.
//! [`NativeAdapter`] wraps it one-for-one into a standard asset and back.

mod adapter;

pub use adapter::NativeAdapter;
