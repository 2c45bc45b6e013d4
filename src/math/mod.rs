//! Arithmetic utilities for pool calculations.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe operations
//! on [`Amount`](crate::domain::Amount) and the 256-bit helpers the pools
//! use for products of two reserves.

mod checked;
mod wide;

pub use checked::CheckedArithmetic;
pub use wide::{cmp_products, isqrt, mul_div, sqrt_product, widening_mul};
