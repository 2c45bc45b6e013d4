//! The constant-product pool engine and its share book.
//!
//! Every registered pair is served by one [`ConstantProductPool`]; the
//! router dispatches to it directly.

pub mod constant_product;
mod shares;

#[cfg(test)]
mod proptest_properties;

pub use constant_product::{ConstantProductPool, MINIMUM_SHARES};
pub use shares::ShareBook;
