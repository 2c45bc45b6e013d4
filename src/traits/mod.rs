//! Trait abstractions at the boundary of the DEX core.
//!
//! [`Ledger`] is the fungible-asset ledger every value movement goes
//! through; [`MintableLedger`] extends it with the issuance the native
//! adapter needs.

mod ledger;

pub use ledger::{Ledger, MintableLedger};
