//! Unified error types for the Hydra DEX library.
//!
//! All fallible operations across the crate return [`DexError`] as their
//! error type.  Every failure is synchronous and final: the core never
//! retries, and a failed call leaves pools, shares and ledger balances
//! exactly as they were.

use thiserror::Error;

use crate::domain::Amount;

/// Errors produced by pools, the registry, the router and the native adapter.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DexError {
    /// An asset identity is null, or is the raw native coin where a
    /// poolable asset is required.
    #[error("invalid asset")]
    InvalidAsset,

    /// Both sides of a pair are the same asset.
    #[error("identical assets")]
    IdenticalAsset,

    /// A pool is already registered for this unordered pair.
    #[error("pool already exists")]
    PoolExists,

    /// No pool is registered for the requested pair.
    #[error("pool does not exist")]
    PoolDoesNotExist,

    /// The request's deadline is earlier than the current timestamp.
    #[error("deadline passed")]
    DeadlinePassed,

    /// An input amount is zero, or rounds to zero after the fee.
    #[error("insufficient amount")]
    InsufficientAmount,

    /// Reserves or share balances cannot satisfy the request.
    #[error("insufficient liquidity")]
    InsufficientLiquidity,

    /// A swap path has fewer than two assets or starts/ends at the wrong asset.
    #[error("invalid path")]
    InvalidPath,

    /// The final output of a swap is below the caller's minimum.
    #[error("slippage exceeded: got {actual}, minimum {minimum}")]
    SlippageExceeded {
        /// Minimum output requested by the caller.
        minimum: Amount,
        /// Output the swap would have delivered.
        actual: Amount,
    },

    /// The pool is already bound to an asset pair.
    #[error("pool already initialized")]
    AlreadyInitialized,

    /// The pool has not been bound to an asset pair yet.
    #[error("pool not initialized")]
    PoolNotInitialized,

    /// `reserve_a * reserve_b` would decrease.
    #[error("constant-product invariant violated")]
    InvariantViolation,

    /// A ledger or share account holds less than the amount moved.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The spender's allowance is below the amount moved.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// The account cannot take part in the operation (null, or a pool's
    /// own share account).
    #[error("invalid account")]
    InvalidAccount,

    /// A configuration value is out of range or inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// Arithmetic overflow.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, DexError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_unit_variant() {
        assert_eq!(DexError::PoolExists.to_string(), "pool already exists");
    }

    #[test]
    fn display_slippage_carries_amounts() {
        let err = DexError::SlippageExceeded {
            minimum: Amount::new(100),
            actual: Amount::new(99),
        };
        assert_eq!(err.to_string(), "slippage exceeded: got 99, minimum 100");
    }

    #[test]
    fn display_context_variant() {
        assert_eq!(
            DexError::Overflow("k overflow").to_string(),
            "overflow: k overflow"
        );
    }

    #[test]
    fn errors_are_comparable() {
        assert_eq!(DexError::InvalidPath, DexError::InvalidPath);
        assert_ne!(DexError::InvalidPath, DexError::InvalidAsset);
    }
}
