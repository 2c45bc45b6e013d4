//! Per-call environment: who is calling, and when.

use super::AccountId;
use crate::error::DexError;

/// The acting account and the current timestamp of one router call.
///
/// The environment is expected to provide a totally ordered sequence of
/// calls; `timestamp` is only compared against request deadlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallContext {
    caller: AccountId,
    timestamp: u64,
}

impl CallContext {
    /// Creates a context for `caller` at `timestamp` (seconds).
    #[must_use]
    pub const fn new(caller: AccountId, timestamp: u64) -> Self {
        Self { caller, timestamp }
    }

    /// The acting account.
    #[must_use]
    pub const fn caller(&self) -> AccountId {
        self.caller
    }

    /// The current timestamp.
    #[must_use]
    pub const fn timestamp(&self) -> u64 {
        self.timestamp
    }

    /// Fails with [`DexError::DeadlinePassed`] if `deadline` is in the past.
    ///
    /// A deadline equal to the current timestamp is still valid.
    pub const fn ensure_not_expired(&self, deadline: u64) -> Result<(), DexError> {
        if deadline < self.timestamp {
            return Err(DexError::DeadlinePassed);
        }
        Ok(())
    }
}
