//! Result of a liquidity deposit.

use crate::domain::Amount;

/// Amounts actually deposited and shares minted by an add-liquidity call.
///
/// Amounts are reported in the caller's argument order.  For the native
/// variant `amount_y` is the native coin consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LiquidityReceipt {
    amount_x: Amount,
    amount_y: Amount,
    shares: Amount,
}

impl LiquidityReceipt {
    pub(crate) const fn new(amount_x: Amount, amount_y: Amount, shares: Amount) -> Self {
        Self {
            amount_x,
            amount_y,
            shares,
        }
    }

    /// Deposited amount of the first asset.
    pub const fn amount_x(&self) -> Amount {
        self.amount_x
    }

    /// Deposited amount of the second asset.
    pub const fn amount_y(&self) -> Amount {
        self.amount_y
    }

    /// Shares minted to the recipient.
    pub const fn shares(&self) -> Amount {
        self.shares
    }
}
