//! The single fixed trading fee.

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::DexError;

/// The trading fee charged on the input of every hop: 30 bp (0.30%).
///
/// The fee is applied by scaling the input down before the
/// constant-product formula, so it stays in the pool's reserves.
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, TradingFee};
///
/// let net = TradingFee::STANDARD.net_of_fee(Amount::new(20_000)).expect("no overflow");
/// assert_eq!(net, Amount::new(19_940));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TradingFee(BasisPoints);

impl TradingFee {
    /// The engine's only fee: 30 bp.
    pub const STANDARD: Self = Self(BasisPoints::new(30));

    /// Returns the fee rate.
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Share of the input that reaches the pricing formula (9 970 bp).
    const fn retained(&self) -> crate::error::Result<BasisPoints> {
        match self.0.complement() {
            Some(bp) => Ok(bp),
            None => Err(DexError::InvalidConfiguration("fee above 100%")),
        }
    }

    /// `floor(amount * 9_970 / 10_000)`: the fee-adjusted input, rounded
    /// in the pool's favour.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result does not fit.
    pub fn net_of_fee(&self, amount: Amount) -> crate::error::Result<Amount> {
        self.retained()?.apply(amount, Rounding::Down)
    }

    /// Smallest gross input whose [`net_of_fee`](Self::net_of_fee) is at
    /// least `net`: `ceil(net * 10_000 / 9_970)`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result does not fit.
    pub fn gross_for_net(&self, net: Amount) -> crate::error::Result<Amount> {
        self.retained()?.unapply(net, Rounding::Up)
    }
}

impl Default for TradingFee {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl fmt::Display for TradingFee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TradingFee({})", self.0)
    }
}
