//! Basis-point representation for percentages.

use core::fmt;

use super::{Amount, Rounding};
use crate::error::DexError;

/// Value that represents 100%.
const MAX_BPS: u32 = 10_000;

/// A percentage expressed in basis points (1 bp = 0.01%, 10 000 bp = 100%).
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, BasisPoints, Rounding};
///
/// let bp = BasisPoints::new(30);
/// let part = bp.apply(Amount::new(1_000_000), Rounding::Down).expect("no overflow");
/// assert_eq!(part, Amount::new(3_000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BasisPoints(u32);

impl BasisPoints {
    /// Zero basis points (0%).
    pub const ZERO: Self = Self(0);

    /// Creates a new `BasisPoints` from a raw `u32` value.
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the underlying `u32` value.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns `10_000 - self`, or `None` above 100%.
    #[must_use]
    pub const fn complement(&self) -> Option<Self> {
        match MAX_BPS.checked_sub(self.0) {
            Some(v) => Some(Self(v)),
            None => None,
        }
    }

    /// Computes `amount * self / 10_000` with explicit rounding.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Overflow`] if the result does not fit.
    pub const fn apply(&self, amount: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
        match amount.checked_mul_div(
            &Amount::new(self.0 as u128),
            &Amount::new(MAX_BPS as u128),
            rounding,
        ) {
            Some(v) => Ok(v),
            None => Err(DexError::Overflow("basis points apply overflow")),
        }
    }

    /// Inverse of [`apply`](Self::apply): computes `amount * 10_000 / self`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::DivisionByZero`] for zero basis points and
    /// [`DexError::Overflow`] if the result does not fit.
    pub const fn unapply(
        &self,
        amount: Amount,
        rounding: Rounding,
    ) -> crate::error::Result<Amount> {
        if self.0 == 0 {
            return Err(DexError::DivisionByZero);
        }
        match amount.checked_mul_div(
            &Amount::new(MAX_BPS as u128),
            &Amount::new(self.0 as u128),
            rounding,
        ) {
            Some(v) => Ok(v),
            None => Err(DexError::Overflow("basis points unapply overflow")),
        }
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bp", self.0)
    }
}
