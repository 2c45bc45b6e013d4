//! Explicit rounding direction for integer division.

/// Rounding direction for every division performed by the engine.
///
/// The pool always rounds in its own favour: outputs paid to a trader or
/// liquidity provider round [`Down`](Self::Down), inputs demanded from
/// them round [`Up`](Self::Up).
///
/// # Examples
///
/// ```
/// use hydra_dex::domain::{Amount, Rounding};
///
/// let third = Amount::new(10).checked_div(&Amount::new(3), Rounding::Up);
/// assert_eq!(third, Some(Amount::new(4)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}
