//! 256-bit intermediates for `u128` products.
//!
//! Reserves are `u128`, so `reserve_a * reserve_b` and the numerators of
//! the pricing formula can exceed `u128::MAX` long before any single
//! amount does.  These helpers keep the full product as a `(high, low)`
//! pair and only fail when the final quotient itself does not fit.
//!
//! # Examples
//!
//! ```
//! use hydra_dex::domain::Rounding;
//! use hydra_dex::math::{mul_div, widening_mul};
//!
//! assert_eq!(widening_mul(u128::MAX, 2), (1, u128::MAX - 1));
//! assert_eq!(mul_div(u128::MAX, 3, 6, Rounding::Down), Some(u128::MAX / 2));
//! ```

use core::cmp::Ordering;

use crate::domain::Rounding;

const LOW_MASK: u128 = u64::MAX as u128;

/// Full 256-bit product of `a * b`, returned as `(high, low)`.
#[must_use]
pub const fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    let (a1, a0) = (a >> 64, a & LOW_MASK);
    let (b1, b0) = (b >> 64, b & LOW_MASK);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    // at most 3 * (2^64 - 1), no overflow
    let mid = (p00 >> 64) + (p01 & LOW_MASK) + (p10 & LOW_MASK);
    let low = (p00 & LOW_MASK) | (mid << 64);
    let high = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
    (high, low)
}

/// Divides the 256-bit value `(high, low)` by `divisor`.
///
/// Returns `(quotient, remainder)`, or `None` if `divisor` is zero or the
/// quotient does not fit in `u128` (`high >= divisor`).
const fn div_wide(high: u128, low: u128, divisor: u128) -> Option<(u128, u128)> {
    if divisor == 0 || high >= divisor {
        return None;
    }
    if high == 0 {
        return Some((low / divisor, low % divisor));
    }
    let mut rem = high;
    let mut quot = 0u128;
    let mut bit = 128;
    while bit > 0 {
        bit -= 1;
        let carry = rem >> 127;
        rem = (rem << 1) | ((low >> bit) & 1);
        quot <<= 1;
        if carry == 1 || rem >= divisor {
            rem = rem.wrapping_sub(divisor);
            quot |= 1;
        }
    }
    Some((quot, rem))
}

/// Computes `a * b / divisor` with a 256-bit intermediate product.
///
/// Returns `None` if `divisor` is zero or the rounded quotient exceeds
/// `u128::MAX`.
#[must_use]
pub const fn mul_div(a: u128, b: u128, divisor: u128, rounding: Rounding) -> Option<u128> {
    let (high, low) = widening_mul(a, b);
    match div_wide(high, low, divisor) {
        Some((q, r)) => match rounding {
            Rounding::Down => Some(q),
            Rounding::Up => {
                if r == 0 {
                    Some(q)
                } else {
                    q.checked_add(1)
                }
            }
        },
        None => None,
    }
}

/// Compares `a * b` with `c * d` without overflow.
#[must_use]
pub fn cmp_products(a: u128, b: u128, c: u128, d: u128) -> Ordering {
    widening_mul(a, b).cmp(&widening_mul(c, d))
}

/// `floor(sqrt(a * b))`.
///
/// The root of a 256-bit product always fits in `u128`.
#[must_use]
pub fn sqrt_product(a: u128, b: u128) -> u128 {
    if let Some(n) = a.checked_mul(b) {
        return isqrt(n);
    }
    let target = widening_mul(a, b);
    let (mut lo, mut hi) = (0u128, u128::MAX);
    while lo < hi {
        let mid = lo + (hi - lo).div_ceil(2);
        if widening_mul(mid, mid) <= target {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo
}

/// Integer square root via Newton's method.
#[must_use]
pub const fn isqrt(n: u128) -> u128 {
    if n == 0 {
        return 0;
    }
    let mut x = n;
    let mut y = x.div_ceil(2);
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
