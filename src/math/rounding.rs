//! Rounding helpers for integer division.
//!
//! [`div_round`] is the low-level building block used by
//! [`Amount`](crate::domain::Amount); [`mul_div`] computes the
//! `a × b / d` ratios that drive pricing and liquidity accounting.
//!
//! # Convention
//!
//! **Always round against the caller** (pool-favourable):
//!
//! | Quantity | Direction |
//! |----------|-----------|
//! | Swap output, withdrawal payout, minted shares | [`Rounding::Down`] |
//! | Required swap input, deposit token amount, fee | [`Rounding::Up`] |

use bnum::types::U256;

use crate::domain::{Amount, Rounding};
use crate::error::AmmError;

/// Integer division of `u128` values with explicit rounding direction.
///
/// Returns [`None`] if `denominator` is zero.
///
/// # Examples
///
/// ```
/// use amm_exchange::domain::Rounding;
/// use amm_exchange::math::div_round;
///
/// assert_eq!(div_round(7, 2, Rounding::Down), Some(3));
/// assert_eq!(div_round(7, 2, Rounding::Up), Some(4));
/// assert_eq!(div_round(7, 0, Rounding::Up), None);
/// ```
#[must_use]
pub const fn div_round(numerator: u128, denominator: u128, rounding: Rounding) -> Option<u128> {
    if denominator == 0 {
        return None;
    }
    let q = numerator / denominator;
    match rounding {
        Rounding::Down => Some(q),
        Rounding::Up => {
            // q + 1 cannot overflow: a non-zero remainder implies q < u128::MAX.
            if numerator % denominator != 0 {
                Some(q + 1)
            } else {
                Some(q)
            }
        }
    }
}

/// Computes `a × b / d` with explicit rounding.
///
/// The product is formed in a 256-bit intermediate, so only a quotient
/// that does not fit in `u128` is an overflow.
///
/// # Errors
///
/// - [`AmmError::ArithmeticOverflow`] if the rounded quotient exceeds
///   `u128`.
/// - [`AmmError::DivisionByZero`] if `d` is zero.
///
/// # Examples
///
/// ```
/// use amm_exchange::domain::{Amount, Rounding};
/// use amm_exchange::math::mul_div;
///
/// let tokens = mul_div(Amount::new(3), Amount::new(1_000), Amount::new(7), Rounding::Up);
/// assert_eq!(tokens.ok(), Some(Amount::new(429)));
///
/// // 100 ether against 5 whole tokens: the product exceeds u128, the ratio does not
/// let ether = 1_000_000_000_000_000_000_u128;
/// let out = mul_div(Amount::new(100 * ether), Amount::new(5 * ether), Amount::new(200 * ether), Rounding::Down);
/// assert_eq!(out.ok(), Some(Amount::new(5 * ether / 2)));
/// ```
pub fn mul_div(a: Amount, b: Amount, d: Amount, rounding: Rounding) -> crate::error::Result<Amount> {
    if d.is_zero() {
        return Err(AmmError::DivisionByZero);
    }
    let denominator = U256::from(d.get());
    // Two u128 factors always fit in 256 bits.
    let product = U256::from(a.get())
        .checked_mul(U256::from(b.get()))
        .ok_or(AmmError::ArithmeticOverflow("mul_div product overflow"))?;
    let quotient = product
        .checked_div(denominator)
        .ok_or(AmmError::DivisionByZero)?;
    let remainder = product
        .checked_rem(denominator)
        .ok_or(AmmError::DivisionByZero)?;
    let rounded = match rounding {
        Rounding::Up if !remainder.is_zero() => quotient
            .checked_add(U256::ONE)
            .ok_or(AmmError::ArithmeticOverflow("mul_div rounding overflow"))?,
        _ => quotient,
    };
    u128::try_from(rounded)
        .map(Amount::new)
        .map_err(|_| AmmError::ArithmeticOverflow("mul_div result exceeds u128"))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn div_by_zero_returns_none() {
        assert_eq!(div_round(100, 0, Rounding::Down), None);
        assert_eq!(div_round(0, 0, Rounding::Up), None);
    }

    #[test]
    fn zero_numerator() {
        assert_eq!(div_round(0, 5, Rounding::Down), Some(0));
        assert_eq!(div_round(0, 5, Rounding::Up), Some(0));
    }

    #[test]
    fn exact_division_agrees() {
        assert_eq!(div_round(100, 10, Rounding::Down), Some(10));
        assert_eq!(div_round(100, 10, Rounding::Up), Some(10));
    }

    #[test]
    fn remainder_rounds_apart() {
        assert_eq!(div_round(9, 10, Rounding::Down), Some(0));
        assert_eq!(div_round(9, 10, Rounding::Up), Some(1));
    }

    #[test]
    fn max_numerator() {
        assert_eq!(div_round(u128::MAX, 1, Rounding::Up), Some(u128::MAX));
        let d = u128::MAX / 2;
        assert_eq!(div_round(u128::MAX, d, Rounding::Down), Some(2));
        assert_eq!(div_round(u128::MAX, d, Rounding::Up), Some(3));
    }

    #[test]
    fn mul_div_ceiling_for_deposits() {
        // 2e18 currency against reserves (2e18, 1000): exact ratio, no rounding
        let c = Amount::new(2_000_000_000_000_000_000);
        let Ok(t) = mul_div(c, Amount::new(1_000), c, Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(t, Amount::new(1_000));
    }

    #[test]
    fn mul_div_wide_product_narrows_back() {
        let Ok(v) = mul_div(Amount::MAX, Amount::new(2), Amount::new(2), Rounding::Down) else {
            panic!("expected Ok");
        };
        assert_eq!(v, Amount::MAX);
        let Ok(v) = mul_div(Amount::MAX, Amount::MAX, Amount::MAX, Rounding::Up) else {
            panic!("expected Ok");
        };
        assert_eq!(v, Amount::MAX);
    }

    #[test]
    fn mul_div_at_eighteen_decimals() {
        const ETHER: u128 = 1_000_000_000_000_000_000;
        // 1e20 × 5e18 is far past u128::MAX
        let Ok(v) = mul_div(
            Amount::new(100 * ETHER),
            Amount::new(5 * ETHER),
            Amount::new(300 * ETHER),
            Rounding::Down,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(v, Amount::new(5 * ETHER / 3));
        let Ok(up) = mul_div(
            Amount::new(100 * ETHER),
            Amount::new(5 * ETHER),
            Amount::new(300 * ETHER),
            Rounding::Up,
        ) else {
            panic!("expected Ok");
        };
        assert_eq!(up, Amount::new(5 * ETHER / 3 + 1));
    }

    #[test]
    fn mul_div_overflow() {
        let result = mul_div(Amount::MAX, Amount::new(2), Amount::new(1), Rounding::Down);
        assert!(matches!(result, Err(AmmError::ArithmeticOverflow(_))));
    }

    #[test]
    fn mul_div_zero_divisor() {
        let result = mul_div(Amount::new(1), Amount::new(2), Amount::ZERO, Rounding::Down);
        assert_eq!(result, Err(AmmError::DivisionByZero));
    }
}
