//! Checked arithmetic trait for domain wrapper types.
//!
//! [`CheckedArithmetic`] maps the `Option`-returning primitives on
//! [`Amount`] and [`Shares`] to [`AmmError`] variants so that state
//! transitions can propagate failures with `?`.
//!
//! # Examples
//!
//! ```
//! use amm_exchange::domain::Amount;
//! use amm_exchange::math::CheckedArithmetic;
//!
//! let reserve = Amount::new(1_000);
//! assert_eq!(reserve.safe_add(&Amount::new(1_000)).ok(), Some(Amount::new(2_000)));
//! assert!(reserve.safe_sub(&Amount::new(1_001)).is_err());
//! ```

use crate::domain::{Amount, Rounding, Shares};
use crate::error::AmmError;

/// Fallible arithmetic for domain wrapper types.
///
/// # Contract
///
/// - **No panics**: all error conditions produce `Err`.
/// - **No saturation**: errors propagate instead.
pub trait CheckedArithmetic: Sized {
    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result exceeds the
    /// representable range.
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticUnderflow`] if the result would be
    /// negative.
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked multiplication.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the result exceeds the
    /// representable range.
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError>;

    /// Checked division with explicit [`Rounding`] direction.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::DivisionByZero`] if `other` is zero.
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError>;
}

impl CheckedArithmetic for Amount {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("amount addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticUnderflow("amount subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_mul(other)
            .ok_or(AmmError::ArithmeticOverflow("amount multiplication overflow"))
    }

    #[inline]
    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        self.checked_div(other, rounding)
            .ok_or(AmmError::DivisionByZero)
    }
}

impl CheckedArithmetic for Shares {
    #[inline]
    fn safe_add(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_add(other)
            .ok_or(AmmError::ArithmeticOverflow("share addition overflow"))
    }

    #[inline]
    fn safe_sub(&self, other: &Self) -> Result<Self, AmmError> {
        self.checked_sub(other)
            .ok_or(AmmError::ArithmeticUnderflow("share subtraction underflow"))
    }

    #[inline]
    fn safe_mul(&self, other: &Self) -> Result<Self, AmmError> {
        self.get()
            .checked_mul(other.get())
            .map(Shares::new)
            .ok_or(AmmError::ArithmeticOverflow("share multiplication overflow"))
    }

    fn safe_div(&self, other: &Self, rounding: Rounding) -> Result<Self, AmmError> {
        super::div_round(self.get(), other.get(), rounding)
            .map(Shares::new)
            .ok_or(AmmError::DivisionByZero)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    mod amount {
        use super::*;

        #[test]
        fn add_overflow() {
            let Err(AmmError::ArithmeticOverflow(_)) = Amount::MAX.safe_add(&Amount::new(1)) else {
                panic!("expected ArithmeticOverflow");
            };
        }

        #[test]
        fn sub_underflow() {
            let Err(AmmError::ArithmeticUnderflow(_)) = Amount::new(1).safe_sub(&Amount::new(2))
            else {
                panic!("expected ArithmeticUnderflow");
            };
        }

        #[test]
        fn mul_ok() {
            let Ok(r) = Amount::new(1_000).safe_mul(&Amount::new(2_000)) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::new(2_000_000));
        }

        #[test]
        fn div_rounding_and_zero() {
            let Ok(r) = Amount::new(10).safe_div(&Amount::new(3), Rounding::Up) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Amount::new(4));
            assert_eq!(
                Amount::new(10).safe_div(&Amount::ZERO, Rounding::Down),
                Err(AmmError::DivisionByZero)
            );
        }
    }

    mod shares {
        use super::*;

        #[test]
        fn add_sub() {
            let Ok(sum) = Shares::new(5).safe_add(&Shares::new(7)) else {
                panic!("expected Ok");
            };
            assert_eq!(sum, Shares::new(12));
            let Err(AmmError::ArithmeticUnderflow(_)) = Shares::new(5).safe_sub(&Shares::new(7))
            else {
                panic!("expected ArithmeticUnderflow");
            };
        }

        #[test]
        fn mul_overflow() {
            let Err(AmmError::ArithmeticOverflow(_)) =
                Shares::new(u128::MAX).safe_mul(&Shares::new(2))
            else {
                panic!("expected ArithmeticOverflow");
            };
        }

        #[test]
        fn div_round_up() {
            let Ok(r) = Shares::new(10).safe_div(&Shares::new(4), Rounding::Up) else {
                panic!("expected Ok");
            };
            assert_eq!(r, Shares::new(3));
        }
    }
}
