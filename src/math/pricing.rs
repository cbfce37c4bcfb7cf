//! Constant-product pricing with an input-side trading fee.
//!
//! Both functions are pure: they read reserves and return a quote without
//! touching any state.
//!
//! # Exact input
//!
//! ```text
//! net        = input − ceil(input × fee_bps / 10 000)
//! output     = floor(net × output_reserve / (input_reserve + net))
//! ```
//!
//! # Exact output
//!
//! ```text
//! net_input  = ceil(input_reserve × output / (output_reserve − output))
//! input      = ceil(net_input × 10 000 / (10 000 − fee_bps))
//! ```
//!
//! Flooring the output and ceiling the input guarantee that
//! `input_reserve × output_reserve` never decreases across a trade.

use crate::domain::{Amount, FeeTier, Rounding};
use crate::error::AmmError;

use super::{CheckedArithmetic, mul_div};

/// Output delivered for an exact `input`.
///
/// Returns zero when the input is too small to buy a single raw unit; the
/// swap operations reject such trades, the quote does not.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `input` is zero.
/// - [`AmmError::InsufficientReserve`] if either reserve is zero.
/// - [`AmmError::ArithmeticOverflow`] if a reserve sum or the final
///   quote exceeds `u128`.
///
/// # Examples
///
/// ```
/// use amm_exchange::domain::{Amount, FeeTier};
/// use amm_exchange::math::get_input_price;
///
/// let out = get_input_price(
///     Amount::new(1_000),
///     Amount::new(1_000),
///     Amount::new(2_000),
///     FeeTier::TIER_0_30_PERCENT,
/// );
/// // net = 997, out = floor(997 * 2000 / 1997) = 998
/// assert_eq!(out.ok(), Some(Amount::new(998)));
/// ```
pub fn get_input_price(
    input: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if input.is_zero() {
        return Err(AmmError::ZeroAmount("input amount"));
    }
    if input_reserve.is_zero() || output_reserve.is_zero() {
        return Err(AmmError::InsufficientReserve);
    }
    let net = fee.net_of_fee(input)?;
    let denominator = input_reserve.safe_add(&net)?;
    mul_div(net, output_reserve, denominator, Rounding::Down)
}

/// Input required to receive exactly `output`.
///
/// # Errors
///
/// - [`AmmError::ZeroAmount`] if `output` is zero.
/// - [`AmmError::InsufficientReserve`] if either reserve is zero or
///   `output >= output_reserve`.
/// - [`AmmError::InvalidFee`] if the fee is 100% or more.
/// - [`AmmError::ArithmeticOverflow`] if the required input exceeds
///   `u128`.
///
/// # Examples
///
/// ```
/// use amm_exchange::domain::{Amount, FeeTier};
/// use amm_exchange::math::get_output_price;
///
/// let input = get_output_price(
///     Amount::new(998),
///     Amount::new(1_000),
///     Amount::new(2_000),
///     FeeTier::TIER_0_30_PERCENT,
/// );
/// assert!(input.is_ok());
/// ```
pub fn get_output_price(
    output: Amount,
    input_reserve: Amount,
    output_reserve: Amount,
    fee: FeeTier,
) -> Result<Amount, AmmError> {
    if output.is_zero() {
        return Err(AmmError::ZeroAmount("output amount"));
    }
    if input_reserve.is_zero() || output >= output_reserve {
        return Err(AmmError::InsufficientReserve);
    }
    let remaining = output_reserve.safe_sub(&output)?;
    let net_input = mul_div(input_reserve, output, remaining, Rounding::Up)?;
    fee.gross_up(net_input)
}
