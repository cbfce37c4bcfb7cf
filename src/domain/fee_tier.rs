//! Trading fee charged on the input side of every swap.

use core::fmt;

use super::{Amount, BasisPoints, Rounding};
use crate::error::AmmError;

/// The fee rate an exchange deducts from trade inputs.
///
/// The fee always stays in the pool: the full input is added to its
/// reserve, but only the net-of-fee portion is priced against the curve.
///
/// ```text
/// fee       = ceil(amount × bps / 10 000)
/// net_input = amount − fee
/// ```
///
/// # Examples
///
/// ```
/// use amm_exchange::domain::{Amount, FeeTier};
///
/// let tier = FeeTier::TIER_0_30_PERCENT;
/// assert_eq!(tier.net_of_fee(Amount::new(1_000)).ok(), Some(Amount::new(997)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct FeeTier(BasisPoints);

impl FeeTier {
    /// No fee.
    pub const ZERO: Self = Self(BasisPoints::ZERO);

    /// 0.05% fee (5 bp).
    pub const TIER_0_05_PERCENT: Self = Self(BasisPoints::new(5));

    /// 0.30% fee (30 bp), the default for new exchanges.
    pub const TIER_0_30_PERCENT: Self = Self(BasisPoints::new(30));

    /// 1.00% fee (100 bp).
    pub const TIER_1_00_PERCENT: Self = Self(BasisPoints::new(100));

    /// Creates a `FeeTier` from arbitrary [`BasisPoints`].
    ///
    /// Range checking happens in
    /// [`ExchangeConfig::validate`](crate::config::ExchangeConfig::validate).
    #[must_use]
    pub const fn new(basis_points: BasisPoints) -> Self {
        Self(basis_points)
    }

    /// Returns the underlying [`BasisPoints`].
    #[must_use]
    pub const fn basis_points(&self) -> BasisPoints {
        self.0
    }

    /// Fee owed on `amount`, rounded up in the pool's favour.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if `amount × bps`
    /// overflows.
    pub const fn fee_on(&self, amount: Amount) -> crate::error::Result<Amount> {
        self.0.apply(amount, Rounding::Up)
    }

    /// The part of `amount` that is priced after the fee is withheld.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the fee computation
    /// overflows, or [`AmmError::ArithmeticUnderflow`] for a fee above
    /// 100%.
    pub fn net_of_fee(&self, amount: Amount) -> crate::error::Result<Amount> {
        let fee = self.fee_on(amount)?;
        amount
            .checked_sub(&fee)
            .ok_or(AmmError::ArithmeticUnderflow("fee exceeds input"))
    }

    /// Smallest gross input whose net-of-fee portion covers `net`.
    ///
    /// `gross = ceil(net × 10 000 / (10 000 − bps))`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidFee`] if the fee is 100% or more.
    /// - [`AmmError::ArithmeticOverflow`] if the grossed-up input exceeds
    ///   `u128`.
    pub fn gross_up(&self, net: Amount) -> crate::error::Result<Amount> {
        let complement = self.0.complement().get();
        if complement == 0 {
            return Err(AmmError::InvalidFee("fee of 100% makes every trade impossible"));
        }
        crate::math::mul_div(
            net,
            Amount::new(u128::from(BasisPoints::MAX_PERCENT.get())),
            Amount::new(u128::from(complement)),
            Rounding::Up,
        )
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::TIER_0_30_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FeeTier({})", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn default_is_thirty_bp() {
        assert_eq!(FeeTier::default().basis_points().get(), 30);
    }

    #[test]
    fn fee_rounds_up() {
        let Ok(fee) = FeeTier::TIER_0_30_PERCENT.fee_on(Amount::new(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(fee, Amount::new(1));
    }

    #[test]
    fn net_of_fee_rounds_down() {
        // 2_000 * 0.997 = 1_994
        let Ok(net) = FeeTier::TIER_0_30_PERCENT.net_of_fee(Amount::new(2_000)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::new(1_994));
        // 1_001 * 0.997 = 997.997 -> 997
        let Ok(net) = FeeTier::TIER_0_30_PERCENT.net_of_fee(Amount::new(1_001)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::new(997));
    }

    #[test]
    fn zero_fee_is_identity() {
        let Ok(net) = FeeTier::ZERO.net_of_fee(Amount::new(12_345)) else {
            panic!("expected Ok");
        };
        assert_eq!(net, Amount::new(12_345));
        let Ok(gross) = FeeTier::ZERO.gross_up(Amount::new(12_345)) else {
            panic!("expected Ok");
        };
        assert_eq!(gross, Amount::new(12_345));
    }

    #[test]
    fn gross_up_covers_net() {
        let tier = FeeTier::TIER_0_30_PERCENT;
        for net in [1u128, 7, 997, 1_000, 123_456_789] {
            let Ok(gross) = tier.gross_up(Amount::new(net)) else {
                panic!("expected Ok");
            };
            let Ok(back) = tier.net_of_fee(gross) else {
                panic!("expected Ok");
            };
            assert!(back.get() >= net, "gross {gross} nets {back} < {net}");
        }
    }

    #[test]
    fn gross_up_full_fee_rejected() {
        let tier = FeeTier::new(BasisPoints::MAX_PERCENT);
        assert!(matches!(
            tier.gross_up(Amount::new(1)),
            Err(AmmError::InvalidFee(_))
        ));
    }

    #[test]
    fn net_of_fee_above_full_fee_underflows() {
        let tier = FeeTier::new(BasisPoints::new(20_000));
        assert!(matches!(
            tier.net_of_fee(Amount::new(100)),
            Err(AmmError::ArithmeticUnderflow(_))
        ));
    }

    #[test]
    fn display() {
        assert_eq!(FeeTier::TIER_0_30_PERCENT.to_string(), "FeeTier(30bp)");
    }
}
