//! Configuration applied to every exchange a registry creates.

use crate::domain::{BasisPoints, FeeTier};
use crate::error::AmmError;

/// Immutable parameters of an exchange.
///
/// The only tunable is the trading fee.  It is a configuration value
/// rather than a hard-coded constant; the default is 30 bp (0.30%).
///
/// # Validation
///
/// The fee must be strictly below 100%: a full fee leaves no net input
/// to price and makes exact-output quotes undefined.
///
/// # Examples
///
/// ```
/// use amm_exchange::config::ExchangeConfig;
/// use amm_exchange::domain::{BasisPoints, FeeTier};
///
/// let cfg = ExchangeConfig::new(FeeTier::new(BasisPoints::new(25))).expect("valid");
/// assert_eq!(cfg.fee_tier().basis_points().get(), 25);
/// assert_eq!(ExchangeConfig::default().fee_tier(), FeeTier::TIER_0_30_PERCENT);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExchangeConfig {
    fee_tier: FeeTier,
}

impl ExchangeConfig {
    /// Creates a validated `ExchangeConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub fn new(fee_tier: FeeTier) -> Result<Self, AmmError> {
        let config = Self { fee_tier };
        config.validate()?;
        Ok(config)
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidFee`] if the fee is 100% or more.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.fee_tier.basis_points() >= BasisPoints::MAX_PERCENT {
            return Err(AmmError::InvalidFee("fee must be below 10000 bp"));
        }
        Ok(())
    }

    /// Returns the trading fee.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.fee_tier
    }
}
