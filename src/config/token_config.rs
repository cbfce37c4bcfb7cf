//! Configuration for the reference fungible token.

use crate::domain::{Amount, Decimals};
use crate::error::AmmError;

/// Parameters of a [`StandardToken`](crate::token::StandardToken).
///
/// The whole `total_supply` is minted to the deploying account.
///
/// `owner_privileged_transfers` enables a non-standard path where the
/// token owner may call `transfer_from` on its own balance without a
/// prior `approve`.  It is off by default; standard allowance semantics
/// apply to everyone else regardless of the flag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TokenConfig {
    name: String,
    symbol: String,
    decimals: Decimals,
    total_supply: Amount,
    owner_privileged_transfers: bool,
}

impl TokenConfig {
    /// Creates a validated `TokenConfig` with standard allowance
    /// semantics.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the name or symbol is
    /// empty or the supply is zero.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        decimals: Decimals,
        total_supply: Amount,
    ) -> Result<Self, AmmError> {
        let config = Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
            total_supply,
            owner_privileged_transfers: false,
        };
        config.validate()?;
        Ok(config)
    }

    /// Enables or disables the owner-privileged `transfer_from` path.
    #[must_use]
    pub fn with_owner_privileged_transfers(mut self, enabled: bool) -> Self {
        self.owner_privileged_transfers = enabled;
        self
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidConfiguration`] if the name or symbol is
    /// empty or the supply is zero.
    pub fn validate(&self) -> Result<(), AmmError> {
        if self.name.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("token name must not be empty"));
        }
        if self.symbol.trim().is_empty() {
            return Err(AmmError::InvalidConfiguration("token symbol must not be empty"));
        }
        if self.total_supply.is_zero() {
            return Err(AmmError::InvalidConfiguration("total supply must be positive"));
        }
        Ok(())
    }

    /// Returns the token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the ticker symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Returns the decimal places.
    #[must_use]
    pub const fn decimals(&self) -> Decimals {
        self.decimals
    }

    /// Returns the fixed total supply.
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Returns `true` if the owner may bypass allowances on its own
    /// balance.
    #[must_use]
    pub const fn owner_privileged_transfers(&self) -> bool {
        self.owner_privileged_transfers
    }
}

impl Default for TokenConfig {
    /// `MyToken` / `MTN`, 18 decimals, supply of 10 whole tokens
    /// (10^19 raw units), standard allowances.
    fn default() -> Self {
        Self {
            name: "MyToken".to_owned(),
            symbol: "MTN".to_owned(),
            decimals: Decimals::MAX,
            total_supply: Decimals::MAX.whole(10),
            owner_privileged_transfers: false,
        }
    }
}
