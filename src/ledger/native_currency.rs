//! In-memory base-currency balances.

use std::collections::HashMap;

use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::CurrencyLedger;

/// Reference [`CurrencyLedger`]: a plain account → balance map.
///
/// Currency enters circulation only through [`mint`](Self::mint), which
/// stands in for genesis allocations and faucets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NativeCurrency {
    balances: HashMap<Address, Amount>,
    supply: Amount,
}

impl NativeCurrency {
    /// Creates a ledger with no balances.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits freshly created currency to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the balance or the
    /// circulating supply would overflow.
    pub fn mint(&mut self, to: Address, amount: Amount) -> Result<(), AmmError> {
        let supply = self.supply.safe_add(&amount)?;
        let balance = self.balance_of(&to).safe_add(&amount)?;
        self.supply = supply;
        self.balances.insert(to, balance);
        tracing::debug!(%to, %amount, "currency minted");
        Ok(())
    }

    /// Total currency ever minted.
    #[must_use]
    pub const fn supply(&self) -> Amount {
        self.supply
    }
}

impl CurrencyLedger for NativeCurrency {
    fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        let from_balance = self.balance_of(&from);
        if from_balance < amount {
            return Err(AmmError::InsufficientBalance);
        }
        if from == to {
            return Ok(());
        }
        let debited = from_balance.safe_sub(&amount)?;
        let credited = self.balance_of(&to).safe_add(&amount)?;
        self.balances.insert(from, debited);
        self.balances.insert(to, credited);
        tracing::trace!(%from, %to, %amount, "currency transfer");
        Ok(())
    }
}
