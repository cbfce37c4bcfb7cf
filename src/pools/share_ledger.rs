//! Holder → liquidity-share bookkeeping.

use std::collections::HashMap;

use crate::domain::{Address, Shares};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;

/// Outstanding liquidity claims of one exchange.
///
/// # Invariant
///
/// The sum of all holdings equals [`total`](Self::total) after every
/// call.  Each mutation computes all new values before writing any of
/// them, so a failed call leaves the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShareLedger {
    holdings: HashMap<Address, Shares>,
    total: Shares,
}

impl ShareLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all outstanding shares.
    #[must_use]
    pub const fn total(&self) -> Shares {
        self.total
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: &Address) -> Shares {
        self.holdings.get(holder).copied().unwrap_or_default()
    }

    /// Number of accounts holding a non-zero claim.
    #[must_use]
    pub fn holder_count(&self) -> usize {
        self.holdings.len()
    }

    /// Credits `shares` to `to` and grows the total.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] if the holder balance or
    /// the total would overflow.
    pub fn mint(&mut self, to: Address, shares: Shares) -> Result<(), AmmError> {
        let total = self.total.safe_add(&shares)?;
        let balance = self.balance_of(&to).safe_add(&shares)?;
        self.total = total;
        self.set(to, balance);
        Ok(())
    }

    /// Debits `shares` from `from` and shrinks the total.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer than
    ///   `shares`.
    /// - [`AmmError::ArithmeticUnderflow`] if the total would underflow.
    pub fn burn(&mut self, from: Address, shares: Shares) -> Result<(), AmmError> {
        let balance = self
            .balance_of(&from)
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientShares)?;
        let total = self.total.safe_sub(&shares)?;
        self.total = total;
        self.set(from, balance);
        Ok(())
    }

    /// Moves `shares` from `from` to `to`; the total is unchanged.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientShares`] if `from` holds fewer than
    ///   `shares`.
    /// - [`AmmError::ArithmeticOverflow`] if `to`'s balance would
    ///   overflow.
    pub fn transfer(&mut self, from: Address, to: Address, shares: Shares) -> Result<(), AmmError> {
        let debited = self
            .balance_of(&from)
            .checked_sub(&shares)
            .ok_or(AmmError::InsufficientShares)?;
        if from == to {
            return Ok(());
        }
        let credited = self.balance_of(&to).safe_add(&shares)?;
        self.set(from, debited);
        self.set(to, credited);
        Ok(())
    }

    /// Sums every holding; equals [`total`](Self::total) when the
    /// invariant holds.
    #[must_use]
    pub fn sum_of_holdings(&self) -> Option<Shares> {
        self.holdings
            .values()
            .try_fold(Shares::ZERO, |acc, s| acc.checked_add(s))
    }

    fn set(&mut self, holder: Address, shares: Shares) {
        if shares.is_zero() {
            self.holdings.remove(&holder);
        } else {
            self.holdings.insert(holder, shares);
        }
    }
}
