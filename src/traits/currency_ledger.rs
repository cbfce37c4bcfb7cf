//! Capability interface of the host ledger's base currency.

use crate::domain::{Address, Amount};
use crate::error::AmmError;

/// The base currency as the exchange sees it.
///
/// Attached currency is credited to the exchange's account by the host
/// before an operation runs; the exchange only ever reads balances and
/// pays currency out of its own account.
///
/// # Implementors
///
/// - [`NativeCurrency`](crate::ledger::NativeCurrency): in-memory
///   reference ledger.
pub trait CurrencyLedger {
    /// Currency held by `account`.
    #[must_use]
    fn balance_of(&self, account: &Address) -> Amount;

    /// Moves `amount` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`AmmError::ArithmeticOverflow`] if `to`'s balance would
    ///   overflow.
    fn transfer(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError>;
}
