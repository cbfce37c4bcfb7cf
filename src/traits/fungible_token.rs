//! Capability interface of the paired fungible token.
//!
//! The exchange never inspects a token's internal representation; it only
//! calls the operations below.  Implementations are untrusted from the
//! pool's point of view, which is why every exchange operation commits
//! its own state before calling into the token.
//!
//! # Delegated transfers
//!
//! `transfer_from` moves `amount` out of `from` on behalf of `caller`.
//! Standard semantics require `from` to have approved `caller` for at
//! least `amount`; the allowance is consumed by the transfer.

use crate::domain::{Address, Amount};
use crate::error::AmmError;

/// A fixed-supply fungible token ledger.
///
/// `caller` parameters identify the account on whose authority a mutating
/// call runs (the message sender on the host ledger).
///
/// # Implementors
///
/// - [`StandardToken`](crate::token::StandardToken): in-memory reference
///   ledger.
pub trait FungibleToken {
    /// Human-readable token name.
    #[must_use]
    fn name(&self) -> &str;

    /// Ticker symbol.
    #[must_use]
    fn symbol(&self) -> &str;

    /// Decimal places between a whole token and the raw unit.
    #[must_use]
    fn decimals(&self) -> u8;

    /// Fixed total supply.
    #[must_use]
    fn total_supply(&self) -> Amount;

    /// Balance held by `holder`.
    #[must_use]
    fn balance_of(&self, holder: &Address) -> Amount;

    /// Moves `amount` from `caller` to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] if `caller` holds less
    /// than `amount`.
    fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<(), AmmError>;

    /// Moves `amount` from `from` to `to` on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InsufficientAllowance`] if `from` has not approved
    ///   `caller` for at least `amount`.
    /// - [`AmmError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError>;

    /// Sets the amount `spender` may move out of `caller`'s balance,
    /// replacing any previous allowance.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InvalidToken`] if `spender` is the zero
    /// address.
    fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<(), AmmError>;

    /// Remaining amount `spender` may move out of `owner`'s balance.
    #[must_use]
    fn allowance(&self, owner: &Address, spender: &Address) -> Amount;
}
