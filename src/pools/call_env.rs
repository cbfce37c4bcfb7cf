//! Per-call execution environment handed to exchange operations.

use crate::domain::{Address, Amount};

/// Everything an exchange operation may touch outside its own state.
///
/// - `caller`: the account invoking the operation.
/// - `value`: currency attached to the call.  The host has already
///   credited it to the exchange's account when the operation runs.
/// - `token` / `currency`: the capability handles through which the
///   exchange pulls and pays assets.
#[derive(Debug)]
pub struct CallEnv<'a, T: ?Sized, C: ?Sized> {
    caller: Address,
    value: Amount,
    token: &'a mut T,
    currency: &'a mut C,
}

impl<'a, T: ?Sized, C: ?Sized> CallEnv<'a, T, C> {
    /// Creates an environment for one call.
    pub fn new(caller: Address, value: Amount, token: &'a mut T, currency: &'a mut C) -> Self {
        Self {
            caller,
            value,
            token,
            currency,
        }
    }

    /// Returns the invoking account.
    #[must_use]
    pub const fn caller(&self) -> Address {
        self.caller
    }

    /// Returns the attached currency.
    #[must_use]
    pub const fn value(&self) -> Amount {
        self.value
    }

    /// Returns the token handle.
    pub fn token(&mut self) -> &mut T {
        self.token
    }

    /// Returns the currency handle.
    pub fn currency(&mut self) -> &mut C {
        self.currency
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::config::TokenConfig;
    use crate::ledger::NativeCurrency;
    use crate::token::StandardToken;
    use crate::traits::{CurrencyLedger, FungibleToken};

    #[test]
    fn handles_reach_the_ledgers_they_wrap() {
        let owner = Address::from_bytes([1u8; 32]);
        let other = Address::from_bytes([2u8; 32]);
        let Ok(mut token) = StandardToken::new(owner, TokenConfig::default()) else {
            panic!("valid token");
        };
        let mut currency = NativeCurrency::new();
        let Ok(()) = currency.mint(owner, Amount::new(10)) else {
            panic!("mint");
        };

        let mut env = CallEnv::new(owner, Amount::new(3), &mut token, &mut currency);
        assert_eq!(env.caller(), owner);
        assert_eq!(env.value(), Amount::new(3));
        let Ok(()) = env.token().transfer(owner, other, Amount::new(7)) else {
            panic!("token transfer");
        };
        let Ok(()) = env.currency().transfer(owner, other, Amount::new(4)) else {
            panic!("currency transfer");
        };

        assert_eq!(token.balance_of(&other), Amount::new(7));
        assert_eq!(currency.balance_of(&other), Amount::new(4));
    }
}
