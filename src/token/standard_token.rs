//! In-memory fixed-supply token with standard allowance semantics.

use std::collections::HashMap;

use crate::config::TokenConfig;
use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::math::CheckedArithmetic;
use crate::traits::FungibleToken;

/// Reference [`FungibleToken`] ledger.
///
/// The full supply is minted to `owner` at construction.  Every mutating
/// call validates before it writes, so a failed call leaves balances and
/// allowances untouched.
///
/// # Example
///
/// ```rust
/// use amm_exchange::config::TokenConfig;
/// use amm_exchange::domain::{Address, Amount};
/// use amm_exchange::token::StandardToken;
/// use amm_exchange::traits::FungibleToken;
///
/// let owner = Address::from_bytes([1u8; 32]);
/// let pool = Address::from_bytes([2u8; 32]);
/// let mut token = StandardToken::new(owner, TokenConfig::default()).expect("valid");
///
/// token.approve(owner, pool, Amount::new(500)).expect("approve");
/// token.transfer_from(pool, owner, pool, Amount::new(200)).expect("pull");
/// assert_eq!(token.balance_of(&pool), Amount::new(200));
/// assert_eq!(token.allowance(&owner, &pool), Amount::new(300));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandardToken {
    owner: Address,
    config: TokenConfig,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl StandardToken {
    /// Creates the token and mints the whole supply to `owner`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `owner` is the zero address.
    /// - Any error from [`TokenConfig::validate`].
    pub fn new(owner: Address, config: TokenConfig) -> Result<Self, AmmError> {
        config.validate()?;
        if owner.is_zero() {
            return Err(AmmError::InvalidToken("token owner must not be the zero address"));
        }
        let mut balances = HashMap::new();
        balances.insert(owner, config.total_supply());
        tracing::debug!(
            %owner,
            symbol = config.symbol(),
            supply = %config.total_supply(),
            "token created"
        );
        Ok(Self {
            owner,
            config,
            balances,
            allowances: HashMap::new(),
        })
    }

    /// Returns the account that received the initial supply.
    #[must_use]
    pub const fn owner(&self) -> Address {
        self.owner
    }

    /// Returns the token configuration.
    #[must_use]
    pub const fn config(&self) -> &TokenConfig {
        &self.config
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
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
        Ok(())
    }
}

impl FungibleToken for StandardToken {
    fn name(&self) -> &str {
        self.config.name()
    }

    fn symbol(&self) -> &str {
        self.config.symbol()
    }

    fn decimals(&self) -> u8 {
        self.config.decimals().get()
    }

    fn total_supply(&self) -> Amount {
        self.config.total_supply()
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    fn transfer(&mut self, caller: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        self.move_balance(caller, to, amount)?;
        tracing::trace!(from = %caller, %to, %amount, "token transfer");
        Ok(())
    }

    fn transfer_from(
        &mut self,
        caller: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        let privileged = self.config.owner_privileged_transfers()
            && caller == self.owner
            && from == self.owner;
        if privileged {
            self.move_balance(from, to, amount)?;
            tracing::debug!(%from, %to, %amount, "owner-privileged transfer_from");
            return Ok(());
        }

        let allowed = self.allowance(&from, &caller);
        if allowed < amount {
            return Err(AmmError::InsufficientAllowance);
        }
        let remaining = allowed.safe_sub(&amount)?;
        self.move_balance(from, to, amount)?;
        self.allowances.insert((from, caller), remaining);
        tracing::trace!(spender = %caller, %from, %to, %amount, "token transfer_from");
        Ok(())
    }

    fn approve(&mut self, caller: Address, spender: Address, amount: Amount) -> Result<(), AmmError> {
        if spender.is_zero() {
            return Err(AmmError::InvalidToken("cannot approve the zero address"));
        }
        self.allowances.insert((caller, spender), amount);
        tracing::trace!(owner = %caller, %spender, %amount, "token approval");
        Ok(())
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }
}
