//! Token → exchange registry.

use std::collections::HashMap;

use crate::config::ExchangeConfig;
use crate::domain::Address;
use crate::error::AmmError;
use crate::pools::Exchange;

/// Namespace tag for exchange addresses minted by the registry.
pub const EXCHANGE_ADDRESS_TAG: u8 = 0xE0;

/// Creates at most one [`Exchange`] per token and resolves lookups in
/// both directions.
///
/// The registry owns the exchanges it creates.  Every exchange receives
/// the registry's [`ExchangeConfig`] and a fresh address derived from
/// its creation index, so no two exchanges ever share an address.
///
/// # Example
///
/// ```rust
/// use amm_exchange::domain::Address;
/// use amm_exchange::error::AmmError;
/// use amm_exchange::factory::ExchangeRegistry;
///
/// let token = Address::from_bytes([7u8; 32]);
/// let mut registry = ExchangeRegistry::default();
///
/// let pool = registry.create_exchange(token).expect("first creation");
/// assert_eq!(registry.get_exchange(&token), Some(pool));
/// assert_eq!(registry.get_token(&pool), Some(token));
/// assert_eq!(registry.create_exchange(token), Err(AmmError::DuplicateExchange));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeRegistry {
    config: ExchangeConfig,
    token_to_exchange: HashMap<Address, Address>,
    exchange_to_token: HashMap<Address, Address>,
    exchanges: HashMap<Address, Exchange>,
    tokens: Vec<Address>,
}

impl ExchangeRegistry {
    /// Creates an empty registry that stamps `config` onto every
    /// exchange.
    ///
    /// # Errors
    ///
    /// Any error from [`ExchangeConfig::validate`].
    pub fn new(config: ExchangeConfig) -> Result<Self, AmmError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Creates the exchange for `token` and returns its address.
    ///
    /// # Flow
    ///
    /// 1. Reject the zero address.
    /// 2. Reject a token that already has an exchange.
    /// 3. Derive the next exchange address and construct the pool.
    /// 4. Record the mapping in both directions.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if `token` is the zero address.
    /// - [`AmmError::DuplicateExchange`] if `token` already has an
    ///   exchange.
    /// - [`AmmError::ArithmeticOverflow`] if the creation index no longer
    ///   fits the address scheme.
    pub fn create_exchange(&mut self, token: Address) -> Result<Address, AmmError> {
        if token.is_zero() {
            return Err(AmmError::InvalidToken("token address must not be zero"));
        }
        if self.token_to_exchange.contains_key(&token) {
            return Err(AmmError::DuplicateExchange);
        }

        let index = u64::try_from(self.tokens.len())
            .ok()
            .and_then(|n| n.checked_add(1))
            .ok_or(AmmError::ArithmeticOverflow("exchange index overflow"))?;
        let address = Address::derive(EXCHANGE_ADDRESS_TAG, index);
        let exchange = Exchange::new(address, token, self.config)?;

        self.token_to_exchange.insert(token, address);
        self.exchange_to_token.insert(address, token);
        self.exchanges.insert(address, exchange);
        self.tokens.push(token);

        tracing::info!(%token, exchange = %address, index, "exchange created");
        Ok(address)
    }

    /// Exchange registered for `token`, if any.
    #[must_use]
    pub fn get_exchange(&self, token: &Address) -> Option<Address> {
        self.token_to_exchange.get(token).copied()
    }

    /// Token served by the exchange at `exchange`, if any.
    #[must_use]
    pub fn get_token(&self, exchange: &Address) -> Option<Address> {
        self.exchange_to_token.get(exchange).copied()
    }

    /// Number of tokens with an exchange.
    #[must_use]
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Token whose exchange was created `index`-th (zero-based).
    #[must_use]
    pub fn token_with_id(&self, index: usize) -> Option<Address> {
        self.tokens.get(index).copied()
    }

    /// The exchange at `address`.
    #[must_use]
    pub fn exchange(&self, address: &Address) -> Option<&Exchange> {
        self.exchanges.get(address)
    }

    /// Mutable access to the exchange at `address`.
    pub fn exchange_mut(&mut self, address: &Address) -> Option<&mut Exchange> {
        self.exchanges.get_mut(address)
    }

    /// Configuration applied to new exchanges.
    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{BasisPoints, FeeTier};

    fn token(n: u8) -> Address {
        Address::from_bytes([n; 32])
    }

    #[test]
    fn create_and_lookup_both_ways() {
        let mut registry = ExchangeRegistry::default();
        let Ok(pool) = registry.create_exchange(token(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.get_exchange(&token(1)), Some(pool));
        assert_eq!(registry.get_token(&pool), Some(token(1)));
        assert_eq!(registry.token_count(), 1);
        assert_eq!(registry.token_with_id(0), Some(token(1)));
        assert_eq!(registry.token_with_id(1), None);
    }

    #[test]
    fn unknown_lookups_are_absent() {
        let registry = ExchangeRegistry::default();
        assert_eq!(registry.get_exchange(&token(9)), None);
        assert_eq!(registry.get_token(&token(9)), None);
        assert!(registry.exchange(&token(9)).is_none());
    }

    #[test]
    fn duplicate_rejected() {
        let mut registry = ExchangeRegistry::default();
        let Ok(first) = registry.create_exchange(token(1)) else {
            panic!("expected Ok");
        };
        assert_eq!(registry.create_exchange(token(1)), Err(AmmError::DuplicateExchange));
        assert_eq!(registry.get_exchange(&token(1)), Some(first));
        assert_eq!(registry.token_count(), 1);
    }

    #[test]
    fn zero_token_rejected() {
        let mut registry = ExchangeRegistry::default();
        assert!(matches!(
            registry.create_exchange(Address::ZERO),
            Err(AmmError::InvalidToken(_))
        ));
        assert_eq!(registry.token_count(), 0);
    }

    #[test]
    fn addresses_are_distinct() {
        let mut registry = ExchangeRegistry::default();
        let Ok(a) = registry.create_exchange(token(1)) else {
            panic!("expected Ok");
        };
        let Ok(b) = registry.create_exchange(token(2)) else {
            panic!("expected Ok");
        };
        assert_ne!(a, b);
        assert_eq!(registry.token_with_id(1), Some(token(2)));
    }

    #[test]
    fn config_is_stamped_on_exchanges() {
        let fee = FeeTier::new(BasisPoints::new(100));
        let Ok(cfg) = ExchangeConfig::new(fee) else {
            panic!("valid config");
        };
        let Ok(mut registry) = ExchangeRegistry::new(cfg) else {
            panic!("valid registry");
        };
        let Ok(pool) = registry.create_exchange(token(1)) else {
            panic!("expected Ok");
        };
        let Some(exchange) = registry.exchange(&pool) else {
            panic!("exchange stored");
        };
        assert_eq!(exchange.fee_tier(), fee);
        assert_eq!(exchange.token(), token(1));
    }
}
