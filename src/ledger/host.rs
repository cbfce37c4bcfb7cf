//! Host runtime: accounts, deployed tokens, exchanges, atomic calls.

use std::collections::BTreeMap;

use crate::config::ExchangeConfig;
use crate::domain::{Address, Amount};
use crate::error::AmmError;
use crate::factory::ExchangeRegistry;
use crate::pools::{CallEnv, Checkpoint, Exchange};
use crate::traits::{CurrencyLedger, FungibleToken};

use super::NativeCurrency;

/// Namespace tag for token addresses assigned by [`Ledger::deploy_token`].
pub const TOKEN_ADDRESS_TAG: u8 = 0x70;

/// In-process stand-in for the platform an exchange runs on.
///
/// Holds the base currency, every deployed token, and the exchange
/// registry.  [`call`](Self::call) gives each exchange operation the
/// platform's transactional semantics:
///
/// 1. The attached value moves from the caller to the exchange before
///    the operation runs.
/// 2. If the operation fails, every effect of the call (value credit,
///    token movements, pool state) is discarded.
///
/// # Example
///
/// ```rust
/// use amm_exchange::config::{ExchangeConfig, TokenConfig};
/// use amm_exchange::domain::{Address, Amount, Decimals};
/// use amm_exchange::ledger::Ledger;
/// use amm_exchange::token::StandardToken;
/// use amm_exchange::traits::FungibleToken;
///
/// let owner = Address::from_bytes([1u8; 32]);
/// let mut ledger = Ledger::new(ExchangeConfig::default()).expect("valid");
/// ledger.mint_currency(owner, Decimals::MAX.whole(10)).expect("mint");
///
/// let token = ledger.deploy_token(StandardToken::new(owner, TokenConfig::default()).expect("token"));
/// let pool = ledger.create_exchange(token).expect("exchange");
///
/// ledger.approve(token, owner, pool, Amount::new(1_000)).expect("approve");
/// let shares = ledger
///     .call(pool, owner, Decimals::MAX.whole(2), |ex, env| ex.setup(Amount::new(1_000), env))
///     .expect("setup");
/// assert_eq!(shares.as_amount(), Decimals::MAX.whole(2));
/// ```
#[derive(Debug, Clone)]
pub struct Ledger<T> {
    currency: NativeCurrency,
    tokens: BTreeMap<Address, T>,
    registry: ExchangeRegistry,
}

impl<T: FungibleToken + Clone> Ledger<T> {
    /// Creates an empty ledger whose exchanges use `config`.
    ///
    /// # Errors
    ///
    /// Any error from [`ExchangeConfig::validate`].
    pub fn new(config: ExchangeConfig) -> Result<Self, AmmError> {
        Ok(Self {
            currency: NativeCurrency::new(),
            tokens: BTreeMap::new(),
            registry: ExchangeRegistry::new(config)?,
        })
    }

    /// Credits newly created currency to `to`.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::ArithmeticOverflow`] on overflow.
    pub fn mint_currency(&mut self, to: Address, amount: Amount) -> Result<(), AmmError> {
        self.currency.mint(to, amount)
    }

    /// Currency held by `account`.
    #[must_use]
    pub fn currency_balance(&self, account: &Address) -> Amount {
        self.currency.balance_of(account)
    }

    /// Moves currency between accounts outside any exchange call.
    ///
    /// # Errors
    ///
    /// Returns [`AmmError::InsufficientBalance`] on overdraft.
    pub fn send_currency(&mut self, from: Address, to: Address, amount: Amount) -> Result<(), AmmError> {
        self.currency.transfer(from, to, amount)
    }

    /// The base-currency ledger.
    #[must_use]
    pub const fn currency(&self) -> &NativeCurrency {
        &self.currency
    }

    /// Installs `token` at a fresh address and returns that address.
    pub fn deploy_token(&mut self, token: T) -> Address {
        let index = u64::try_from(self.tokens.len())
            .unwrap_or(u64::MAX)
            .saturating_add(1);
        let address = Address::derive(TOKEN_ADDRESS_TAG, index);
        tracing::debug!(%address, symbol = token.symbol(), "token deployed");
        self.tokens.insert(address, token);
        address
    }

    /// The token deployed at `address`.
    #[must_use]
    pub fn token(&self, address: &Address) -> Option<&T> {
        self.tokens.get(address)
    }

    /// Mutable access to the token deployed at `address`.
    pub fn token_mut(&mut self, address: &Address) -> Option<&mut T> {
        self.tokens.get_mut(address)
    }

    /// Token balance of `holder` in the token at `token`, or zero if no
    /// such token is deployed.
    #[must_use]
    pub fn token_balance(&self, token: &Address, holder: &Address) -> Amount {
        self.tokens
            .get(token)
            .map(|t| t.balance_of(holder))
            .unwrap_or_default()
    }

    /// Lets `spender` pull up to `amount` of `owner`'s tokens.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if no token is deployed at `token`.
    /// - Any error from [`FungibleToken::approve`].
    pub fn approve(
        &mut self,
        token: Address,
        owner: Address,
        spender: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.tokens
            .get_mut(&token)
            .ok_or(AmmError::InvalidToken("token not deployed"))?
            .approve(owner, spender, amount)
    }

    /// Moves `amount` of the token at `token` from `from` to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if no token is deployed at `token`.
    /// - Any error from [`FungibleToken::transfer`].
    pub fn send_token(
        &mut self,
        token: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<(), AmmError> {
        self.tokens
            .get_mut(&token)
            .ok_or(AmmError::InvalidToken("token not deployed"))?
            .transfer(from, to, amount)
    }

    /// The exchange registry.
    #[must_use]
    pub const fn registry(&self) -> &ExchangeRegistry {
        &self.registry
    }

    /// The exchange at `address`.
    #[must_use]
    pub fn exchange(&self, address: &Address) -> Option<&Exchange> {
        self.registry.exchange(address)
    }

    /// Creates the exchange for a deployed token.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if no token is deployed at `token`.
    /// - Any error from [`ExchangeRegistry::create_exchange`].
    pub fn create_exchange(&mut self, token: Address) -> Result<Address, AmmError> {
        if !self.tokens.contains_key(&token) {
            return Err(AmmError::InvalidToken("token not deployed"));
        }
        self.registry.create_exchange(token)
    }

    /// Runs `op` against the exchange at `exchange` as one atomic call
    /// from `caller` carrying `value` currency.
    ///
    /// # Errors
    ///
    /// - [`AmmError::ExchangeNotFound`] if nothing lives at `exchange`.
    /// - [`AmmError::InsufficientBalance`] if the caller cannot fund
    ///   `value`.
    /// - Whatever `op` returns.  In every error case the ledger is left
    ///   exactly as it was before the call.
    pub fn call<R, F>(&mut self, exchange: Address, caller: Address, value: Amount, op: F) -> Result<R, AmmError>
    where
        F: FnOnce(&mut Exchange, &mut CallEnv<'_, T, NativeCurrency>) -> Result<R, AmmError>,
    {
        // A call reaches one exchange, its token, and the currency; nothing else.
        let pool = self
            .registry
            .exchange(&exchange)
            .ok_or(AmmError::ExchangeNotFound)?;
        let token = pool.token();
        let snapshot = (
            pool.checkpoint(),
            self.tokens.get(&token).cloned(),
            self.currency.clone(),
        );
        let result = self.dispatch(exchange, caller, value, op);
        if let Err(err) = &result {
            tracing::debug!(%exchange, %caller, %value, %err, "call reverted");
            self.revert(exchange, token, snapshot);
        }
        result
    }

    fn revert(
        &mut self,
        exchange: Address,
        token: Address,
        (checkpoint, token_state, currency): (Checkpoint, Option<T>, NativeCurrency),
    ) {
        if let Some(pool) = self.registry.exchange_mut(&exchange) {
            pool.restore(checkpoint);
        }
        if let Some(token_state) = token_state {
            self.tokens.insert(token, token_state);
        }
        self.currency = currency;
    }

    fn dispatch<R, F>(&mut self, exchange: Address, caller: Address, value: Amount, op: F) -> Result<R, AmmError>
    where
        F: FnOnce(&mut Exchange, &mut CallEnv<'_, T, NativeCurrency>) -> Result<R, AmmError>,
    {
        let pool = self
            .registry
            .exchange_mut(&exchange)
            .ok_or(AmmError::ExchangeNotFound)?;
        let token = self
            .tokens
            .get_mut(&pool.token())
            .ok_or(AmmError::InvalidToken("token not deployed"))?;
        if !value.is_zero() {
            self.currency.transfer(caller, exchange, value)?;
        }
        let mut env = CallEnv::new(caller, value, token, &mut self.currency);
        op(pool, &mut env)
    }
}
