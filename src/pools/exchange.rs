//! Currency/token exchange pool (constant product, fee on input).
//!
//! Each exchange pairs the host's base currency with one
//! [`FungibleToken`].  The swap invariant is `x × y = k` where `x` is the
//! currency reserve and `y` the token reserve; the trading fee is taken
//! from the input and stays in the pool, so `k` never decreases.
//!
//! # Operation ordering
//!
//! Every mutating operation runs in three phases:
//!
//! 1. **Checks**: validate inputs against the current state and compute
//!    the complete next [`ExchangeState`] without touching `self`.
//! 2. **Effects**: commit the next state.
//! 3. **Interactions**: pull or pay tokens and currency through the
//!    [`CallEnv`] handles.
//!
//! If an interaction fails the prior state is restored and the error is
//! returned; an [`ExchangeEvent`] is appended only after all
//! interactions succeed.  The host still reverts the call as a whole
//! (including the attached currency credit).
//!
//! # Reserves
//!
//! Reserves are tracked explicitly.  With a conforming host they equal
//! the exchange account's currency and token balances, because the only
//! movements into or out of that account are the ones performed here.

use crate::config::ExchangeConfig;
use crate::domain::{Address, Amount, ExchangeEvent, FeeTier, Rounding, Shares};
use crate::error::AmmError;
use crate::math::{CheckedArithmetic, get_input_price, get_output_price, mul_div};
use crate::traits::{CurrencyLedger, FungibleToken};

use super::{CallEnv, ShareLedger};

/// Reserves and share ledger of an exchange.
///
/// # Invariants
///
/// - The pool is empty (both reserves zero) iff no shares are
///   outstanding.
/// - The sum of all share holdings equals [`total_shares`](Self::total_shares).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeState {
    initialized: bool,
    currency_reserve: Amount,
    token_reserve: Amount,
    shares: ShareLedger,
}

impl ExchangeState {
    /// Whether `setup` has completed at least once.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Base currency held by the pool.
    #[must_use]
    pub const fn currency_reserve(&self) -> Amount {
        self.currency_reserve
    }

    /// Tokens held by the pool.
    #[must_use]
    pub const fn token_reserve(&self) -> Amount {
        self.token_reserve
    }

    /// Outstanding liquidity shares.
    #[must_use]
    pub const fn total_shares(&self) -> Shares {
        self.shares.total()
    }

    /// Per-holder share ledger.
    #[must_use]
    pub const fn shares(&self) -> &ShareLedger {
        &self.shares
    }

    /// Whether both reserves are zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.currency_reserve.is_zero() && self.token_reserve.is_zero()
    }
}

/// Pool state saved before a host-level call so the call can be undone.
///
/// The event log is append-only, so only its length is kept.
#[derive(Debug, Clone)]
pub(crate) struct Checkpoint {
    state: ExchangeState,
    events: usize,
}

/// A single currency/token liquidity pool.
///
/// Created by the [`ExchangeRegistry`](crate::factory::ExchangeRegistry);
/// the pool address and token are fixed for its lifetime.
///
/// # Example
///
/// ```rust
/// use amm_exchange::config::{ExchangeConfig, TokenConfig};
/// use amm_exchange::domain::{Address, Amount, Decimals};
/// use amm_exchange::ledger::NativeCurrency;
/// use amm_exchange::pools::{CallEnv, Exchange};
/// use amm_exchange::token::StandardToken;
/// use amm_exchange::traits::{CurrencyLedger, FungibleToken};
///
/// let owner = Address::from_bytes([1u8; 32]);
/// let pool_addr = Address::from_bytes([0xE0; 32]);
/// let token_addr = Address::from_bytes([0x70; 32]);
///
/// let mut token = StandardToken::new(owner, TokenConfig::default()).expect("token");
/// let mut currency = NativeCurrency::new();
/// currency.mint(owner, Decimals::MAX.whole(5)).expect("mint");
///
/// let mut pool = Exchange::new(pool_addr, token_addr, ExchangeConfig::default()).expect("pool");
///
/// // Approve the pool, attach 2 units of currency, deposit 1000 raw tokens.
/// let deposit = Decimals::MAX.whole(2);
/// token.approve(owner, pool_addr, Amount::new(1_000)).expect("approve");
/// currency.transfer(owner, pool_addr, deposit).expect("attach");
/// let mut env = CallEnv::new(owner, deposit, &mut token, &mut currency);
/// let shares = pool.setup(Amount::new(1_000), &mut env).expect("setup");
///
/// assert_eq!(shares.as_amount(), deposit);
/// assert_eq!(pool.token_reserve(), Amount::new(1_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    address: Address,
    token: Address,
    config: ExchangeConfig,
    state: ExchangeState,
    events: Vec<ExchangeEvent>,
}

impl Exchange {
    /// Creates an uninitialized exchange for `token` living at `address`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::InvalidToken`] if either address is the zero address
    ///   or they coincide.
    /// - Any error from [`ExchangeConfig::validate`].
    pub fn new(address: Address, token: Address, config: ExchangeConfig) -> Result<Self, AmmError> {
        config.validate()?;
        if token.is_zero() {
            return Err(AmmError::InvalidToken("token address must not be zero"));
        }
        if address.is_zero() {
            return Err(AmmError::InvalidToken("exchange address must not be zero"));
        }
        if address == token {
            return Err(AmmError::InvalidToken("exchange and token addresses coincide"));
        }
        Ok(Self {
            address,
            token,
            config,
            state: ExchangeState::default(),
            events: Vec::new(),
        })
    }

    // -- reads ---------------------------------------------------------------

    /// The exchange's own account.
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// The paired token.
    #[must_use]
    pub const fn token(&self) -> Address {
        self.token
    }

    /// Configuration the exchange was created with.
    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Trading fee charged on every swap input.
    #[must_use]
    pub const fn fee_tier(&self) -> FeeTier {
        self.config.fee_tier()
    }

    /// Current reserves and share ledger.
    #[must_use]
    pub const fn state(&self) -> &ExchangeState {
        &self.state
    }

    /// Tokens held by the pool.
    #[must_use]
    pub const fn token_reserve(&self) -> Amount {
        self.state.token_reserve
    }

    /// Currency held by the pool.
    #[must_use]
    pub const fn eth_reserve(&self) -> Amount {
        self.state.currency_reserve
    }

    /// Total outstanding liquidity shares.
    #[must_use]
    pub const fn liquidity(&self) -> Shares {
        self.state.shares.total()
    }

    /// Shares held by `holder`.
    #[must_use]
    pub fn liquidity_of(&self, holder: &Address) -> Shares {
        self.state.shares.balance_of(holder)
    }

    /// Committed operations, oldest first.
    #[must_use]
    pub fn events(&self) -> &[ExchangeEvent] {
        &self.events
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            state: self.state.clone(),
            events: self.events.len(),
        }
    }

    /// Returns the pool to `checkpoint`, dropping events recorded since.
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.state = checkpoint.state;
        self.events.truncate(checkpoint.events);
    }

    /// Exact-input price at this pool's fee.
    ///
    /// # Errors
    ///
    /// See [`crate::math::get_input_price`].
    pub fn get_input_price(
        &self,
        input: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount, AmmError> {
        get_input_price(input, input_reserve, output_reserve, self.fee_tier())
    }

    /// Exact-output price at this pool's fee.
    ///
    /// # Errors
    ///
    /// See [`crate::math::get_output_price`].
    pub fn get_output_price(
        &self,
        output: Amount,
        input_reserve: Amount,
        output_reserve: Amount,
    ) -> Result<Amount, AmmError> {
        get_output_price(output, input_reserve, output_reserve, self.fee_tier())
    }

    // -- quotes --------------------------------------------------------------

    /// Tokens a currency-to-token swap of `currency_in` would deliver now.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - Any error from [`get_input_price`](Self::get_input_price).
    pub fn quote_eth_to_token_input(&self, currency_in: Amount) -> Result<Amount, AmmError> {
        self.require_initialized()?;
        self.get_input_price(currency_in, self.eth_reserve(), self.token_reserve())
    }

    /// Currency needed to buy exactly `tokens_out` now.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - Any error from [`get_output_price`](Self::get_output_price).
    pub fn quote_eth_to_token_output(&self, tokens_out: Amount) -> Result<Amount, AmmError> {
        self.require_initialized()?;
        self.get_output_price(tokens_out, self.eth_reserve(), self.token_reserve())
    }

    /// Currency a token-to-currency swap of `tokens_in` would deliver now.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - Any error from [`get_input_price`](Self::get_input_price).
    pub fn quote_token_to_eth_input(&self, tokens_in: Amount) -> Result<Amount, AmmError> {
        self.require_initialized()?;
        self.get_input_price(tokens_in, self.token_reserve(), self.eth_reserve())
    }

    /// Tokens needed to buy exactly `currency_out` now.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - Any error from [`get_output_price`](Self::get_output_price).
    pub fn quote_token_to_eth_output(&self, currency_out: Amount) -> Result<Amount, AmmError> {
        self.require_initialized()?;
        self.get_output_price(currency_out, self.token_reserve(), self.eth_reserve())
    }

    // -- liquidity -----------------------------------------------------------

    /// Seeds the pool with the attached currency and `token_amount`
    /// tokens pulled from the caller.
    ///
    /// The caller receives shares equal to the attached currency.
    ///
    /// # Errors
    ///
    /// - [`AmmError::AlreadyInitialized`] if the pool was set up before,
    ///   even if it has since been drained.
    /// - [`AmmError::ZeroAmount`] if either deposit is zero.
    /// - [`AmmError::InsufficientAllowance`] /
    ///   [`AmmError::InsufficientBalance`] if the token pull fails.
    pub fn setup<T, C>(
        &mut self,
        token_amount: Amount,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<Shares, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        if self.state.initialized || !self.state.is_empty() {
            return Err(AmmError::AlreadyInitialized);
        }
        let caller = env.caller();
        let currency_amount = env.value();
        if currency_amount.is_zero() {
            return Err(AmmError::ZeroAmount("setup requires attached currency"));
        }
        if token_amount.is_zero() {
            return Err(AmmError::ZeroAmount("setup requires tokens"));
        }

        let minted = Shares::from(currency_amount);
        let mut next = self.state.clone();
        next.initialized = true;
        next.currency_reserve = currency_amount;
        next.token_reserve = token_amount;
        next.shares.mint(caller, minted)?;

        self.commit(next, |pool| {
            env.token().transfer_from(pool, caller, pool, token_amount)
        })?;

        tracing::info!(
            exchange = %self.address,
            provider = %caller,
            %currency_amount,
            %token_amount,
            shares = %minted,
            "exchange initialized"
        );
        self.events.push(ExchangeEvent::Setup {
            provider: caller,
            currency_amount,
            token_amount,
            shares: minted,
        });
        Ok(minted)
    }

    /// Deposits the attached currency plus tokens at the current reserve
    /// ratio and mints proportional shares.
    ///
    /// ```text
    /// tokens = ceil(value × token_reserve / currency_reserve)
    /// minted = floor(value × total_shares / currency_reserve)
    /// ```
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - [`AmmError::InsufficientReserve`] if the pool has been drained.
    /// - [`AmmError::ZeroAmount`] if no currency is attached or the
    ///   deposit would mint no shares.
    /// - [`AmmError::InsufficientAllowance`] /
    ///   [`AmmError::InsufficientBalance`] if the token pull fails.
    pub fn add_liquidity<T, C>(&mut self, env: &mut CallEnv<'_, T, C>) -> Result<Shares, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        self.require_initialized()?;
        let caller = env.caller();
        let currency_amount = env.value();
        if currency_amount.is_zero() {
            return Err(AmmError::ZeroAmount("add_liquidity requires attached currency"));
        }
        let current = &self.state;
        if current.currency_reserve.is_zero() {
            return Err(AmmError::InsufficientReserve);
        }

        let token_amount = mul_div(
            currency_amount,
            current.token_reserve,
            current.currency_reserve,
            Rounding::Up,
        )?;
        let minted = Shares::from(mul_div(
            currency_amount,
            current.shares.total().as_amount(),
            current.currency_reserve,
            Rounding::Down,
        )?);
        if minted.is_zero() {
            return Err(AmmError::ZeroAmount("deposit too small to mint shares"));
        }

        let mut next = current.clone();
        next.currency_reserve = next.currency_reserve.safe_add(&currency_amount)?;
        next.token_reserve = next.token_reserve.safe_add(&token_amount)?;
        next.shares.mint(caller, minted)?;

        self.commit(next, |pool| {
            env.token().transfer_from(pool, caller, pool, token_amount)
        })?;

        tracing::info!(
            exchange = %self.address,
            provider = %caller,
            %currency_amount,
            %token_amount,
            shares = %minted,
            "liquidity added"
        );
        self.events.push(ExchangeEvent::AddLiquidity {
            provider: caller,
            currency_amount,
            token_amount,
            shares: minted,
        });
        Ok(minted)
    }

    /// Burns `shares` of the caller's claim and pays out the pro-rata
    /// slice of both reserves, rounded down.
    ///
    /// Returns `(currency_paid, tokens_paid)`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnexpectedCurrency`] if currency is attached.
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - [`AmmError::ZeroAmount`] if `shares` is zero or both payouts
    ///   round to zero.
    /// - [`AmmError::InsufficientShares`] if the caller holds fewer than
    ///   `shares`.
    pub fn remove_liquidity<T, C>(
        &mut self,
        shares: Shares,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<(Amount, Amount), AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        Self::reject_value(env)?;
        self.require_initialized()?;
        if shares.is_zero() {
            return Err(AmmError::ZeroAmount("shares to remove"));
        }
        let caller = env.caller();
        let current = &self.state;
        if current.shares.balance_of(&caller) < shares {
            return Err(AmmError::InsufficientShares);
        }

        let total = current.shares.total().as_amount();
        let currency_amount = mul_div(
            shares.as_amount(),
            current.currency_reserve,
            total,
            Rounding::Down,
        )?;
        let token_amount = mul_div(shares.as_amount(), current.token_reserve, total, Rounding::Down)?;
        if currency_amount.is_zero() && token_amount.is_zero() {
            return Err(AmmError::ZeroAmount("withdrawal rounds to nothing"));
        }

        let mut next = current.clone();
        next.currency_reserve = next.currency_reserve.safe_sub(&currency_amount)?;
        next.token_reserve = next.token_reserve.safe_sub(&token_amount)?;
        next.shares.burn(caller, shares)?;

        self.commit(next, |pool| {
            if !currency_amount.is_zero() {
                env.currency().transfer(pool, caller, currency_amount)?;
            }
            if !token_amount.is_zero() {
                env.token().transfer(pool, caller, token_amount)?;
            }
            Ok(())
        })?;

        tracing::info!(
            exchange = %self.address,
            provider = %caller,
            %currency_amount,
            %token_amount,
            %shares,
            "liquidity removed"
        );
        self.events.push(ExchangeEvent::RemoveLiquidity {
            provider: caller,
            currency_amount,
            token_amount,
            shares,
        });
        Ok((currency_amount, token_amount))
    }

    /// Moves `shares` of the caller's claim to `to`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnexpectedCurrency`] if currency is attached.
    /// - [`AmmError::ZeroAmount`] if `shares` is zero.
    /// - [`AmmError::InsufficientShares`] if the caller holds fewer than
    ///   `shares`.
    pub fn transfer_shares<T, C>(
        &mut self,
        to: Address,
        shares: Shares,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<(), AmmError>
    where
        T: ?Sized,
        C: ?Sized,
    {
        Self::reject_value(env)?;
        if shares.is_zero() {
            return Err(AmmError::ZeroAmount("shares to transfer"));
        }
        let from = env.caller();
        self.state.shares.transfer(from, to, shares)?;
        tracing::debug!(exchange = %self.address, %from, %to, %shares, "shares transferred");
        self.events
            .push(ExchangeEvent::SharesTransferred { from, to, shares });
        Ok(())
    }

    // -- swaps ---------------------------------------------------------------

    /// Sells the attached currency for tokens at the current price.
    ///
    /// Returns the tokens delivered.
    ///
    /// # Errors
    ///
    /// See [`eth_to_token_in_swap_bounded`](Self::eth_to_token_in_swap_bounded).
    pub fn eth_to_token_in_swap<T, C>(&mut self, env: &mut CallEnv<'_, T, C>) -> Result<Amount, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        self.eth_to_token_in_swap_bounded(Amount::ZERO, env)
    }

    /// Sells the attached currency for at least `min_tokens` tokens.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - [`AmmError::ZeroAmount`] if no currency is attached or the trade
    ///   is too small to buy a single raw token unit.
    /// - [`AmmError::InsufficientReserve`] if the pool has been drained.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `min_tokens`.
    pub fn eth_to_token_in_swap_bounded<T, C>(
        &mut self,
        min_tokens: Amount,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<Amount, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        self.require_initialized()?;
        let caller = env.caller();
        let currency_in = env.value();
        let tokens_out =
            self.get_input_price(currency_in, self.eth_reserve(), self.token_reserve())?;
        Self::check_output(tokens_out, min_tokens)?;

        let currency_reserve = self.state.currency_reserve.safe_add(&currency_in)?;
        let token_reserve = self.state.token_reserve.safe_sub(&tokens_out)?;

        self.commit_reserves(currency_reserve, token_reserve, |pool| {
            env.token().transfer(pool, caller, tokens_out)
        })?;

        tracing::debug!(
            exchange = %self.address,
            buyer = %caller,
            %currency_in,
            %tokens_out,
            "currency sold for tokens"
        );
        self.events.push(ExchangeEvent::TokenPurchase {
            buyer: caller,
            currency_sold: currency_in,
            tokens_bought: tokens_out,
        });
        Ok(tokens_out)
    }

    /// Sells `tokens_in` tokens for currency at the current price.
    ///
    /// Returns the currency delivered.
    ///
    /// # Errors
    ///
    /// See [`token_to_eth_in_swap_bounded`](Self::token_to_eth_in_swap_bounded).
    pub fn token_to_eth_in_swap<T, C>(
        &mut self,
        tokens_in: Amount,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<Amount, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        self.token_to_eth_in_swap_bounded(tokens_in, Amount::ZERO, env)
    }

    /// Sells `tokens_in` tokens for at least `min_currency`.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnexpectedCurrency`] if currency is attached.
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - [`AmmError::ZeroAmount`] if `tokens_in` is zero or too small to
    ///   buy a single raw currency unit.
    /// - [`AmmError::InsufficientReserve`] if the pool has been drained.
    /// - [`AmmError::SlippageExceeded`] if the output is below
    ///   `min_currency`.
    /// - [`AmmError::InsufficientAllowance`] /
    ///   [`AmmError::InsufficientBalance`] if the token pull fails.
    pub fn token_to_eth_in_swap_bounded<T, C>(
        &mut self,
        tokens_in: Amount,
        min_currency: Amount,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<Amount, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        Self::reject_value(env)?;
        self.require_initialized()?;
        let caller = env.caller();
        let currency_out =
            self.get_input_price(tokens_in, self.token_reserve(), self.eth_reserve())?;
        Self::check_output(currency_out, min_currency)?;

        let currency_reserve = self.state.currency_reserve.safe_sub(&currency_out)?;
        let token_reserve = self.state.token_reserve.safe_add(&tokens_in)?;

        self.commit_reserves(currency_reserve, token_reserve, |pool| {
            env.token().transfer_from(pool, caller, pool, tokens_in)?;
            env.currency().transfer(pool, caller, currency_out)
        })?;

        tracing::debug!(
            exchange = %self.address,
            buyer = %caller,
            %tokens_in,
            %currency_out,
            "tokens sold for currency"
        );
        self.events.push(ExchangeEvent::CurrencyPurchase {
            buyer: caller,
            tokens_sold: tokens_in,
            currency_bought: currency_out,
        });
        Ok(currency_out)
    }

    /// Buys exactly `tokens_out` tokens with the attached currency and
    /// refunds whatever the trade did not need.
    ///
    /// Returns the currency actually charged.
    ///
    /// # Errors
    ///
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - [`AmmError::ZeroAmount`] if `tokens_out` is zero.
    /// - [`AmmError::InsufficientReserve`] if `tokens_out` is not below
    ///   the token reserve.
    /// - [`AmmError::InsufficientInput`] if the attached currency does not
    ///   cover the price.
    pub fn eth_to_token_out_swap<T, C>(
        &mut self,
        tokens_out: Amount,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<Amount, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        self.require_initialized()?;
        let caller = env.caller();
        let supplied = env.value();
        let required =
            self.get_output_price(tokens_out, self.eth_reserve(), self.token_reserve())?;
        if supplied < required {
            return Err(AmmError::InsufficientInput {
                required: required.get(),
                supplied: supplied.get(),
            });
        }
        let refund = supplied.safe_sub(&required)?;

        let currency_reserve = self.state.currency_reserve.safe_add(&required)?;
        let token_reserve = self.state.token_reserve.safe_sub(&tokens_out)?;

        self.commit_reserves(currency_reserve, token_reserve, |pool| {
            env.token().transfer(pool, caller, tokens_out)?;
            if !refund.is_zero() {
                env.currency().transfer(pool, caller, refund)?;
            }
            Ok(())
        })?;

        tracing::debug!(
            exchange = %self.address,
            buyer = %caller,
            currency_in = %required,
            %refund,
            %tokens_out,
            "tokens bought with currency"
        );
        self.events.push(ExchangeEvent::TokenPurchase {
            buyer: caller,
            currency_sold: required,
            tokens_bought: tokens_out,
        });
        Ok(required)
    }

    /// Buys exactly `currency_out` currency, pulling the required tokens
    /// from the caller.
    ///
    /// Returns the tokens actually charged.
    ///
    /// # Errors
    ///
    /// - [`AmmError::UnexpectedCurrency`] if currency is attached.
    /// - [`AmmError::NotInitialized`] before `setup`.
    /// - [`AmmError::ZeroAmount`] if `currency_out` is zero.
    /// - [`AmmError::InsufficientReserve`] if `currency_out` is not below
    ///   the currency reserve.
    /// - [`AmmError::InsufficientAllowance`] /
    ///   [`AmmError::InsufficientBalance`] if the token pull fails.
    pub fn token_to_eth_out_swap<T, C>(
        &mut self,
        currency_out: Amount,
        env: &mut CallEnv<'_, T, C>,
    ) -> Result<Amount, AmmError>
    where
        T: FungibleToken + ?Sized,
        C: CurrencyLedger + ?Sized,
    {
        Self::reject_value(env)?;
        self.require_initialized()?;
        let caller = env.caller();
        let tokens_in =
            self.get_output_price(currency_out, self.token_reserve(), self.eth_reserve())?;

        let currency_reserve = self.state.currency_reserve.safe_sub(&currency_out)?;
        let token_reserve = self.state.token_reserve.safe_add(&tokens_in)?;

        self.commit_reserves(currency_reserve, token_reserve, |pool| {
            env.token().transfer_from(pool, caller, pool, tokens_in)?;
            env.currency().transfer(pool, caller, currency_out)
        })?;

        tracing::debug!(
            exchange = %self.address,
            buyer = %caller,
            %tokens_in,
            %currency_out,
            "currency bought with tokens"
        );
        self.events.push(ExchangeEvent::CurrencyPurchase {
            buyer: caller,
            tokens_sold: tokens_in,
            currency_bought: currency_out,
        });
        Ok(tokens_in)
    }

    // -- internals -----------------------------------------------------------

    /// Installs `next`, then runs `interact`; restores the prior state if
    /// the interaction fails.
    fn commit<F>(&mut self, next: ExchangeState, interact: F) -> Result<(), AmmError>
    where
        F: FnOnce(Address) -> Result<(), AmmError>,
    {
        let prior = core::mem::replace(&mut self.state, next);
        if let Err(err) = interact(self.address) {
            tracing::warn!(exchange = %self.address, %err, "interaction failed, state restored");
            self.state = prior;
            return Err(err);
        }
        Ok(())
    }

    /// Swap counterpart of [`commit`](Self::commit): only the two reserves
    /// change, so only they are saved and restored.
    fn commit_reserves<F>(
        &mut self,
        currency_reserve: Amount,
        token_reserve: Amount,
        interact: F,
    ) -> Result<(), AmmError>
    where
        F: FnOnce(Address) -> Result<(), AmmError>,
    {
        let prior = (self.state.currency_reserve, self.state.token_reserve);
        self.state.currency_reserve = currency_reserve;
        self.state.token_reserve = token_reserve;
        if let Err(err) = interact(self.address) {
            tracing::warn!(exchange = %self.address, %err, "interaction failed, reserves restored");
            (self.state.currency_reserve, self.state.token_reserve) = prior;
            return Err(err);
        }
        Ok(())
    }

    fn require_initialized(&self) -> Result<(), AmmError> {
        if self.state.initialized {
            Ok(())
        } else {
            Err(AmmError::NotInitialized)
        }
    }

    fn reject_value<T: ?Sized, C: ?Sized>(env: &CallEnv<'_, T, C>) -> Result<(), AmmError> {
        if env.value().is_zero() {
            Ok(())
        } else {
            Err(AmmError::UnexpectedCurrency)
        }
    }

    fn check_output(output: Amount, minimum: Amount) -> Result<(), AmmError> {
        if output.is_zero() {
            return Err(AmmError::ZeroAmount("trade too small to deliver any output"));
        }
        if output < minimum {
            return Err(AmmError::SlippageExceeded {
                actual: output.get(),
                minimum: minimum.get(),
            });
        }
        Ok(())
    }
}
