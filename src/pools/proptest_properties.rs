//! Property-based tests using `proptest` for exchange invariant validation.
//!
//! 1. **Product monotonicity**: `currency_reserve × token_reserve` never
//!    decreases across any of the four swaps.
//! 2. **Pricing bounds**: quotes never reach the output reserve, and
//!    buying back an exact-input output never costs more than the input.
//! 3. **Share conservation**: holdings always sum to the total supply.
//! 4. **Empty iff no shares**: removing every share drains both reserves.
//! 5. **No free value**: add then remove returns at most the deposit.
//! 6. **Ledger agreement**: reserves equal the pool's ledger balances.
//! 7. **No spurious overflow**: with reserves up to [`RESERVE_BOUND`] and
//!    trades up to twice a reserve, no swap or deposit reports
//!    [`AmmError::ArithmeticOverflow`].

#![allow(clippy::panic)]

use bnum::types::U256;
use proptest::prelude::*;

use crate::config::{ExchangeConfig, TokenConfig};
use crate::domain::{Address, Amount, Decimals, Shares};
use crate::error::AmmError;
use crate::ledger::NativeCurrency;
use crate::math::{get_input_price, get_output_price};
use crate::token::StandardToken;
use crate::traits::{CurrencyLedger, FungibleToken};

use super::{CallEnv, Exchange};

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn provider() -> Address {
    Address::from_bytes([1u8; 32])
}

fn trader() -> Address {
    Address::from_bytes([2u8; 32])
}

fn pool_addr() -> Address {
    Address::derive(0xE0, 1)
}

/// Largest reserve the strategies generate: a million whole units at 18
/// decimals.
const RESERVE_BOUND: u128 = 1_000_000_000_000_000_000_000_000;

/// Raw supply minted to each participant, enough to trade twice the
/// largest reserve.
const PARTICIPANT_FUNDS: u128 = 10_000 * RESERVE_BOUND;

struct World {
    pool: Exchange,
    token: StandardToken,
    currency: NativeCurrency,
}

impl World {
    /// Seeds a pool with the given reserves and funds the trader with
    /// half the token supply.
    fn seeded(currency_reserve: u128, token_reserve: u128) -> Self {
        let Ok(config) = TokenConfig::new(
            "MyToken",
            "MTN",
            Decimals::MAX,
            Amount::new(2 * PARTICIPANT_FUNDS),
        ) else {
            panic!("valid token config");
        };
        let Ok(mut token) = StandardToken::new(provider(), config) else {
            panic!("valid token");
        };
        let Ok(()) = token.transfer(provider(), trader(), Amount::new(PARTICIPANT_FUNDS)) else {
            panic!("fund trader");
        };
        let mut currency = NativeCurrency::new();
        for who in [provider(), trader()] {
            let Ok(()) = currency.mint(who, Amount::new(PARTICIPANT_FUNDS)) else {
                panic!("mint");
            };
        }
        let Ok(pool) = Exchange::new(pool_addr(), Address::derive(0x70, 1), ExchangeConfig::default())
        else {
            panic!("valid exchange");
        };
        let mut world = Self {
            pool,
            token,
            currency,
        };
        world.approve_all();
        let Ok(_) = world.call(provider(), Amount::new(currency_reserve), |p, env| {
            p.setup(Amount::new(token_reserve), env)
        }) else {
            panic!("setup");
        };
        world
    }

    fn approve_all(&mut self) {
        for who in [provider(), trader()] {
            let Ok(()) = self.token.approve(who, pool_addr(), Amount::MAX) else {
                panic!("approve");
            };
        }
    }

    /// Runs `op` and rolls the whole world back when it fails.
    fn call<R>(
        &mut self,
        caller: Address,
        value: Amount,
        op: impl FnOnce(
            &mut Exchange,
            &mut CallEnv<'_, StandardToken, NativeCurrency>,
        ) -> Result<R, AmmError>,
    ) -> Result<R, AmmError> {
        let snapshot = (self.pool.clone(), self.token.clone(), self.currency.clone());
        let result = self.dispatch(caller, value, op);
        if result.is_err() {
            (self.pool, self.token, self.currency) = snapshot;
        }
        result
    }

    fn dispatch<R>(
        &mut self,
        caller: Address,
        value: Amount,
        op: impl FnOnce(
            &mut Exchange,
            &mut CallEnv<'_, StandardToken, NativeCurrency>,
        ) -> Result<R, AmmError>,
    ) -> Result<R, AmmError> {
        if !value.is_zero() {
            self.currency.transfer(caller, pool_addr(), value)?;
        }
        let mut env = CallEnv::new(caller, value, &mut self.token, &mut self.currency);
        op(&mut self.pool, &mut env)
    }

    fn product(&self) -> U256 {
        U256::from(self.pool.eth_reserve().get()) * U256::from(self.pool.token_reserve().get())
    }

    fn ledger_agrees(&self) -> bool {
        self.currency.balance_of(&pool_addr()) == self.pool.eth_reserve()
            && self.token.balance_of(&pool_addr()) == self.pool.token_reserve()
    }
}

// ---------------------------------------------------------------------------
// Custom strategies
// ---------------------------------------------------------------------------

/// Currency reserve in [10^6, 10^24].
fn currency_reserve_strategy() -> impl Strategy<Value = u128> {
    1_000_000u128..=RESERVE_BOUND
}

/// Token reserve in [10^3, 10^24].
fn token_reserve_strategy() -> impl Strategy<Value = u128> {
    1_000u128..=RESERVE_BOUND
}

/// Trade size as a fraction (in bp) of the relevant reserve.
fn fraction_strategy() -> impl Strategy<Value = u128> {
    1u128..=20_000u128
}

// ---------------------------------------------------------------------------
// Property 1: Product monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_product_non_decreasing_eth_to_token_in(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let mut w = World::seeded(cr, tr);
        let k0 = w.product();
        let value = (cr * frac / 10_000).max(1);
        let Ok(_) = w.call(trader(), Amount::new(value), |p, env| p.eth_to_token_in_swap(env)) else {
            return Ok(());
        };
        prop_assert!(w.product() >= k0, "k decreased: {} -> {}", k0, w.product());
        prop_assert!(w.ledger_agrees());
    }

    #[test]
    fn prop_product_non_decreasing_token_to_eth_in(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let mut w = World::seeded(cr, tr);
        let k0 = w.product();
        let tokens = (tr * frac / 10_000).max(1);
        let Ok(_) = w.call(trader(), Amount::ZERO, |p, env| {
            p.token_to_eth_in_swap(Amount::new(tokens), env)
        }) else {
            return Ok(());
        };
        prop_assert!(w.product() >= k0, "k decreased: {} -> {}", k0, w.product());
        prop_assert!(w.ledger_agrees());
    }

    #[test]
    fn prop_product_non_decreasing_eth_to_token_out(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        frac in 1u128..=9_999u128,
    ) {
        let mut w = World::seeded(cr, tr);
        let k0 = w.product();
        let tokens_out = (tr * frac / 10_000).max(1);
        let Ok(required) = w.pool.quote_eth_to_token_output(Amount::new(tokens_out)) else {
            return Ok(());
        };
        // over-pay so the refund path runs too
        let value = required.get().saturating_mul(2);
        let Ok(charged) = w.call(trader(), Amount::new(value), |p, env| {
            p.eth_to_token_out_swap(Amount::new(tokens_out), env)
        }) else {
            return Ok(());
        };
        prop_assert_eq!(charged, required);
        prop_assert!(w.product() >= k0, "k decreased: {} -> {}", k0, w.product());
        prop_assert!(w.ledger_agrees());
    }

    #[test]
    fn prop_product_non_decreasing_token_to_eth_out(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        frac in 1u128..=9_999u128,
    ) {
        let mut w = World::seeded(cr, tr);
        let k0 = w.product();
        let currency_out = (cr * frac / 10_000).max(1);
        let Ok(_) = w.call(trader(), Amount::ZERO, |p, env| {
            p.token_to_eth_out_swap(Amount::new(currency_out), env)
        }) else {
            return Ok(());
        };
        prop_assert!(w.product() >= k0, "k decreased: {} -> {}", k0, w.product());
        prop_assert!(w.ledger_agrees());
    }
}

// ---------------------------------------------------------------------------
// Property 2: Pricing bounds
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_input_price_below_reserve(
        input in 1u128..=1_000_000_000_000_000_000u128,
        in_res in currency_reserve_strategy(),
        out_res in token_reserve_strategy(),
    ) {
        let fee = ExchangeConfig::default().fee_tier();
        let Ok(out) = get_input_price(Amount::new(input), Amount::new(in_res), Amount::new(out_res), fee) else {
            return Ok(());
        };
        prop_assert!(out.get() < out_res);
    }

    #[test]
    fn prop_buyback_never_costs_more(
        input in 1u128..=1_000_000_000_000u128,
        in_res in currency_reserve_strategy(),
        out_res in token_reserve_strategy(),
    ) {
        let fee = ExchangeConfig::default().fee_tier();
        let Ok(out) = get_input_price(Amount::new(input), Amount::new(in_res), Amount::new(out_res), fee) else {
            return Ok(());
        };
        if out.is_zero() { return Ok(()); }
        let Ok(cost) = get_output_price(out, Amount::new(in_res), Amount::new(out_res), fee) else {
            return Ok(());
        };
        prop_assert!(cost.get() <= input, "cost {} > input {}", cost.get(), input);
    }

    #[test]
    fn prop_input_price_monotone(
        a in 1u128..=1_000_000_000_000u128,
        b in 1u128..=1_000_000_000_000u128,
        in_res in currency_reserve_strategy(),
        out_res in token_reserve_strategy(),
    ) {
        let fee = ExchangeConfig::default().fee_tier();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let Ok(out_lo) = get_input_price(Amount::new(lo), Amount::new(in_res), Amount::new(out_res), fee) else {
            return Ok(());
        };
        let Ok(out_hi) = get_input_price(Amount::new(hi), Amount::new(in_res), Amount::new(out_res), fee) else {
            return Ok(());
        };
        prop_assert!(out_lo <= out_hi);
    }
}

// ---------------------------------------------------------------------------
// Properties 3-5: Share accounting
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_share_sum_conserved(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        add_frac in fraction_strategy(),
        move_frac in 0u128..=10_000u128,
    ) {
        let mut w = World::seeded(cr, tr);
        let deposit = (cr * add_frac / 10_000).max(1);
        let Ok(minted) = w.call(trader(), Amount::new(deposit), |p, env| p.add_liquidity(env)) else {
            return Ok(());
        };
        let moved = Shares::new(minted.get() * move_frac / 10_000);
        if !moved.is_zero() {
            let Ok(()) = w.call(trader(), Amount::ZERO, |p, env| {
                p.transfer_shares(provider(), moved, env)
            }) else {
                panic!("transfer of held shares must succeed");
            };
        }
        let ledger = w.pool.state().shares();
        prop_assert_eq!(ledger.sum_of_holdings(), Some(ledger.total()));
        prop_assert!(w.ledger_agrees());
    }

    #[test]
    fn prop_empty_iff_no_shares(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let mut w = World::seeded(cr, tr);
        let value = (cr * frac / 10_000).max(1);
        let _ = w.call(trader(), Amount::new(value), |p, env| p.eth_to_token_in_swap(env));

        let all = w.pool.liquidity_of(&provider());
        let Ok(_) = w.call(provider(), Amount::ZERO, |p, env| p.remove_liquidity(all, env)) else {
            panic!("sole provider can always withdraw");
        };
        prop_assert!(w.pool.liquidity().is_zero());
        prop_assert!(w.pool.state().is_empty());
        prop_assert!(w.ledger_agrees());
    }

    #[test]
    fn prop_add_then_remove_returns_at_most_deposit(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let mut w = World::seeded(cr, tr);
        let deposit = (cr * frac / 10_000).max(1);
        let tokens_before = w.token.balance_of(&trader());
        let Ok(minted) = w.call(trader(), Amount::new(deposit), |p, env| p.add_liquidity(env)) else {
            return Ok(());
        };
        let tokens_paid = tokens_before.get() - w.token.balance_of(&trader()).get();
        let Ok((currency_back, tokens_back)) = w.call(trader(), Amount::ZERO, |p, env| {
            p.remove_liquidity(minted, env)
        }) else {
            return Ok(());
        };
        prop_assert!(currency_back.get() <= deposit);
        prop_assert!(tokens_back.get() <= tokens_paid);
        prop_assert!(w.ledger_agrees());
    }
}

// ---------------------------------------------------------------------------
// Property 7: No spurious overflow
// ---------------------------------------------------------------------------

fn is_overflow<T>(result: &Result<T, AmmError>) -> bool {
    matches!(result, Err(AmmError::ArithmeticOverflow(_)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_no_overflow_below_reserve_bound(
        cr in currency_reserve_strategy(),
        tr in token_reserve_strategy(),
        frac in fraction_strategy(),
    ) {
        let value = Amount::new((cr * frac / 10_000).max(1));
        let tokens = Amount::new((tr * frac / 10_000).max(1));

        let mut w = World::seeded(cr, tr);
        let bought = w.call(trader(), value, |p, env| p.eth_to_token_in_swap(env));
        prop_assert!(!is_overflow(&bought), "eth_to_token_in_swap: {:?}", bought);

        let mut w = World::seeded(cr, tr);
        let sold = w.call(trader(), Amount::ZERO, |p, env| p.token_to_eth_in_swap(tokens, env));
        prop_assert!(!is_overflow(&sold), "token_to_eth_in_swap: {:?}", sold);

        let mut w = World::seeded(cr, tr);
        let added = w.call(trader(), value, |p, env| p.add_liquidity(env));
        prop_assert!(!is_overflow(&added), "add_liquidity: {:?}", added);
        if let Ok(minted) = added {
            let removed = w.call(trader(), Amount::ZERO, |p, env| p.remove_liquidity(minted, env));
            prop_assert!(!is_overflow(&removed), "remove_liquidity: {:?}", removed);
        }
    }
}
