//! Currency/token exchange walkthrough.
//!
//! Demonstrates deploying a token, creating its exchange, seeding
//! liquidity, running all four swaps, and withdrawing.  Set
//! `RUST_LOG=amm_exchange=debug` to see the library's structured logs.
//!
//! # Run
//!
//! ```bash
//! RUST_LOG=amm_exchange=debug cargo run --example exchange_simple
//! ```

use amm_exchange::config::{ExchangeConfig, TokenConfig};
use amm_exchange::domain::{Address, Amount, Decimals};
use amm_exchange::ledger::Ledger;
use amm_exchange::token::StandardToken;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Currency/token exchange (x · y = k) ===\n");

    let owner = Address::from_bytes([1u8; 32]);
    let trader = Address::from_bytes([2u8; 32]);

    // ── 1. Host, currency, and a token ──────────────────────────────────
    let mut ledger = Ledger::new(ExchangeConfig::default())?;
    ledger.mint_currency(owner, Decimals::MAX.whole(100))?;
    ledger.mint_currency(trader, Decimals::MAX.whole(100))?;
    let token = ledger.deploy_token(StandardToken::new(owner, TokenConfig::default())?);
    let pool = ledger.create_exchange(token)?;
    println!("Token deployed at    {token}");
    println!("Exchange created at  {pool}");
    println!("Fee:                 {}", ExchangeConfig::default().fee_tier());

    // ── 2. Seed the pool ────────────────────────────────────────────────
    let seed_currency = Decimals::MAX.whole(2);
    ledger.approve(token, owner, pool, Amount::new(1_000))?;
    let shares = ledger.call(pool, owner, seed_currency, |ex, env| {
        ex.setup(Amount::new(1_000), env)
    })?;
    println!("\n--- Setup ---");
    println!("  Shares minted:  {shares}");
    print_reserves(&ledger, pool);

    // ── 3. Currency → token, exact input ────────────────────────────────
    let bought = ledger.call(pool, trader, seed_currency, |ex, env| {
        ex.eth_to_token_in_swap(env)
    })?;
    println!("\n--- Sell {seed_currency} currency ---");
    println!("  Tokens bought:  {bought}");
    print_reserves(&ledger, pool);

    // ── 4. Token → currency, exact input ────────────────────────────────
    ledger.approve(token, trader, pool, bought)?;
    let paid = ledger.call(pool, trader, Amount::ZERO, |ex, env| {
        ex.token_to_eth_in_swap(bought, env)
    })?;
    println!("\n--- Sell {bought} tokens back ---");
    println!("  Currency received: {paid}");
    print_reserves(&ledger, pool);

    // ── 5. Exact-output swaps ───────────────────────────────────────────
    let want_tokens = Amount::new(50);
    let charged = ledger.call(pool, trader, Decimals::MAX.whole(1), |ex, env| {
        ex.eth_to_token_out_swap(want_tokens, env)
    })?;
    println!("\n--- Buy exactly {want_tokens} tokens ---");
    println!("  Currency charged (excess refunded): {charged}");

    let want_currency = Amount::new(Decimals::MAX.factor() / 10);
    ledger.approve(token, trader, pool, want_tokens)?;
    let tokens_spent = ledger.call(pool, trader, Amount::ZERO, |ex, env| {
        ex.token_to_eth_out_swap(want_currency, env)
    })?;
    println!("\n--- Buy exactly {want_currency} currency ---");
    println!("  Tokens charged: {tokens_spent}");
    print_reserves(&ledger, pool);

    // ── 6. Withdraw everything ──────────────────────────────────────────
    let (currency_out, tokens_out) = ledger.call(pool, owner, Amount::ZERO, |ex, env| {
        ex.remove_liquidity(shares, env)
    })?;
    println!("\n--- Remove all liquidity ---");
    println!("  Currency out: {currency_out}");
    println!("  Tokens out:   {tokens_out}");
    print_reserves(&ledger, pool);

    if let Some(ex) = ledger.exchange(&pool) {
        println!("\n{} events recorded", ex.events().len());
    }

    println!("\n=== Done ===");
    Ok(())
}

fn print_reserves(ledger: &Ledger<StandardToken>, pool: Address) {
    if let Some(ex) = ledger.exchange(&pool) {
        println!(
            "  Reserves: {} currency / {} tokens, {} shares",
            ex.eth_reserve(),
            ex.token_reserve(),
            ex.liquidity()
        );
    }
}
