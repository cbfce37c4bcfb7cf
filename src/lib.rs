//! # AMM Exchange
//!
//! Constant-product exchange engine pairing a base currency with
//! fungible tokens, one pool per token.
//!
//! This crate provides domain types, capability traits for the two
//! ledgers an exchange touches, the exchange pool itself, a registry
//! that creates one exchange per token, and an in-memory reference host
//! with atomic call semantics.
//!
//! - **Liquidity**: the first provider seeds a pool at any ratio; later
//!   deposits match the current reserve ratio and mint proportional
//!   shares.
//! - **Swaps**: currency → token and token → currency, each in an
//!   exact-input and an exact-output variant, with an optional minimum
//!   output.
//! - **Pricing**: `x × y = k` with a configurable fee (30 bp by default)
//!   taken from the input.
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `serde` | no | `Serialize`/`Deserialize` for domain, event and config types |
//!
//! # Quick Start
//!
//! ```rust
//! use amm_exchange::config::{ExchangeConfig, TokenConfig};
//! use amm_exchange::domain::{Address, Amount, Decimals};
//! use amm_exchange::ledger::Ledger;
//! use amm_exchange::token::StandardToken;
//!
//! let owner = Address::from_bytes([1u8; 32]);
//! let trader = Address::from_bytes([2u8; 32]);
//!
//! // 1. A host with currency, one token, and its exchange
//! let mut ledger = Ledger::new(ExchangeConfig::default()).expect("valid config");
//! ledger.mint_currency(owner, Decimals::MAX.whole(10)).expect("mint");
//! ledger.mint_currency(trader, Decimals::MAX.whole(10)).expect("mint");
//! let token = ledger.deploy_token(
//!     StandardToken::new(owner, TokenConfig::default()).expect("valid token"),
//! );
//! let pool = ledger.create_exchange(token).expect("exchange created");
//!
//! // 2. Seed the pool with 2 units of currency and 1000 raw tokens
//! ledger.approve(token, owner, pool, Amount::new(1_000)).expect("approve");
//! ledger
//!     .call(pool, owner, Decimals::MAX.whole(2), |ex, env| ex.setup(Amount::new(1_000), env))
//!     .expect("setup");
//!
//! // 3. Sell 2 units of currency for tokens
//! let bought = ledger
//!     .call(pool, trader, Decimals::MAX.whole(2), |ex, env| ex.eth_to_token_in_swap(env))
//!     .expect("swap");
//! assert_eq!(bought, Amount::new(499));
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Ledger     │  currency, deployed tokens, atomic call(...)
//! └──────┬──────┘
//!        │ create_exchange / exchange_mut
//!        ▼
//! ┌─────────────┐
//! │  Registry    │  one exchange per token, address ↔ token lookups
//! └──────┬──────┘
//!        │ Exchange + CallEnv
//!        ▼
//! ┌─────────────┐
//! │   Exchange   │  checks → effects → interactions, event log
//! └──────┬──────┘
//!        │ get_input_price / get_output_price
//!        ▼
//! ┌─────────────┐
//! │  Math/Domain │  Amount, Shares, FeeTier, Rounding, …
//! └─────────────┘
//! ```
//!
//! # Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`domain`] | Newtype value types: [`Amount`](domain::Amount), [`Shares`](domain::Shares), [`Address`](domain::Address), etc. |
//! | [`traits`] | Ledger capabilities: [`FungibleToken`](traits::FungibleToken), [`CurrencyLedger`](traits::CurrencyLedger) |
//! | [`config`] | [`ExchangeConfig`](config::ExchangeConfig) and [`TokenConfig`](config::TokenConfig) |
//! | [`pools`]  | The [`Exchange`](pools::Exchange) pool and its share ledger |
//! | [`factory`] | [`ExchangeRegistry`](factory::ExchangeRegistry): one exchange per token |
//! | [`token`]  | [`StandardToken`](token::StandardToken) reference token |
//! | [`ledger`] | [`Ledger`](ledger::Ledger) host runtime and [`NativeCurrency`](ledger::NativeCurrency) |
//! | [`math`]   | Checked arithmetic, rounding division, pricing primitives |
//! | [`error`]  | [`AmmError`](error::AmmError) unified error enum |
//! | [`prelude`] | Convenience re-exports for common types and traits |

pub mod config;
pub mod domain;
pub mod error;
pub mod factory;
pub mod ledger;
pub mod math;
pub mod pools;
pub mod prelude;
pub mod token;
pub mod traits;
