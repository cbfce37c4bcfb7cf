//! Exchange creation and lookup.
//!
//! The [`ExchangeRegistry`] is the single entry point for constructing
//! exchanges.  It enforces one exchange per token, assigns each exchange
//! a unique address, and answers token ↔ exchange lookups.
//!
//! # Usage
//!
//! ```rust
//! use amm_exchange::config::ExchangeConfig;
//! use amm_exchange::domain::Address;
//! use amm_exchange::factory::ExchangeRegistry;
//!
//! let mut registry = ExchangeRegistry::new(ExchangeConfig::default()).expect("valid");
//! let token = Address::from_bytes([3u8; 32]);
//! let pool = registry.create_exchange(token).expect("created");
//! assert_eq!(registry.exchange(&pool).map(|e| e.token()), Some(token));
//! ```

mod exchange_registry;

pub use exchange_registry::{EXCHANGE_ADDRESS_TAG, ExchangeRegistry};
