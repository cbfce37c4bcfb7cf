//! Convenience re-exports for common types and traits.
//!
//! The prelude provides a single import to bring all commonly used items
//! into scope:
//!
//! ```rust
//! use amm_exchange::prelude::*;
//! ```

pub use crate::domain::{
    Address, Amount, BasisPoints, Decimals, ExchangeEvent, FeeTier, Rounding, Shares,
};

pub use crate::traits::{CurrencyLedger, FungibleToken};

pub use crate::math::{CheckedArithmetic, get_input_price, get_output_price};

pub use crate::config::{ExchangeConfig, TokenConfig};

pub use crate::error::{AmmError, Result};

pub use crate::factory::ExchangeRegistry;

pub use crate::pools::{CallEnv, Exchange};

pub use crate::ledger::{Ledger, NativeCurrency};

pub use crate::token::StandardToken;
