//! Reference host: base currency and an atomic call runtime.
//!
//! Exchanges never own the ledgers they touch.  This module provides an
//! in-memory host that does: [`NativeCurrency`] implements
//! [`CurrencyLedger`](crate::traits::CurrencyLedger), and [`Ledger`]
//! ties currency, deployed tokens, and the
//! [`ExchangeRegistry`](crate::factory::ExchangeRegistry) together with
//! all-or-nothing call semantics.

mod host;
mod native_currency;

pub use host::{Ledger, TOKEN_ADDRESS_TAG};
pub use native_currency::NativeCurrency;
