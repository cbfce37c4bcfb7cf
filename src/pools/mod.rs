//! The exchange pool and the pieces it is built from.
//!
//! | Item | Role |
//! |------|------|
//! | [`Exchange`] | One currency/token pool: liquidity, swaps, quotes, events |
//! | [`ExchangeState`] | Reserves plus share ledger, replaced wholesale on commit |
//! | [`ShareLedger`] | Holder → liquidity-share balances |
//! | [`CallEnv`] | Caller, attached value, and ledger handles for one call |

mod call_env;
mod exchange;
mod share_ledger;

#[cfg(test)]
mod proptest_properties;

pub use call_env::CallEnv;
pub use exchange::{Exchange, ExchangeState};
pub(crate) use exchange::Checkpoint;
pub use share_ledger::ShareLedger;
