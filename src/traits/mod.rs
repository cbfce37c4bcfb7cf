//! Capability traits for the exchange's external collaborators.
//!
//! The exchange depends on two ledgers it does not implement:
//! [`FungibleToken`] for the paired token and [`CurrencyLedger`] for the
//! base currency.  Concrete implementations are swappable behind these
//! traits; exchange operations are generic over both.

mod currency_ledger;
mod fungible_token;

pub use currency_ledger::CurrencyLedger;
pub use fungible_token::FungibleToken;
