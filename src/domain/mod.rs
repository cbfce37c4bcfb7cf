//! Fundamental domain value types used throughout the exchange engine.
//!
//! Quantities are integer newtypes in the smallest indivisible unit; no
//! floating point appears anywhere in pricing or settlement.

mod address;
mod amount;
mod basis_points;
mod decimals;
mod exchange_event;
mod fee_tier;
mod rounding;
mod shares;

pub use address::Address;
pub use amount::Amount;
pub use basis_points::BasisPoints;
pub use decimals::Decimals;
pub use exchange_event::ExchangeEvent;
pub use fee_tier::FeeTier;
pub use rounding::Rounding;
pub use shares::Shares;
