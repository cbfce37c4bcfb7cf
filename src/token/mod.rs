//! Reference implementation of the [`FungibleToken`](crate::traits::FungibleToken)
//! capability.

mod standard_token;

pub use standard_token::StandardToken;
