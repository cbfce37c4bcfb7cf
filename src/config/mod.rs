//! Declarative configuration structs.
//!
//! [`ExchangeConfig`] carries the parameters a registry stamps onto each
//! exchange it creates; [`TokenConfig`] describes a reference token.
//! Both validate on construction and expose `validate()` for values
//! obtained another way (e.g. deserialized with the `serde` feature).

mod exchange_config;
mod token_config;

pub use exchange_config::ExchangeConfig;
pub use token_config::TokenConfig;
