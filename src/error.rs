//! Unified error types for the exchange engine.
//!
//! All fallible operations across the crate return [`AmmError`] as their
//! error type.  Every error is fatal to the current call only: the pool
//! never exposes a partially applied state transition.

/// Errors produced by pools, the registry, pricing, and the reference
/// ledgers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmmError {
    /// `setup` was called on a pool that has already been initialized.
    #[error("exchange already initialized")]
    AlreadyInitialized,

    /// The operation requires a pool that has completed `setup`.
    #[error("exchange not initialized")]
    NotInitialized,

    /// A delegated transfer exceeded the spender's allowance.
    #[error("insufficient allowance")]
    InsufficientAllowance,

    /// A ledger debit exceeded the holder's balance.
    #[error("insufficient balance")]
    InsufficientBalance,

    /// The request would exhaust or exceed the pool's reserve.
    #[error("insufficient reserve")]
    InsufficientReserve,

    /// A share removal or transfer exceeds the holder's claim.
    #[error("insufficient liquidity shares")]
    InsufficientShares,

    /// Attached currency does not cover the computed input.
    #[error("insufficient input: required {required}, supplied {supplied}")]
    InsufficientInput {
        /// Input the pool requires.
        required: u128,
        /// Input the caller supplied.
        supplied: u128,
    },

    /// Currency was attached to an operation that does not accept it.
    #[error("operation does not accept attached currency")]
    UnexpectedCurrency,

    /// The computed output fell below the caller's minimum.
    #[error("slippage exceeded: got {actual}, minimum {minimum}")]
    SlippageExceeded {
        /// Amount the trade would deliver.
        actual: u128,
        /// Minimum the caller accepts.
        minimum: u128,
    },

    /// An exchange is already registered for the token.
    #[error("exchange already exists for token")]
    DuplicateExchange,

    /// No exchange is registered under the given address.
    #[error("exchange not found")]
    ExchangeNotFound,

    /// Invalid or unknown token identity.
    #[error("invalid token: {0}")]
    InvalidToken(&'static str),

    /// Fee outside the supported range.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// Configuration value rejected during validation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A quantity required to be positive was zero.
    #[error("zero amount: {0}")]
    ZeroAmount(&'static str),

    /// Integer result exceeded the representable range.
    #[error("arithmetic overflow: {0}")]
    ArithmeticOverflow(&'static str),

    /// Integer result would be negative.
    #[error("arithmetic underflow: {0}")]
    ArithmeticUnderflow(&'static str),

    /// Division by a zero divisor.
    #[error("division by zero")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, AmmError>;
