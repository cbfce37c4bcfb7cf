//! Events appended to an exchange's log after every committed operation.

use super::{Address, Amount, Shares};

/// Record of a committed state transition.
///
/// Events are appended only after an operation's interactions have
/// succeeded, so the log never contains a transition that was rolled
/// back.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event_type", rename_all = "snake_case"))]
pub enum ExchangeEvent {
    /// The pool was seeded by its first provider.
    Setup {
        /// First liquidity provider.
        provider: Address,
        /// Currency deposited.
        currency_amount: Amount,
        /// Tokens deposited.
        token_amount: Amount,
        /// Shares minted.
        shares: Shares,
    },

    /// Liquidity was deposited at the current reserve ratio.
    AddLiquidity {
        /// Depositing provider.
        provider: Address,
        /// Currency deposited.
        currency_amount: Amount,
        /// Tokens deposited.
        token_amount: Amount,
        /// Shares minted.
        shares: Shares,
    },

    /// Liquidity was withdrawn.
    RemoveLiquidity {
        /// Withdrawing provider.
        provider: Address,
        /// Currency paid out.
        currency_amount: Amount,
        /// Tokens paid out.
        token_amount: Amount,
        /// Shares burned.
        shares: Shares,
    },

    /// Currency was sold for tokens.
    TokenPurchase {
        /// Trader.
        buyer: Address,
        /// Currency charged.
        currency_sold: Amount,
        /// Tokens delivered.
        tokens_bought: Amount,
    },

    /// Tokens were sold for currency.
    CurrencyPurchase {
        /// Trader.
        buyer: Address,
        /// Tokens charged.
        tokens_sold: Amount,
        /// Currency delivered.
        currency_bought: Amount,
    },

    /// Shares moved between holders.
    SharesTransferred {
        /// Previous holder.
        from: Address,
        /// New holder.
        to: Address,
        /// Shares moved.
        shares: Shares,
    },
}

impl ExchangeEvent {
    /// Returns the account that initiated the operation.
    #[must_use]
    pub const fn initiator(&self) -> Address {
        match self {
            Self::Setup { provider, .. }
            | Self::AddLiquidity { provider, .. }
            | Self::RemoveLiquidity { provider, .. } => *provider,
            Self::TokenPurchase { buyer, .. } | Self::CurrencyPurchase { buyer, .. } => *buyer,
            Self::SharesTransferred { from, .. } => *from,
        }
    }
}
