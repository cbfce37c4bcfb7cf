//! Explicit rounding direction for integer division.

/// Direction in which a non-exact integer quotient is rounded.
///
/// Every division in the engine names its direction.  Outputs paid by the
/// pool round [`Down`](Self::Down); inputs charged by the pool round
/// [`Up`](Self::Up).
///
/// # Examples
///
/// ```
/// use amm_exchange::domain::Rounding;
///
/// assert!(Rounding::Up.is_up());
/// assert!(Rounding::Down.is_down());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Round towards positive infinity (ceiling).
    Up,
    /// Round towards zero (floor).
    Down,
}

impl Rounding {
    /// Returns `true` if this is [`Rounding::Up`].
    #[must_use]
    pub const fn is_up(&self) -> bool {
        matches!(self, Self::Up)
    }

    /// Returns `true` if this is [`Rounding::Down`].
    #[must_use]
    pub const fn is_down(&self) -> bool {
        matches!(self, Self::Down)
    }
}
