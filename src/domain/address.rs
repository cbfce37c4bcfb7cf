//! Ledger-agnostic account identity.

use core::fmt;

/// An account on the host ledger: a holder, a token contract, or an
/// exchange.
///
/// Wraps a fixed 32-byte array.  All byte sequences are valid, so
/// construction is infallible.  The all-zero address is reserved as the
/// "no account" sentinel and is rejected wherever a real token identity
/// is required.
///
/// # Examples
///
/// ```
/// use amm_exchange::domain::Address;
///
/// let alice = Address::from_bytes([1u8; 32]);
/// assert_eq!(alice.as_bytes(), [1u8; 32]);
/// assert!(!alice.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address([u8; 32]);

impl Address {
    /// The all-zero sentinel address.
    pub const ZERO: Self = Self([0u8; 32]);

    /// Creates an `Address` from raw bytes.
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Derives a deterministic address from a one-byte namespace tag and
    /// a sequence number.
    ///
    /// The tag occupies the first byte, the index the last eight bytes in
    /// big-endian order.  Used to mint addresses for exchanges and
    /// deployed tokens.
    #[must_use]
    pub fn derive(tag: u8, index: u64) -> Self {
        let mut bytes = [0u8; 32];
        for (dst, src) in bytes.iter_mut().rev().zip(index.to_le_bytes()) {
            *dst = src;
        }
        if let Some(first) = bytes.first_mut() {
            *first = tag;
        }
        Self(bytes)
    }

    /// Returns the underlying 32-byte representation.
    #[must_use]
    pub const fn as_bytes(&self) -> [u8; 32] {
        self.0
    }

    /// Returns `true` for the zero sentinel.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x")?;
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sentinel() {
        assert!(Address::ZERO.is_zero());
        assert!(!Address::from_bytes([9u8; 32]).is_zero());
    }

    #[test]
    fn derive_places_tag_and_index() {
        let addr = Address::derive(0xEE, 0x0102);
        let bytes = addr.as_bytes();
        assert_eq!(bytes.first(), Some(&0xEE));
        assert_eq!(bytes.get(30), Some(&0x01));
        assert_eq!(bytes.last(), Some(&0x02));
        assert_eq!(bytes.get(1..24), Some(&[0u8; 23][..]));
    }

    #[test]
    fn derive_is_injective_over_index() {
        assert_ne!(Address::derive(1, 0), Address::derive(1, 1));
        assert_ne!(Address::derive(1, 7), Address::derive(2, 7));
    }

    #[test]
    fn display_is_hex() {
        let s = Address::derive(0xAB, 1).to_string();
        assert!(s.starts_with("0xab"));
        assert!(s.ends_with("01"));
        assert_eq!(s.len(), 2 + 64);
    }

    #[test]
    fn ordering_is_lexicographic() {
        assert!(Address::from_bytes([0u8; 32]) < Address::from_bytes([1u8; 32]));
    }
}
