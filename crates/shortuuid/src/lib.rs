//! Base-57 ShortUUID codec.
//!
//! The current format writes the UUID's 128-bit value most-significant digit
//! first, left-padded to a fixed width. The legacy format (releases before
//! 1.0.0) emitted the same digits least-significant first.

use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_ALPHABET: &str = "23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortUuidError {
    #[error("alphabet must contain at least two distinct characters")]
    AlphabetTooSmall,
    #[error("character {ch:?} is not part of the alphabet")]
    InvalidCharacter { ch: char },
    #[error("value does not fit in 128 bits")]
    Overflow,
}

#[derive(Debug, Clone)]
pub struct ShortUuid {
    alphabet: String,
    symbols: Vec<char>,
    length: usize,
}

impl Default for ShortUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl ShortUuid {
    pub fn new() -> Self {
        Self::from_symbols(DEFAULT_ALPHABET.chars().collect())
    }

    /// Builds a codec over a custom alphabet. Symbols are sorted and
    /// de-duplicated, so two alphabets with the same set encode identically.
    pub fn with_alphabet(alphabet: &str) -> Result<Self, ShortUuidError> {
        let mut symbols: Vec<char> = alphabet.chars().collect();
        symbols.sort_unstable();
        symbols.dedup();
        if symbols.len() < 2 {
            return Err(ShortUuidError::AlphabetTooSmall);
        }
        Ok(Self::from_symbols(symbols))
    }

    fn from_symbols(symbols: Vec<char>) -> Self {
        let length = (128.0 / (symbols.len() as f64).log2()).ceil() as usize;
        Self {
            alphabet: symbols.iter().collect(),
            symbols,
            length,
        }
    }

    pub fn alphabet(&self) -> &str {
        &self.alphabet
    }

    /// Width of every encoded value.
    pub fn encoded_length(&self) -> usize {
        self.length
    }

    pub fn contains(&self, ch: char) -> bool {
        self.symbols.binary_search(&ch).is_ok()
    }

    pub fn encode(&self, uuid: &Uuid) -> String {
        self.digits_lsb_first(uuid.as_u128()).into_iter().rev().collect()
    }

    pub fn legacy_encode(&self, uuid: &Uuid) -> String {
        self.digits_lsb_first(uuid.as_u128()).into_iter().collect()
    }

    pub fn decode(&self, text: &str, legacy: bool) -> Result<Uuid, ShortUuidError> {
        if legacy {
            let reversed: String = text.chars().rev().collect();
            self.decode_msb_first(&reversed)
        } else {
            self.decode_msb_first(text)
        }
    }

    /// Encodes a fresh random (version 4) UUID.
    pub fn random(&self) -> String {
        self.encode(&Uuid::new_v4())
    }

    fn digits_lsb_first(&self, mut value: u128) -> Vec<char> {
        let base = self.symbols.len() as u128;
        let mut digits = Vec::with_capacity(self.length);
        while value > 0 {
            digits.push(self.symbols[(value % base) as usize]);
            value /= base;
        }
        while digits.len() < self.length {
            digits.push(self.symbols[0]);
        }
        digits
    }

    fn decode_msb_first(&self, text: &str) -> Result<Uuid, ShortUuidError> {
        let base = self.symbols.len() as u128;
        let mut value: u128 = 0;
        for ch in text.chars() {
            let digit = self
                .symbols
                .binary_search(&ch)
                .map_err(|_| ShortUuidError::InvalidCharacter { ch })?;
            value = value
                .checked_mul(base)
                .and_then(|v| v.checked_add(digit as u128))
                .ok_or(ShortUuidError::Overflow)?;
        }
        Ok(Uuid::from_u128(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const SAMPLE: &str = "550e8400-e29b-41d4-a716-446655440000";

    fn sample() -> Uuid {
        Uuid::parse_str(SAMPLE).expect("sample uuid")
    }

    #[test]
    fn default_alphabet_has_57_sorted_symbols() {
        let codec = ShortUuid::new();
        assert_eq!(codec.alphabet().chars().count(), 57);
        assert_eq!(codec.encoded_length(), 22);
        assert!(!codec.contains('0'));
        assert!(!codec.contains('l'));
        assert!(!codec.contains(' '));
        assert!(codec.contains('z'));
    }

    #[test]
    fn encodes_known_values() {
        let codec = ShortUuid::new();
        assert_eq!(codec.encode(&sample()), "H9cNmGXLEc8NWcZzSThA9S");
        assert_eq!(codec.legacy_encode(&sample()), "S9AhTSzZcWN8cELXGmNc9H");
        assert_eq!(codec.encode(&Uuid::nil()), "2222222222222222222222");
        assert_eq!(codec.encode(&Uuid::from_u128(u128::MAX)), "oZEq7ovRbLq6UnGMPwc8B5");
    }

    #[test]
    fn small_values_are_padded_on_the_significant_side() {
        let codec = ShortUuid::new();
        let one = Uuid::from_u128(1);
        assert_eq!(codec.encode(&one), "2222222222222222222223");
        assert_eq!(codec.legacy_encode(&one), "3222222222222222222222");
    }

    #[test]
    fn decodes_both_variants() {
        let codec = ShortUuid::new();
        assert_eq!(
            codec.decode("H9cNmGXLEc8NWcZzSThA9S", false).expect("decode"),
            sample()
        );
        assert_eq!(
            codec.decode("S9AhTSzZcWN8cELXGmNc9H", true).expect("decode"),
            sample()
        );
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        let codec = ShortUuid::new();
        assert_eq!(
            codec.decode("abc 123", false),
            Err(ShortUuidError::InvalidCharacter { ch: ' ' })
        );
        assert_eq!(
            codec.decode("I0O1l", false),
            Err(ShortUuidError::InvalidCharacter { ch: 'I' })
        );
    }

    #[test]
    fn rejects_values_wider_than_128_bits() {
        let codec = ShortUuid::new();
        assert_eq!(
            codec.decode(&"z".repeat(22), false),
            Err(ShortUuidError::Overflow)
        );
    }

    #[test]
    fn custom_alphabet_is_normalized() {
        let codec = ShortUuid::with_alphabet("10101").expect("binary alphabet");
        assert_eq!(codec.alphabet(), "01");
        assert_eq!(codec.encoded_length(), 128);
        assert_eq!(
            ShortUuid::with_alphabet("aaaa").unwrap_err(),
            ShortUuidError::AlphabetTooSmall
        );
    }

    #[test]
    fn random_values_decode_to_v4() {
        let codec = ShortUuid::new();
        let value = codec.random();
        assert_eq!(value.len(), 22);
        let uuid = codec.decode(&value, false).expect("decode random");
        assert_eq!(uuid.get_version_num(), 4);
    }

    proptest! {
        #[test]
        fn round_trips_every_uuid(bits in any::<u128>()) {
            let codec = ShortUuid::new();
            let uuid = Uuid::from_u128(bits);
            prop_assert_eq!(codec.decode(&codec.encode(&uuid), false).unwrap(), uuid);
            prop_assert_eq!(codec.decode(&codec.legacy_encode(&uuid), true).unwrap(), uuid);
        }
    }
}
