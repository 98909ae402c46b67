use std::fmt;
use std::ops::Deref;
use std::str;

use crate::decode::{Decode, DecodeError};

/// A UTF-8 string stored in a fixed `N`-byte wire field.
///
/// The DP100 pads text fields with zero bytes: the string runs up to (not
/// including) the first NUL, and everything after it is padding. Decoding
/// always consumes exactly `N` bytes so fields at fixed payload offsets stay
/// aligned regardless of the string's length.
///
/// # Invariants
///
/// - Contents are always valid UTF-8.
/// - All bytes past the end of the string are zeroed.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct FixedString<const N: usize>([u8; N]);

impl<const N: usize> Default for FixedString<N> {
    fn default() -> Self {
        Self([0; N])
    }
}

impl<const N: usize> FixedString<N> {
    /// Creates a new [`FixedString`] from the given string slice.
    ///
    /// # Errors
    ///
    /// Returns [`FixedStringSizeError`] if the string's UTF-8 byte length
    /// exceeds `N`.
    pub fn new(s: impl AsRef<str>) -> Result<Self, FixedStringSizeError> {
        let bytes = s.as_ref().as_bytes();

        if bytes.len() > N {
            return Err(FixedStringSizeError {
                input_size: bytes.len(),
                max_size: N,
            });
        }

        let mut buf = [0; N];
        buf[..bytes.len()].copy_from_slice(bytes);
        Ok(Self(buf))
    }

    /// Extracts a string slice containing this string's contents.
    pub fn as_str(&self) -> &str {
        let len = self.0.iter().position(|&b| b == 0).unwrap_or(N);

        // Construction and decoding both validate UTF-8 up to the first NUL.
        str::from_utf8(&self.0[..len]).unwrap_or_default()
    }
}

impl<const N: usize> Deref for FixedString<N> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl<const N: usize> AsRef<str> for FixedString<N> {
    fn as_ref(&self) -> &str {
        self
    }
}

impl<const N: usize> fmt::Display for FixedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl<const N: usize> Decode for FixedString<N> {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let field = <[u8; N]>::decode(data)?;

        let len = field.iter().position(|&b| b == 0).unwrap_or(N);
        str::from_utf8(&field[..len])?;

        let mut buf = [0; N];
        buf[..len].copy_from_slice(&field[..len]);
        Ok(Self(buf))
    }
}

/// Returned when a [`FixedString`] cannot fit the specified string.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FixedStringSizeError {
    pub input_size: usize,
    pub max_size: usize,
}

impl fmt::Display for FixedStringSizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "string with size {} exceeds the maximum size of FixedString<{}>",
            self.input_size, self.max_size
        )
    }
}

impl std::error::Error for FixedStringSizeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_stops_at_nul_but_consumes_field() {
        let mut data: &[u8] = b"DP100\0\0\0\0\0\0\0\0\0\0\xAA";
        let s = FixedString::<15>::decode(&mut data).unwrap();
        assert_eq!(s.as_str(), "DP100");
        // The trailing byte after the 15-byte field must remain.
        assert_eq!(data, &[0xAA]);
    }

    #[test]
    fn decode_without_nul_uses_whole_field() {
        let mut data: &[u8] = b"ABCD";
        let s = FixedString::<4>::decode(&mut data).unwrap();
        assert_eq!(s.as_str(), "ABCD");
    }

    #[test]
    fn decode_rejects_invalid_utf8() {
        let mut data: &[u8] = &[0xFF, 0xFE, 0x00, 0x00];
        assert!(matches!(
            FixedString::<4>::decode(&mut data),
            Err(DecodeError::InvalidStringContents(_))
        ));
    }

    #[test]
    fn new_rejects_oversized_input() {
        assert!(FixedString::<4>::new("tools").is_err());
        assert_eq!(FixedString::<5>::new("tools").unwrap().as_str(), "tools");
    }
}
