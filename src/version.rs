use std::fmt;

use crate::decode::{Decode, DecodeError};

/// A DP100 hardware, application, or bootloader revision.
///
/// The wire encoding is the decimal version multiplied by ten: a raw value of
/// `11` means version 1.1. This type implements `PartialOrd`, so revisions
/// can be compared directly.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd)]
pub struct Version(u16);

impl Version {
    pub const fn from_raw(raw: u16) -> Self {
        Self(raw)
    }

    /// The raw wire value.
    pub const fn raw(self) -> u16 {
        self.0
    }

    pub const fn major(self) -> u16 {
        self.0 / 10
    }

    pub const fn minor(self) -> u16 {
        self.0 % 10
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major(), self.minor())
    }
}

impl Decode for Version {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        Ok(Self(u16::decode(data)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tenths_encoding() {
        let v = Version::from_raw(11);
        assert_eq!(v.major(), 1);
        assert_eq!(v.minor(), 1);
        assert_eq!(v.to_string(), "1.1");
        assert!(Version::from_raw(12) > v);
    }
}
