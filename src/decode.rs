use std::str::Utf8Error;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Payload too short")]
    UnexpectedEnd,

    #[error("String contained invalid UTF-8: {0}")]
    InvalidStringContents(#[from] Utf8Error),
}

/// A type that can be decoded from a raw sequence of bytes.
///
/// The input slice is advanced by the number of bytes consumed, so payload
/// structs can decode their fields in wire order from a single cursor.
pub trait Decode {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError>
    where
        Self: Sized;
}

macro_rules! impl_decode_for_primitive {
    ($($t:ty),*) => {
        $(
            impl Decode for $t {
                fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
                    let bytes = data.get(..size_of::<Self>()).ok_or(DecodeError::UnexpectedEnd)?;
                    *data = &data[size_of::<Self>()..];
                    Ok(Self::from_le_bytes(bytes.try_into().unwrap()))
                }
            }
        )*
    };
}

impl_decode_for_primitive!(u8, u16, u32);

impl<const N: usize> Decode for [u8; N] {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let bytes = data.get(..N).ok_or(DecodeError::UnexpectedEnd)?;
        let arr = bytes.try_into().unwrap();
        *data = &data[N..];
        Ok(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_are_little_endian() {
        let mut data: &[u8] = &[0xE0, 0x2E, 0x07];
        assert_eq!(u16::decode(&mut data), Ok(12000));
        assert_eq!(u8::decode(&mut data), Ok(7));
        assert_eq!(u8::decode(&mut data), Err(DecodeError::UnexpectedEnd));
    }

    #[test]
    fn array_consumes_exactly_n() {
        let mut data: &[u8] = &[1, 2, 3, 4];
        assert_eq!(<[u8; 3]>::decode(&mut data), Ok([1, 2, 3]));
        assert_eq!(data, &[4]);
    }
}
