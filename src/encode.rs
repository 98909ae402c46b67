/// A type that can be encoded into a protocol byte sequence.
pub trait Encode {
    /// Encodes a structure into a byte sequence.
    fn encode(&self) -> Vec<u8>;
}

impl Encode for () {
    fn encode(&self) -> Vec<u8> {
        Vec::new()
    }
}

impl Encode for Vec<u8> {
    fn encode(&self) -> Vec<u8> {
        self.clone()
    }
}

impl Encode for &[u8] {
    fn encode(&self) -> Vec<u8> {
        self.to_vec()
    }
}
