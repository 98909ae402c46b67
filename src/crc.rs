use crc::{Algorithm, Crc};

/// CRC16 used to checksum every DP100 frame.
///
/// Reflected polynomial 0x8005, initial value 0xFFFF, no output XOR. These
/// are the CRC-16/MODBUS parameters, spelled out here rather than pulled from
/// a named table so there is no ambiguity about which reflected variant the
/// firmware implements. Validated against captures from a real supply.
///
/// Because there is no output XOR, checksumming a frame that ends with its
/// own little-endian CRC leaves a residue of zero. Reply validation relies on
/// that property.
pub const DP100_CRC16: Crc<u16> = Crc::<u16>::new(&Algorithm {
    width: 16,
    poly: 0x8005,
    init: 0xFFFF,
    refin: true,
    refout: true,
    xorout: 0x0000,
    check: 0x4B37,
    residue: 0x0000,
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_value() {
        assert_eq!(DP100_CRC16.checksum(b"123456789"), 0x4B37);
    }

    #[test]
    fn zero_residue_over_trailing_crc() {
        let mut frame = vec![0xFB, 0x30, 0x00, 0x00];
        let crc = DP100_CRC16.checksum(&frame);
        frame.extend_from_slice(&crc.to_le_bytes());
        assert_eq!(DP100_CRC16.checksum(&frame), 0);
    }
}
