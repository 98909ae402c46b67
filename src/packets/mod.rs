//! Frame layout and the per-opcode payload types.
//!
//! Every DP100 frame, in either direction, is laid out as:
//!
//! | Offset | Size | Field |
//! |--------|------|-------------------------------------------|
//! | 0      | 1    | direction marker (0xFB host, 0xFA device) |
//! | 1      | 1    | operation code                            |
//! | 2      | 1    | reserved, always 0                        |
//! | 3      | 1    | payload length N                          |
//! | 4      | N    | payload                                   |
//! | 4+N    | 2    | CRC16, low byte first                     |

use log::warn;
use thiserror::Error;

use crate::crc::DP100_CRC16;
use crate::decode::{Decode, DecodeError};
use crate::encode::Encode;
use crate::state::DeviceState;

pub mod basic;
pub mod device;
pub mod system;

use basic::{BasicInfo, BasicSet};
use device::DeviceInfo;
use system::SystemInfo;

/// Direction marker for frames sent from the host to the supply.
pub const HOST_TO_DEVICE: u8 = 0xFB;
/// Direction marker for frames sent from the supply back to the host.
pub const DEVICE_TO_HOST: u8 = 0xFA;

/// Bytes before the payload: marker, opcode, reserved, payload length.
pub const HEADER_LEN: usize = 4;
/// Trailing checksum bytes.
pub const CRC_LEN: usize = 2;

/// Operation codes understood by the DP100 firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    None = 0x00,
    DeviceInfo = 0x10,
    BasicInfo = 0x30,
    BasicSet = 0x35,
    SystemInfo = 0x40,
    ScanOut = 0x50,
    SerialOut = 0x55,
}

impl Opcode {
    pub const fn from_raw(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::None),
            0x10 => Some(Self::DeviceInfo),
            0x30 => Some(Self::BasicInfo),
            0x35 => Some(Self::BasicSet),
            0x40 => Some(Self::SystemInfo),
            0x50 => Some(Self::ScanOut),
            0x55 => Some(Self::SerialOut),
            _ => None,
        }
    }
}

/// Host-to-device request frame.
///
/// Encoding produces the complete wire frame: header, payload, and trailing
/// CRC. Building a request never touches [`DeviceState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrame<P: Encode> {
    opcode: Opcode,
    payload: P,
}

impl<P: Encode> CommandFrame<P> {
    /// Creates a request frame for the given operation.
    ///
    /// The encoded payload must fit the one-byte length field (255 bytes);
    /// every payload this protocol defines is far below that.
    pub fn new(opcode: Opcode, payload: P) -> Self {
        Self { opcode, payload }
    }
}

impl<P: Encode> Encode for CommandFrame<P> {
    fn encode(&self) -> Vec<u8> {
        let payload = self.payload.encode();
        debug_assert!(payload.len() <= u8::MAX as usize);

        let mut frame = Vec::with_capacity(HEADER_LEN + payload.len() + CRC_LEN);
        frame.push(HOST_TO_DEVICE);
        frame.push(self.opcode as u8);
        frame.push(0x00);
        frame.push(payload.len() as u8);
        frame.extend_from_slice(&payload);

        let crc = DP100_CRC16.checksum(&frame);
        frame.extend_from_slice(&crc.to_le_bytes());
        frame
    }
}

/// Outcome of decoding a reply buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame validated and the state record for this opcode was replaced
    /// (or, for a BasicSet acknowledgement, confirmed).
    Updated(Opcode),
    /// The direction marker was not device-to-host; the frame is not
    /// addressed to us and is skipped without error.
    Ignored,
    /// The frame validated but its opcode carries no state record in this
    /// crate: the scan-out/serial-out streams, opcode 0, or a byte unknown
    /// to the firmware revisions seen so far.
    Unrecognized(u8),
}

/// Ways a device-to-host frame can fail validation or decoding.
///
/// None of these mutate [`DeviceState`]: a frame either decodes completely or
/// leaves every record untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// Checksumming header, payload, and the trailing CRC together did not
    /// leave the zero residue.
    #[error("CRC checksum mismatch (residue {residue:#06x})")]
    Checksum { residue: u16 },

    /// The buffer is shorter than the header plus its declared payload
    /// length and CRC.
    #[error("frame truncated: declared {expected} bytes, buffer holds {len}")]
    Truncated { expected: usize, len: usize },

    /// A settings acknowledgement carried a value other than 1.
    #[error("unexpected settings acknowledgement value {value:#04x}")]
    UnexpectedAck { value: u8 },

    /// A payload field could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Validates a reply buffer and, on success, writes the decoded record into
/// `state`.
///
/// Frames not bearing the device-to-host marker are skipped with
/// [`FrameStatus::Ignored`]. A frame that fails CRC validation or payload
/// decoding is reported as an error and leaves `state` unchanged.
pub fn decode_frame(buffer: &[u8], state: &mut DeviceState) -> Result<FrameStatus, FrameError> {
    if buffer.first() != Some(&DEVICE_TO_HOST) {
        return Ok(FrameStatus::Ignored);
    }
    if buffer.len() < HEADER_LEN {
        return Err(FrameError::Truncated {
            expected: HEADER_LEN,
            len: buffer.len(),
        });
    }

    let opcode = buffer[1];
    let payload_len = buffer[3] as usize;
    let frame_len = HEADER_LEN + payload_len + CRC_LEN;
    let Some(frame) = buffer.get(..frame_len) else {
        return Err(FrameError::Truncated {
            expected: frame_len,
            len: buffer.len(),
        });
    };

    // The checksum of a frame that already carries its own correct CRC is
    // the algorithm's zero residue.
    let residue = DP100_CRC16.checksum(frame);
    if residue != 0 {
        warn!("discarding frame with bad checksum: {frame:02X?}");
        return Err(FrameError::Checksum { residue });
    }

    let payload = &frame[HEADER_LEN..HEADER_LEN + payload_len];
    let mut cursor = payload;

    Ok(match Opcode::from_raw(opcode) {
        Some(Opcode::BasicInfo) => {
            state.basic_info = BasicInfo::decode(&mut cursor)?;
            FrameStatus::Updated(Opcode::BasicInfo)
        }
        Some(Opcode::DeviceInfo) => {
            state.device_info = DeviceInfo::decode(&mut cursor)?;
            FrameStatus::Updated(Opcode::DeviceInfo)
        }
        Some(Opcode::SystemInfo) => {
            state.system_info = SystemInfo::decode(&mut cursor)?;
            FrameStatus::Updated(Opcode::SystemInfo)
        }
        Some(Opcode::BasicSet) => {
            // A one-byte payload is the acknowledgement to a settings write;
            // it confirms the write but carries no settings record.
            if payload_len == 1 {
                if payload[0] != 1 {
                    return Err(FrameError::UnexpectedAck { value: payload[0] });
                }
                FrameStatus::Updated(Opcode::BasicSet)
            } else {
                state.basic_set = BasicSet::decode(&mut cursor)?;
                FrameStatus::Updated(Opcode::BasicSet)
            }
        }
        Some(Opcode::None | Opcode::ScanOut | Opcode::SerialOut) | None => {
            FrameStatus::Unrecognized(opcode)
        }
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a device-to-host frame with a correct trailing CRC.
    pub(crate) fn reply_frame(opcode: u8, payload: &[u8]) -> Vec<u8> {
        let mut frame = vec![DEVICE_TO_HOST, opcode, 0x00, payload.len() as u8];
        frame.extend_from_slice(payload);
        let crc = DP100_CRC16.checksum(&frame);
        frame.extend_from_slice(&crc.to_le_bytes());
        frame
    }

    #[test]
    fn encode_device_info_request() {
        let frame = CommandFrame::new(Opcode::DeviceInfo, ()).encode();
        // Known-good capture of the device-info request.
        assert_eq!(frame, [0xFB, 0x10, 0x00, 0x00, 0x30, 0xC5]);
    }

    #[test]
    fn encoded_frames_leave_zero_residue() {
        let frame = CommandFrame::new(Opcode::BasicSet, vec![0x80]).encode();
        assert_eq!(DP100_CRC16.checksum(&frame), 0);
    }

    #[test]
    fn any_single_bit_corruption_breaks_the_residue() {
        let frame = CommandFrame::new(Opcode::DeviceInfo, ()).encode();
        for byte in 0..frame.len() - CRC_LEN {
            for bit in 0..8 {
                let mut corrupt = frame.clone();
                corrupt[byte] ^= 1 << bit;
                assert_ne!(
                    DP100_CRC16.checksum(&corrupt),
                    0,
                    "flip of byte {byte} bit {bit} went undetected"
                );
            }
        }
    }

    #[test]
    fn round_trips_basic_info() {
        let mut payload = [0u8; 16];
        payload[0] = 0xE0; // vin = 12000 mV, little-endian
        payload[1] = 0x2E;
        let frame = reply_frame(Opcode::BasicInfo as u8, &payload);

        let mut state = DeviceState::default();
        let status = decode_frame(&frame, &mut state).unwrap();

        assert_eq!(status, FrameStatus::Updated(Opcode::BasicInfo));
        assert_eq!(state.basic_info.vin, 12000);
        assert_eq!(state.basic_info.vout, 0);
        assert_eq!(state.basic_info.iout, 0);
        assert_eq!(state.basic_info.temp1, 0);
        assert_eq!(state.basic_info.work_state, 0);
    }

    #[test]
    fn host_bound_frames_are_ignored() {
        let frame = CommandFrame::new(Opcode::BasicInfo, ()).encode();
        let mut state = DeviceState::default();
        assert_eq!(decode_frame(&frame, &mut state), Ok(FrameStatus::Ignored));
    }

    #[test]
    fn corrupt_frame_leaves_state_untouched() {
        let mut payload = [0u8; 16];
        payload[2] = 0x10;
        let mut frame = reply_frame(Opcode::BasicInfo as u8, &payload);
        frame[5] ^= 0x01;

        let mut state = DeviceState::default();
        let result = decode_frame(&frame, &mut state);

        assert!(matches!(result, Err(FrameError::Checksum { .. })));
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    fn truncated_frame_is_rejected() {
        let frame = reply_frame(Opcode::BasicInfo as u8, &[0u8; 16]);
        let mut state = DeviceState::default();
        assert_eq!(
            decode_frame(&frame[..10], &mut state),
            Err(FrameError::Truncated {
                expected: 22,
                len: 10
            })
        );
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    fn settings_ack_updates_nothing() {
        let frame = reply_frame(Opcode::BasicSet as u8, &[0x01]);
        let mut state = DeviceState::default();
        assert_eq!(
            decode_frame(&frame, &mut state),
            Ok(FrameStatus::Updated(Opcode::BasicSet))
        );
        assert_eq!(state, DeviceState::default());
    }

    #[test]
    fn bad_ack_value_is_a_protocol_violation() {
        let frame = reply_frame(Opcode::BasicSet as u8, &[0x00]);
        let mut state = DeviceState::default();
        assert_eq!(
            decode_frame(&frame, &mut state),
            Err(FrameError::UnexpectedAck { value: 0 })
        );
    }

    #[test]
    fn unknown_opcodes_are_surfaced() {
        let mut state = DeviceState::default();

        let frame = reply_frame(0x77, &[]);
        assert_eq!(
            decode_frame(&frame, &mut state),
            Ok(FrameStatus::Unrecognized(0x77))
        );

        // Known opcode, but no state record is defined for it.
        let frame = reply_frame(Opcode::ScanOut as u8, &[1, 2, 3]);
        assert_eq!(
            decode_frame(&frame, &mut state),
            Ok(FrameStatus::Unrecognized(0x50))
        );
    }
}
