//! Payload for the system-info (0x40) operation.

use crate::decode::{Decode, DecodeError};

/// Front-panel and protection settings reported by the system-info operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemInfo {
    /// Backlight brightness level.
    pub backlight: u8,
    /// Over-power protection threshold in millivolts.
    pub opp: u16,
    /// Over-temperature protection threshold in tenths of a degree Celsius.
    pub otp: u16,
    /// Beep volume level.
    pub volume: u8,
}

impl Decode for SystemInfo {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let backlight = u8::decode(data)?;
        let opp = u16::decode(data)?;
        let otp = u16::decode(data)?;
        let volume = u8::decode(data)?;

        Ok(Self {
            backlight,
            opp,
            otp,
            volume,
        })
    }
}
