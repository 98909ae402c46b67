//! Payload for the device-info (0x10) operation.

use crate::decode::{Decode, DecodeError};
use crate::string::FixedString;
use crate::version::Version;

/// Identity record reported by the device-info operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeviceInfo {
    /// Product model string, e.g. "ATK-DP100".
    pub device_type: FixedString<15>,
    /// Hardware revision.
    pub hardware_version: Version,
    /// Application firmware revision.
    pub app_version: Version,
    /// Bootloader revision.
    pub bootloader_version: Version,
    /// Firmware run area code. (RESEARCH NEEDED)
    pub run_area: u16,
    /// Factory serial number, raw bytes.
    pub serial: [u8; 11],
    /// Manufacture date.
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl Decode for DeviceInfo {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let device_type = FixedString::decode(data)?;
        // Pad byte between the name field and the version words.
        let _ = u8::decode(data)?;
        let hardware_version = Version::decode(data)?;
        let app_version = Version::decode(data)?;
        let bootloader_version = Version::decode(data)?;
        let run_area = u16::decode(data)?;
        let serial = <[u8; 11]>::decode(data)?;
        // Pad byte between the serial number and the date.
        let _ = u8::decode(data)?;
        let year = u16::decode(data)?;
        let month = u8::decode(data)?;
        let day = u8::decode(data)?;

        Ok(Self {
            device_type,
            hardware_version,
            app_version,
            bootloader_version,
            run_area,
            serial,
            year,
            month,
            day,
        })
    }
}
