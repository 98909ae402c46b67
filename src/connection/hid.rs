//! USB HID transport backed by `hidapi`.

use std::time::Duration;

use hidapi::{HidApi, HidDevice, HidError};

use super::Transport;

/// USB vendor ID of the DP100.
pub const VENDOR_ID: u16 = 0x2E3C;
/// USB product ID of the DP100.
pub const PRODUCT_ID: u16 = 0xAF01;

const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// A DP100 opened as a raw HID device.
pub struct HidTransport {
    device: HidDevice,
    read_timeout: Duration,
}

impl HidTransport {
    /// Opens the first attached DP100.
    pub fn open() -> Result<Self, HidError> {
        let api = HidApi::new()?;
        Ok(Self::from_device(api.open(VENDOR_ID, PRODUCT_ID)?))
    }

    /// Opens the DP100 with the given serial number string, for hosts with
    /// more than one supply attached.
    pub fn open_serial(serial: &str) -> Result<Self, HidError> {
        let api = HidApi::new()?;
        Ok(Self::from_device(api.open_serial(
            VENDOR_ID,
            PRODUCT_ID,
            serial,
        )?))
    }

    /// Wraps an already opened HID device.
    pub fn from_device(device: HidDevice) -> Self {
        Self {
            device,
            read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }

    /// Bounds how long a read blocks waiting for the supply's reply report.
    pub fn set_read_timeout(&mut self, timeout: Duration) {
        self.read_timeout = timeout;
    }

    /// The USB manufacturer string, if the device reports one.
    pub fn manufacturer(&self) -> Result<Option<String>, HidError> {
        self.device.get_manufacturer_string()
    }

    /// The USB serial number string, if the device reports one.
    pub fn serial_number(&self) -> Result<Option<String>, HidError> {
        self.device.get_serial_number_string()
    }
}

impl Transport for HidTransport {
    type Error = HidError;

    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error> {
        // hidapi expects the report ID in the first byte; the DP100 uses a
        // single unnumbered report, so the ID is 0.
        let mut report = Vec::with_capacity(data.len() + 1);
        report.push(0x00);
        report.extend_from_slice(data);

        let written = self.device.write(&report)?;
        Ok(written.saturating_sub(1))
    }

    fn read(&mut self, data: &mut [u8]) -> Result<usize, Self::Error> {
        let timeout_ms = self.read_timeout.as_millis().min(i32::MAX as u128) as i32;
        self.device.read_timeout(data, timeout_ms)
    }
}
