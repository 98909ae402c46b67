//! Payloads for the basic-info (0x30) and basic-set (0x35) operations.

use crate::decode::{Decode, DecodeError};
use crate::encode::Encode;

/// Basic-set sub-mode bytes. The same opcode serves both directions of
/// intent: `ACTIVATE` asks the supply to report its active settings, `MODIFY`
/// pushes new ones.
pub(crate) mod mode {
    pub const MODIFY: u8 = 0x20;
    pub const ACTIVATE: u8 = 0x80;
}

/// Live measurements reported by the basic-info operation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BasicInfo {
    /// Supply input voltage in millivolts.
    pub vin: u16,
    /// Output voltage in millivolts.
    pub vout: u16,
    /// Output current in milliamps.
    pub iout: u16,
    /// Maximum settable output voltage in millivolts.
    pub vout_max: u16,
    /// System temperature in tenths of a degree Celsius.
    pub temp1: u16,
    /// Probe temperature in tenths of a degree Celsius.
    pub temp2: u16,
    /// Auxiliary 5 V rail voltage in millivolts.
    pub dc_5v: u16,
    /// Output mode indicator (CC/CV). Raw firmware code.
    pub output_mode: u8,
    /// Work state. Raw firmware code. (RESEARCH NEEDED)
    pub work_state: u8,
}

impl Decode for BasicInfo {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let vin = u16::decode(data)?;
        let vout = u16::decode(data)?;
        let iout = u16::decode(data)?;
        let vout_max = u16::decode(data)?;
        let temp1 = u16::decode(data)?;
        let temp2 = u16::decode(data)?;
        let dc_5v = u16::decode(data)?;
        let output_mode = u8::decode(data)?;
        let work_state = u8::decode(data)?;

        Ok(Self {
            vin,
            vout,
            iout,
            vout_max,
            temp1,
            temp2,
            dc_5v,
            output_mode,
            work_state,
        })
    }
}

/// Settings record reported in answer to a [`BasicSetCommand::Query`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BasicSet {
    /// Preset slot the settings belong to.
    pub index: u8,
    /// 1 when the output is enabled, 0 when disabled. Kept as the raw wire
    /// byte; the firmware has not been observed to send anything else.
    pub state: u8,
    /// Set-point voltage in millivolts.
    pub voltage_set: u16,
    /// Set-point current limit in milliamps.
    pub current_set: u16,
    /// Over-voltage protection threshold in millivolts.
    pub ovp: u16,
    /// Over-current protection threshold in milliamps.
    pub ocp: u16,
}

impl Decode for BasicSet {
    fn decode(data: &mut &[u8]) -> Result<Self, DecodeError> {
        let index = u8::decode(data)?;
        let state = u8::decode(data)?;
        let voltage_set = u16::decode(data)?;
        let current_set = u16::decode(data)?;
        let ovp = u16::decode(data)?;
        let ocp = u16::decode(data)?;

        Ok(Self {
            index,
            state,
            voltage_set,
            current_set,
            ovp,
            ocp,
        })
    }
}

/// Output settings to push with [`BasicSetCommand::Modify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pub output_on: bool,
    /// Set-point voltage in millivolts.
    pub voltage_set: u16,
    /// Set-point current limit in milliamps.
    pub current_set: u16,
    /// Over-voltage protection threshold in millivolts.
    pub ovp: u16,
    /// Over-current protection threshold in milliamps.
    pub ocp: u16,
}

impl Default for OutputSettings {
    /// Output off, set-points zeroed, protection thresholds at the firmware
    /// defaults (30.5 V / 5.05 A).
    fn default() -> Self {
        Self {
            output_on: false,
            voltage_set: 0,
            current_set: 0,
            ovp: 30500,
            ocp: 5050,
        }
    }
}

impl From<BasicSet> for OutputSettings {
    fn from(set: BasicSet) -> Self {
        Self {
            output_on: set.state != 0,
            voltage_set: set.voltage_set,
            current_set: set.current_set,
            ovp: set.ovp,
            ocp: set.ocp,
        }
    }
}

/// Payload for the basic-set operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasicSetCommand {
    /// Ask the supply to report its active settings record.
    Query,
    /// Push new output settings. The supply answers with a one-byte
    /// acknowledgement instead of a settings record.
    Modify(OutputSettings),
}

impl Encode for BasicSetCommand {
    fn encode(&self) -> Vec<u8> {
        match self {
            Self::Query => vec![mode::ACTIVATE],
            Self::Modify(settings) => {
                let mut payload = Vec::with_capacity(10);
                payload.push(mode::MODIFY);
                payload.push(settings.output_on as u8);
                payload.extend_from_slice(&settings.voltage_set.to_le_bytes());
                payload.extend_from_slice(&settings.current_set.to_le_bytes());
                payload.extend_from_slice(&settings.ovp.to_le_bytes());
                payload.extend_from_slice(&settings.ocp.to_le_bytes());
                payload
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_payload_layout() {
        let payload = BasicSetCommand::Modify(OutputSettings {
            output_on: true,
            voltage_set: 5000,
            current_set: 1000,
            ..OutputSettings::default()
        })
        .encode();

        assert_eq!(
            payload,
            [0x20, 0x01, 0x88, 0x13, 0xE8, 0x03, 0x24, 0x77, 0xBA, 0x13]
        );
    }

    #[test]
    fn query_payload_is_the_activate_byte() {
        assert_eq!(BasicSetCommand::Query.encode(), [0x80]);
    }

    #[test]
    fn decode_settings_record() {
        let payload = [0x00, 0x01, 0x88, 0x13, 0xE8, 0x03, 0x24, 0x77, 0xBA, 0x13];
        let mut cursor = payload.as_slice();
        let set = BasicSet::decode(&mut cursor).unwrap();

        assert_eq!(set.index, 0);
        assert_eq!(set.state, 1);
        assert_eq!(set.voltage_set, 5000);
        assert_eq!(set.current_set, 1000);
        assert_eq!(set.ovp, 30500);
        assert_eq!(set.ocp, 5050);
        assert!(cursor.is_empty());
    }

    #[test]
    fn decode_basic_info_record() {
        let mut payload = Vec::new();
        for field in [12015u16, 5002, 998, 30500, 253, 251, 4985] {
            payload.extend_from_slice(&field.to_le_bytes());
        }
        payload.push(0x01); // CC
        payload.push(0x02);

        let mut cursor = payload.as_slice();
        let info = BasicInfo::decode(&mut cursor).unwrap();

        assert_eq!(info.vin, 12015);
        assert_eq!(info.vout, 5002);
        assert_eq!(info.iout, 998);
        assert_eq!(info.vout_max, 30500);
        assert_eq!(info.temp1, 253);
        assert_eq!(info.temp2, 251);
        assert_eq!(info.dc_5v, 4985);
        assert_eq!(info.output_mode, 1);
        assert_eq!(info.work_state, 2);
    }
}
