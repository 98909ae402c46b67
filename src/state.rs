//! Last-known device state.

use crate::packets::basic::{BasicInfo, BasicSet};
use crate::packets::device::DeviceInfo;
use crate::packets::system::SystemInfo;

/// The last-known values reported by a supply.
///
/// Each record starts out zeroed and is replaced wholesale whenever a reply
/// frame with the matching opcode validates and decodes. The records are
/// independent of one another, and a frame that fails validation never
/// touches any of them. Hold one instance per logical device connection;
/// [`decode_frame`](crate::packets::decode_frame) is the only writer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeviceState {
    /// Live measurements (basic-info, 0x30).
    pub basic_info: BasicInfo,
    /// Identity and firmware revisions (device-info, 0x10).
    pub device_info: DeviceInfo,
    /// Front-panel and protection settings (system-info, 0x40).
    pub system_info: SystemInfo,
    /// Active output settings (basic-set, 0x35).
    pub basic_set: BasicSet,
}
