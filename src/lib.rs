//! Crate for querying and controlling Alientek DP100 digital power supplies
//! over USB HID.
//!
//! The DP100 speaks a strict request/response protocol: the host encodes a
//! command frame, writes it to the device, waits a short settle delay, and
//! reads back a reply frame. Both directions share one layout: a direction
//! marker, an operation code, a payload, and a trailing CRC16.
//!
//! The codec is built around the [`Encode`](encode::Encode) and
//! [`Decode`](decode::Decode) traits. Outbound requests are built with
//! [`CommandFrame`](packets::CommandFrame); inbound replies are validated and
//! dispatched by [`decode_frame`](packets::decode_frame), which writes the
//! decoded record into a [`DeviceState`](state::DeviceState).
//!
//! For actually talking to a supply, [`connection::Dp100`] wraps a
//! [`Transport`](connection::Transport) and exposes one method per protocol
//! operation. The `hid` feature (enabled by default) provides the real
//! [`HidTransport`](connection::hid::HidTransport).

pub mod connection;
pub mod crc;
pub mod decode;
pub mod encode;
pub mod packets;
pub mod state;
pub mod string;
pub mod version;
