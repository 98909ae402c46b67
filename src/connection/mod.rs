//! Request/response cycles against a live supply.

use std::thread;
use std::time::Duration;

use log::trace;
use thiserror::Error;

use crate::encode::Encode;
use crate::packets::basic::{BasicInfo, BasicSet, BasicSetCommand, OutputSettings};
use crate::packets::device::DeviceInfo;
use crate::packets::system::SystemInfo;
use crate::packets::{decode_frame, CommandFrame, FrameError, FrameStatus, Opcode};
use crate::state::DeviceState;

#[cfg(feature = "hid")]
pub mod hid;

/// Time to wait between writing a request and reading the reply, giving the
/// firmware time to fill its outbound report.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

/// Size of a DP100 HID report; replies never exceed one report.
pub const REPORT_LEN: usize = 64;

/// Byte transport carrying frames to and from a supply.
///
/// Both calls block, bounded by whatever timeout policy the transport itself
/// implements. The [`hid`] module provides the real USB implementation; tests
/// substitute an in-memory one.
pub trait Transport {
    type Error: std::error::Error + 'static;

    /// Writes one frame, returning the number of frame bytes accepted.
    fn write(&mut self, data: &[u8]) -> Result<usize, Self::Error>;

    /// Reads up to `data.len()` bytes of one reply, returning the number of
    /// bytes read. A return of 0 means the transport produced no reply.
    fn read(&mut self, data: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Ways a request/response cycle can fail.
#[derive(Debug, Error)]
pub enum ConnectionError<E: std::error::Error> {
    /// The reply failed frame validation or payload decoding.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// The transport failed to carry the request or the reply. Kept separate
    /// from [`FrameError::Checksum`]: a transport that returns nothing is not
    /// a corrupt frame.
    #[error("transport error: {0}")]
    Transport(#[source] E),

    /// The transport returned an empty read.
    #[error("device sent no reply")]
    NoReply,

    /// The reply validated but did not answer the request that was sent.
    #[error("unexpected reply to {sent:?} request: {received:?}")]
    UnexpectedReply {
        sent: Opcode,
        received: FrameStatus,
    },
}

/// A DP100 power supply behind a [`Transport`].
///
/// All methods drive one strictly synchronous request/response cycle at a
/// time; `&mut self` enforces that no second request starts before the
/// current reply (or its failure) has been consumed.
pub struct Dp100<T: Transport> {
    transport: T,
    state: DeviceState,
    settle_delay: Duration,
}

impl<T: Transport> Dp100<T> {
    /// Wraps a transport with the default settle delay.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: DeviceState::default(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Overrides the delay inserted between writing a request and reading
    /// its reply.
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// The last-known device state, as updated by every successful cycle.
    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Consumes the connection, returning the underlying transport.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Runs one raw request/response cycle: encode, write, settle, read,
    /// decode into the state model.
    pub fn request<P: Encode>(
        &mut self,
        opcode: Opcode,
        payload: P,
    ) -> Result<FrameStatus, ConnectionError<T::Error>> {
        let frame = CommandFrame::new(opcode, payload).encode();
        trace!("sending {frame:02X?}");
        self.transport
            .write(&frame)
            .map_err(ConnectionError::Transport)?;

        thread::sleep(self.settle_delay);

        let mut buffer = [0u8; REPORT_LEN];
        let len = self
            .transport
            .read(&mut buffer)
            .map_err(ConnectionError::Transport)?;
        if len == 0 {
            return Err(ConnectionError::NoReply);
        }
        trace!("received {:02X?}", &buffer[..len]);

        Ok(decode_frame(&buffer[..len], &mut self.state)?)
    }

    /// Runs a cycle and requires the reply to update the requested record.
    fn request_update<P: Encode>(
        &mut self,
        opcode: Opcode,
        payload: P,
    ) -> Result<(), ConnectionError<T::Error>> {
        match self.request(opcode, payload)? {
            FrameStatus::Updated(op) if op == opcode => Ok(()),
            received => Err(ConnectionError::UnexpectedReply {
                sent: opcode,
                received,
            }),
        }
    }

    /// Queries the identity record: model string, revisions, serial number,
    /// manufacture date.
    pub fn device_info(&mut self) -> Result<&DeviceInfo, ConnectionError<T::Error>> {
        self.request_update(Opcode::DeviceInfo, ())?;
        Ok(&self.state.device_info)
    }

    /// Queries the live measurements: voltages, current, temperatures.
    pub fn basic_info(&mut self) -> Result<&BasicInfo, ConnectionError<T::Error>> {
        self.request_update(Opcode::BasicInfo, ())?;
        Ok(&self.state.basic_info)
    }

    /// Queries the front-panel and protection settings.
    pub fn system_info(&mut self) -> Result<&SystemInfo, ConnectionError<T::Error>> {
        self.request_update(Opcode::SystemInfo, ())?;
        Ok(&self.state.system_info)
    }

    /// Queries the currently active output settings.
    pub fn active_settings(&mut self) -> Result<&BasicSet, ConnectionError<T::Error>> {
        self.request_update(Opcode::BasicSet, BasicSetCommand::Query)?;
        Ok(&self.state.basic_set)
    }

    /// Pushes new output settings and waits for the acknowledgement.
    pub fn apply_settings(
        &mut self,
        settings: OutputSettings,
    ) -> Result<(), ConnectionError<T::Error>> {
        self.request_update(Opcode::BasicSet, BasicSetCommand::Modify(settings))
    }

    /// Enables or disables the output, keeping the supply's current
    /// set-points and protection thresholds.
    pub fn set_output(&mut self, on: bool) -> Result<(), ConnectionError<T::Error>> {
        let mut settings = OutputSettings::from(*self.active_settings()?);
        settings.output_on = on;
        self.apply_settings(settings)
    }
}
