//! Command link to the peripheral unit

use sentinel_protocol::{Command, Frame, FrameError};

/// Errors that can occur on the command link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Byte-ready flag did not assert within the wait bound
    Timeout,
    /// Select line could not be driven
    Bus,
    /// Command could not be framed (or a received frame was invalid)
    Frame(FrameError),
}

impl From<FrameError> for LinkError {
    fn from(err: FrameError) -> Self {
        LinkError::Frame(err)
    }
}

/// One-way frame transport from master to peripheral
///
/// No acknowledgement, no retry: a frame either goes out in full or the
/// call fails.
pub trait CommandLink {
    /// Clock one complete frame out to the peripheral
    fn send_frame(&mut self, frame: &Frame) -> Result<(), LinkError>;

    /// Encode and send a command
    fn send(&mut self, command: Command<'_>) -> Result<(), LinkError> {
        let frame = command.to_frame()?;
        self.send_frame(&frame)
    }
}

impl<T: CommandLink + ?Sized> CommandLink for &mut T {
    fn send_frame(&mut self, frame: &Frame) -> Result<(), LinkError> {
        T::send_frame(self, frame)
    }
}
