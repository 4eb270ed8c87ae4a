//! Peripheral side of the frame link
//!
//! The first byte of a frame may take arbitrarily long to arrive; once it
//! has, the remaining bytes must follow within the wait bound or the
//! partial frame is discarded.

use sentinel_core::traits::LinkError;
use sentinel_hal::SpiSlave;
use sentinel_protocol::{Frame, FRAME_SIZE};

use super::WaitBound;

/// SPI frame receiver
pub struct SpiFrameReceiver<S> {
    spi: S,
    bound: WaitBound,
}

impl<S: SpiSlave> SpiFrameReceiver<S> {
    pub fn new(spi: S) -> Self {
        Self {
            spi,
            bound: WaitBound::default(),
        }
    }

    /// Replace the per-byte wait bound
    pub fn with_bound(mut self, bound: WaitBound) -> Self {
        self.bound = bound;
        self
    }

    /// Block until one full frame has been received
    pub fn receive(&mut self) -> Result<Frame, LinkError> {
        let mut bytes = [0u8; FRAME_SIZE];

        while !self.spi.byte_received() {}
        bytes[0] = self.spi.read_byte();

        for slot in bytes.iter_mut().skip(1) {
            if !self.bound.wait(|| self.spi.byte_received()) {
                #[cfg(feature = "defmt")]
                defmt::warn!("Partial frame dropped");
                return Err(LinkError::Timeout);
            }
            *slot = self.spi.read_byte();
        }

        Ok(Frame::from_bytes(bytes))
    }
}
