//! Master side of the frame link
//!
//! Selects the peripheral, shifts all 40 bytes with a short settle gap
//! around each, then releases the select line. The select line is
//! released even when a byte times out, so the peripheral resynchronizes
//! on the next frame.
//!
//! The peripheral stops reading SPI while it redraws its LCD after a
//! frame, and its receive FIFO holds only a few bytes. Every frame is
//! therefore followed by a quiet gap longer than that redraw.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use sentinel_core::traits::{CommandLink, LinkError};
use sentinel_hal::SpiMaster;
use sentinel_protocol::Frame;

use super::WaitBound;

/// Settle time before and after each byte, in microseconds
const BYTE_GAP_US: u32 = 10;

/// Default quiet time after each frame, in microseconds
///
/// A full 16x2 HD44780 redraw on the peripheral takes about 3.5 ms.
pub const FRAME_GAP_US: u32 = 5_000;

/// SPI frame transmitter with a chip-select line
pub struct SpiCommandLink<S, CS, D> {
    spi: S,
    cs: CS,
    delay: D,
    bound: WaitBound,
    frame_gap_us: u32,
}

impl<S, CS, D> SpiCommandLink<S, CS, D>
where
    S: SpiMaster,
    CS: OutputPin,
    D: DelayNs,
{
    /// Create a link; the select line is driven high (idle)
    pub fn new(spi: S, mut cs: CS, delay: D) -> Self {
        let _ = cs.set_high();
        Self {
            spi,
            cs,
            delay,
            bound: WaitBound::default(),
            frame_gap_us: FRAME_GAP_US,
        }
    }

    /// Replace the per-byte wait bound
    pub fn with_bound(mut self, bound: WaitBound) -> Self {
        self.bound = bound;
        self
    }

    /// Replace the quiet time after each frame
    pub fn with_frame_gap_us(mut self, us: u32) -> Self {
        self.frame_gap_us = us;
        self
    }

    pub fn release(self) -> (S, CS, D) {
        (self.spi, self.cs, self.delay)
    }

    fn shift(&mut self, frame: &Frame) -> Result<(), LinkError> {
        for &byte in frame.as_bytes() {
            self.spi.start_transfer(byte);
            self.delay.delay_us(BYTE_GAP_US);
            if !self.bound.wait(|| self.spi.transfer_complete()) {
                #[cfg(feature = "defmt")]
                defmt::warn!("SPI byte not shifted out within bound");
                return Err(LinkError::Timeout);
            }
            self.delay.delay_us(BYTE_GAP_US);
        }
        Ok(())
    }
}

impl<S, CS, D> CommandLink for SpiCommandLink<S, CS, D>
where
    S: SpiMaster,
    CS: OutputPin,
    D: DelayNs,
{
    fn send_frame(&mut self, frame: &Frame) -> Result<(), LinkError> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Sending frame: {=[u8]:a}", frame.content());

        self.cs.set_low().map_err(|_| LinkError::Bus)?;
        let shifted = self.shift(frame);
        let released = self.cs.set_high().map_err(|_| LinkError::Bus);
        self.delay.delay_us(self.frame_gap_us);
        shifted.and(released)
    }
}
