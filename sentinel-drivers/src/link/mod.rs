//! Frame link over SPI
//!
//! Every frame is exactly [`FRAME_SIZE`](sentinel_protocol::FRAME_SIZE)
//! bytes, shifted one byte at a time. Both ends poll a per-byte flag and
//! give up after [`WaitBound::spins`] polls.

pub mod master;
pub mod slave;

pub use master::{SpiCommandLink, FRAME_GAP_US};
pub use slave::SpiFrameReceiver;

/// Upper bound on a per-byte busy-wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitBound {
    /// Flag polls before the byte counts as lost
    pub spins: u32,
}

impl Default for WaitBound {
    fn default() -> Self {
        // A byte takes 8 us at 1 MHz; this is several milliseconds of polling
        Self { spins: 50_000 }
    }
}

impl WaitBound {
    /// Poll `ready` until it returns true or the bound runs out
    pub(crate) fn wait(&self, mut ready: impl FnMut() -> bool) -> bool {
        (0..self.spins).any(|_| ready())
    }
}
