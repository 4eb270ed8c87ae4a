//! Output backend traits
//!
//! Defines the interface for the peripheral's character display and buzzer.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Row outside the display
    InvalidCoordinates,
}

/// Character display backend
///
/// Text-only; there is no readback.
pub trait DisplayBackend {
    /// Clear the entire display
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Replace the contents of a row
    ///
    /// Text longer than the row is truncated; shorter text leaves the rest
    /// of the row blank.
    fn draw_text(&mut self, row: u8, text: &str) -> Result<(), DisplayError>;

    /// Get the display dimensions
    ///
    /// Returns (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}

/// Tone generator with an on/off gate
///
/// Gating never changes the tone frequency. Setting the current state
/// again is a no-op.
pub trait Buzzer {
    fn set_enabled(&mut self, on: bool);

    fn is_enabled(&self) -> bool;
}
