//! Screen buffer
//!
//! Character buffer matching the peripheral's 16x2 LCD. The executor
//! writes here; the firmware copies it to the LCD only when it changed.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the LCD
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the LCD
pub const SCREEN_COLS: usize = 16;

/// In-memory 16x2 display
#[derive(Clone)]
pub struct Screen {
    lines: [String<SCREEN_COLS>; SCREEN_ROWS],
    /// Whether the screen needs to be redrawn
    dirty: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            dirty: true,
        }
    }

    /// Set the content of a specific row
    pub fn set_line(&mut self, row: usize, text: &str) {
        if row < SCREEN_ROWS {
            self.lines[row].clear();
            // Truncated text always fits
            let _ = self.lines[row].push_str(truncate(text, SCREEN_COLS));
            self.dirty = true;
        }
    }

    /// Get the content of a specific row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    pub fn is_blank(&self) -> bool {
        self.lines.iter().all(|line| line.is_empty())
    }

    /// Check if screen needs redrawing
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark screen as clean (after rendering)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Copy the buffer to a hardware backend if it changed
    ///
    /// Returns whether anything was drawn.
    pub fn render<B: DisplayBackend>(&mut self, target: &mut B) -> Result<bool, DisplayError> {
        if !self.dirty {
            return Ok(false);
        }
        for (row, line) in self.lines.iter().enumerate() {
            target.draw_text(row as u8, line)?;
        }
        self.mark_clean();
        Ok(true)
    }
}

impl DisplayBackend for Screen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for line in &mut self.lines {
            line.clear();
        }
        self.dirty = true;
        Ok(())
    }

    fn draw_text(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        if row as usize >= SCREEN_ROWS {
            return Err(DisplayError::InvalidCoordinates);
        }
        self.set_line(row as usize, text);
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}

/// Longest prefix of `text` with at most `cols` bytes, on a char boundary
pub fn truncate(text: &str, cols: usize) -> &str {
    if text.len() <= cols {
        return text;
    }
    let mut end = cols;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[{}, {}]", self.lines[0].as_str(), self.lines[1].as_str());
    }
}
