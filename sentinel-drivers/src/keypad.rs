//! 4x4 matrix keypad
//!
//! Rows are driven low one at a time; columns are inputs with pull-ups,
//! so a pressed key reads low on its column while its row is driven.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use sentinel_core::traits::{Key, Keypad};

/// Key legends, row-major
pub const LAYOUT: [[char; 4]; 4] = [
    ['1', '2', '3', 'A'],
    ['4', '5', '6', 'B'],
    ['7', '8', '9', 'C'],
    ['*', '0', '#', 'D'],
];

/// Row settle time before sampling columns
const SETTLE_US: u32 = 5;

/// Contact bounce window
const DEBOUNCE_MS: u32 = 20;

/// Scanned 4x4 keypad
pub struct MatrixKeypad<R, C, D> {
    rows: [R; 4],
    cols: [C; 4],
    delay: D,
    /// Key currently held down, already reported
    held: Option<char>,
}

impl<R, C, D> MatrixKeypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    pub fn new(mut rows: [R; 4], cols: [C; 4], delay: D) -> Self {
        for row in &mut rows {
            let _ = row.set_high();
        }
        Self {
            rows,
            cols,
            delay,
            held: None,
        }
    }

    /// Sample the matrix once, returning the first closed contact
    fn sample(&mut self) -> Option<char> {
        for r in 0..self.rows.len() {
            if self.rows[r].set_low().is_err() {
                continue;
            }
            self.delay.delay_us(SETTLE_US);

            let col = self
                .cols
                .iter_mut()
                .position(|col| col.is_low().unwrap_or(false));

            let _ = self.rows[r].set_high();
            if let Some(c) = col {
                return Some(LAYOUT[r][c]);
            }
        }
        None
    }
}

impl<R, C, D> Keypad for MatrixKeypad<R, C, D>
where
    R: OutputPin,
    C: InputPin,
    D: DelayNs,
{
    fn scan(&mut self) -> Option<Key> {
        let Some(legend) = self.sample() else {
            self.held = None;
            return None;
        };
        if self.held == Some(legend) {
            return None;
        }

        // Confirm the press outlasts the bounce window
        self.delay.delay_ms(DEBOUNCE_MS);
        if self.sample() != Some(legend) {
            return None;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("Key pressed: {}", legend);

        self.held = Some(legend);
        Some(Key::from_char(legend))
    }
}
