//! HD44780 16x2 character LCD on a 4-bit bus
//!
//! Write-only: R/W is tied low, so fixed delays stand in for the busy flag.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use sentinel_peripheral::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06; // increment, no shift
const CMD_DISPLAY_ON: u8 = 0x0C; // display on, cursor off, blink off
const CMD_FUNCTION_SET: u8 = 0x28; // 4-bit, 2 lines, 5x8 font
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; SCREEN_ROWS] = [0x00, 0x40];

/// Shown in place of characters outside the ROM's ASCII range
const REPLACEMENT: u8 = b'?';

/// HD44780 driver
///
/// Data pins are D4..D7 in that order.
pub struct Hd44780<P, D> {
    rs: P,
    en: P,
    data: [P; 4],
    delay: D,
}

impl<P: OutputPin, D: DelayNs> Hd44780<P, D> {
    /// Run the power-on initialization sequence
    pub fn new(rs: P, en: P, data: [P; 4], delay: D) -> Result<Self, DisplayError> {
        let mut lcd = Self {
            rs,
            en,
            data,
            delay,
        };
        lcd.init()?;
        Ok(lcd)
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(50);
        pin(self.rs.set_low())?;
        pin(self.en.set_low())?;

        // Force 8-bit mode three times, then switch to 4-bit
        self.write_nibble(0x3)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x3)?;
        self.delay.delay_us(150);
        self.write_nibble(0x3)?;
        self.delay.delay_us(150);
        self.write_nibble(0x2)?;

        self.command(CMD_FUNCTION_SET)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE)?;

        #[cfg(feature = "defmt")]
        defmt::info!("LCD initialized");
        Ok(())
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (bit, line) in self.data.iter_mut().enumerate() {
            pin(line.set_state(((nibble >> bit) & 1 != 0).into()))?;
        }
        pin(self.en.set_high())?;
        self.delay.delay_us(1);
        pin(self.en.set_low())?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, is_data: bool) -> Result<(), DisplayError> {
        if is_data {
            pin(self.rs.set_high())?;
        } else {
            pin(self.rs.set_low())?;
        }
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.write_byte(command, false)
    }

    pub fn release(self) -> (P, P, [P; 4], D) {
        (self.rs, self.en, self.data, self.delay)
    }
}

fn pin<E>(result: Result<(), E>) -> Result<(), DisplayError> {
    result.map_err(|_| DisplayError::Communication)
}

impl<P: OutputPin, D: DelayNs> DisplayBackend for Hd44780<P, D> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, text: &str) -> Result<(), DisplayError> {
        let offset = ROW_OFFSETS
            .get(row as usize)
            .ok_or(DisplayError::InvalidCoordinates)?;
        self.command(CMD_SET_DDRAM | offset)?;

        let mut chars = text.chars();
        for _ in 0..SCREEN_COLS {
            let byte = match chars.next() {
                Some(c) if c.is_ascii() && !c.is_ascii_control() => c as u8,
                Some(_) => REPLACEMENT,
                None => b' ',
            };
            self.write_byte(byte, true)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
