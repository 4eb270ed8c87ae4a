//! PIN entry buffer
//!
//! Holds the digits typed so far. Capacity is fixed when the buffer is
//! created (the length of the configured secret) and appending past it
//! fails instead of overrunning.

use heapless::{String, Vec};

use crate::config::MAX_PIN_LEN;

/// Character drawn for each digit entered
pub const MASK_CHAR: char = '*';

/// Error from [`PinBuffer::push`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Buffer already holds a full-length PIN
    Full,
    /// Only `0`-`9` can be entered
    NotADigit,
}

/// Digits entered so far
#[derive(Debug, Clone)]
pub struct PinBuffer {
    digits: Vec<u8, MAX_PIN_LEN>,
    capacity: usize,
}

impl PinBuffer {
    /// Create an empty buffer holding at most `capacity` digits
    ///
    /// `capacity` is clamped to [`MAX_PIN_LEN`].
    pub fn new(capacity: usize) -> Self {
        Self {
            digits: Vec::new(),
            capacity: capacity.min(MAX_PIN_LEN),
        }
    }

    /// Append an ASCII digit
    pub fn push(&mut self, digit: u8) -> Result<(), PinError> {
        if !digit.is_ascii_digit() {
            return Err(PinError::NotADigit);
        }
        if self.digits.len() >= self.capacity {
            return Err(PinError::Full);
        }
        self.digits.push(digit).map_err(|_| PinError::Full)
    }

    /// Remove the last digit, if any
    pub fn pop(&mut self) -> Option<u8> {
        self.digits.pop()
    }

    pub fn clear(&mut self) {
        self.digits.clear();
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Byte-exact comparison against the secret
    pub fn matches(&self, secret: &[u8]) -> bool {
        self.digits.as_slice() == secret
    }

    /// Masked indicator: one `*` per digit, padded with spaces to capacity
    pub fn mask(&self) -> String<MAX_PIN_LEN> {
        let mut mask = String::new();
        for i in 0..self.capacity {
            let c = if i < self.digits.len() { MASK_CHAR } else { ' ' };
            // capacity <= MAX_PIN_LEN
            let _ = mask.push(c);
        }
        mask
    }
}
