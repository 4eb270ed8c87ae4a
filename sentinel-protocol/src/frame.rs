//! Frame encoding and decoding for the master → peripheral link.
//!
//! Frame format (always exactly [`FRAME_SIZE`] bytes on the wire):
//! - ID: command id as ASCII decimal digits (1-3 bytes)
//! - DELIMITER (optional): `>` separating the id from the payload
//! - PAYLOAD (optional): ASCII/UTF-8 text
//! - TERMINATOR: a single NUL byte ending the encoded text
//! - FILL: remaining bytes are zero
//!
//! Decoding tolerates a missing terminator (a full frame of text) and never
//! looks beyond the frame boundary.

/// Size of every frame exchanged over the link
pub const FRAME_SIZE: usize = 40;

/// Separates the command id from its payload
pub const DELIMITER: u8 = b'>';

/// Ends the encoded text inside a frame
const TERMINATOR: u8 = 0;

/// Maximum payload size for a single-digit command id
/// (FRAME_SIZE - ID - DELIMITER - TERMINATOR)
pub const MAX_PAYLOAD_SIZE: usize = FRAME_SIZE - 3;

/// Errors that can occur during frame encoding or decoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Payload does not fit in the frame together with id and terminator
    PayloadTooLarge,
    /// Payload contains a byte that cannot be carried (NUL)
    InvalidPayload,
    /// Command id is empty, non-numeric, or out of range
    MalformedCommand,
    /// Command id is well-formed but not part of the catalogue
    UnknownCommandId(u8),
}

/// A single fixed-size frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    bytes: [u8; FRAME_SIZE],
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            bytes: [0; FRAME_SIZE],
        }
    }
}

impl Frame {
    /// Encode a command id and optional payload into a frame
    ///
    /// Payloads that would not fit are rejected, never truncated.
    pub fn encode(id: u8, payload: Option<&[u8]>) -> Result<Self, FrameError> {
        let mut bytes = [0u8; FRAME_SIZE];
        let mut len = write_decimal(&mut bytes, id);

        if let Some(payload) = payload {
            if payload.contains(&TERMINATOR) {
                return Err(FrameError::InvalidPayload);
            }
            // Delimiter + payload + terminator must still fit
            if len + 1 + payload.len() + 1 > FRAME_SIZE {
                return Err(FrameError::PayloadTooLarge);
            }

            bytes[len] = DELIMITER;
            len += 1;
            bytes[len..len + payload.len()].copy_from_slice(payload);
        }

        Ok(Self { bytes })
    }

    /// Wrap raw bytes received from the link
    pub fn from_bytes(bytes: [u8; FRAME_SIZE]) -> Self {
        Self { bytes }
    }

    /// Raw frame bytes, as clocked onto the link
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.bytes
    }

    /// Encoded text, up to (not including) the terminator
    pub fn content(&self) -> &[u8] {
        let end = self
            .bytes
            .iter()
            .position(|&b| b == TERMINATOR)
            .unwrap_or(FRAME_SIZE);
        &self.bytes[..end]
    }

    /// Split the frame into command id and optional payload
    ///
    /// The split happens on the first delimiter; anything after it,
    /// including further delimiters, is payload.
    pub fn decode(&self) -> Result<(u8, Option<&[u8]>), FrameError> {
        let content = self.content();

        let (id_part, payload) = match content.iter().position(|&b| b == DELIMITER) {
            Some(pos) => (&content[..pos], Some(&content[pos + 1..])),
            None => (content, None),
        };

        let id = parse_decimal(id_part).ok_or(FrameError::MalformedCommand)?;
        Ok((id, payload))
    }
}

/// Write `value` as ASCII decimal, returning the number of digits written
fn write_decimal(buf: &mut [u8], value: u8) -> usize {
    let mut digits = [0u8; 3];
    let mut n = value;
    let mut count = 0;

    loop {
        digits[count] = b'0' + n % 10;
        n /= 10;
        count += 1;
        if n == 0 {
            break;
        }
    }

    for i in 0..count {
        buf[i] = digits[count - 1 - i];
    }
    count
}

/// Parse ASCII decimal digits into a command id
fn parse_decimal(digits: &[u8]) -> Option<u8> {
    if digits.is_empty() {
        return None;
    }

    let mut value: u16 = 0;
    for &d in digits {
        if !d.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u16::from(d - b'0');
        if value > u16::from(u8::MAX) {
            return None;
        }
    }
    Some(value as u8)
}
