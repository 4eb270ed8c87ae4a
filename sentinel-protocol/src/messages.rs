//! Command catalogue for the master → peripheral link
//!
//! Each command maps one-to-one onto a numeric id on the wire. Commands that
//! carry text borrow it, either from the caller (encoding) or from the
//! received frame (decoding).

use crate::frame::{Frame, FrameError};

// Command IDs: Master → Peripheral
pub const CMD_BUZZER_ON: u8 = 1;
pub const CMD_BUZZER_OFF: u8 = 2;
pub const CMD_DISPLAY_TEXT: u8 = 3;
pub const CMD_DISPLAY_CLEAR: u8 = 4;
pub const CMD_DISPLAY_STATUS: u8 = 5;
pub const CMD_POWER_DOWN: u8 = 6;

/// Commands from the master to the peripheral unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command<'a> {
    /// Gate the tone generator on
    BuzzerOn,
    /// Gate the tone generator off
    BuzzerOff,
    /// Clear the display and show text on the first row
    DisplayText(&'a str),
    /// Clear the display
    DisplayClear,
    /// Overwrite the second row without clearing the first
    DisplayStatus(&'a str),
    /// Put the peripheral into its lowest-power sleep
    PowerDown,
}

/// Payload-free discriminant of a [`Command`], for logging and outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandKind {
    BuzzerOn,
    BuzzerOff,
    DisplayText,
    DisplayClear,
    DisplayStatus,
    PowerDown,
}

impl<'a> Command<'a> {
    /// Wire id of this command
    pub fn id(&self) -> u8 {
        match self {
            Command::BuzzerOn => CMD_BUZZER_ON,
            Command::BuzzerOff => CMD_BUZZER_OFF,
            Command::DisplayText(_) => CMD_DISPLAY_TEXT,
            Command::DisplayClear => CMD_DISPLAY_CLEAR,
            Command::DisplayStatus(_) => CMD_DISPLAY_STATUS,
            Command::PowerDown => CMD_POWER_DOWN,
        }
    }

    /// Payload-free kind of this command
    pub fn kind(&self) -> CommandKind {
        match self {
            Command::BuzzerOn => CommandKind::BuzzerOn,
            Command::BuzzerOff => CommandKind::BuzzerOff,
            Command::DisplayText(_) => CommandKind::DisplayText,
            Command::DisplayClear => CommandKind::DisplayClear,
            Command::DisplayStatus(_) => CommandKind::DisplayStatus,
            Command::PowerDown => CommandKind::PowerDown,
        }
    }

    /// Text carried by this command, if any
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Command::DisplayText(text) | Command::DisplayStatus(text) => Some(*text),
            _ => None,
        }
    }

    /// Encode this command into a frame
    pub fn to_frame(&self) -> Result<Frame, FrameError> {
        Frame::encode(self.id(), self.text().map(str::as_bytes))
    }

    /// Parse a command from a received frame
    ///
    /// A text command without a delimiter carries empty text. A payload on a
    /// command that takes none is ignored.
    pub fn from_frame(frame: &'a Frame) -> Result<Self, FrameError> {
        let (id, payload) = frame.decode()?;

        let text = || -> Result<&'a str, FrameError> {
            match payload {
                Some(bytes) => {
                    core::str::from_utf8(bytes).map_err(|_| FrameError::MalformedCommand)
                }
                None => Ok(""),
            }
        };

        match id {
            CMD_BUZZER_ON => Ok(Command::BuzzerOn),
            CMD_BUZZER_OFF => Ok(Command::BuzzerOff),
            CMD_DISPLAY_TEXT => Ok(Command::DisplayText(text()?)),
            CMD_DISPLAY_CLEAR => Ok(Command::DisplayClear),
            CMD_DISPLAY_STATUS => Ok(Command::DisplayStatus(text()?)),
            CMD_POWER_DOWN => Ok(Command::PowerDown),
            other => Err(FrameError::UnknownCommandId(other)),
        }
    }
}
