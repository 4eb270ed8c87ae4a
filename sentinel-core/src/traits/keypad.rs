//! Keypad collaborator

/// OK key
pub const OK_CHAR: char = '#';
/// Backspace key
pub const BACKSPACE_CHAR: char = '*';
/// Rearm key
pub const ARM_CHAR: char = 'A';
/// Power-off key
pub const POWER_OFF_CHAR: char = 'B';

/// A decoded key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// `0`-`9`, stored as the ASCII byte
    Digit(u8),
    /// Submit the PIN
    Ok,
    /// Delete the last digit
    Backspace,
    /// Rearm the sensor
    Arm,
    /// Shut the system down
    PowerOff,
    /// Any other key on the pad
    Other(char),
}

impl Key {
    /// Map a keypad legend to a key
    pub fn from_char(c: char) -> Self {
        match c {
            '0'..='9' => Key::Digit(c as u8),
            OK_CHAR => Key::Ok,
            BACKSPACE_CHAR => Key::Backspace,
            ARM_CHAR => Key::Arm,
            POWER_OFF_CHAR => Key::PowerOff,
            other => Key::Other(other),
        }
    }
}

/// Keypad collaborator
pub trait Keypad {
    /// Return the key pressed since the last scan, if any
    ///
    /// Never blocks. Implementations debounce and report each press once.
    fn scan(&mut self) -> Option<Key>;

    /// Block until a key is pressed
    fn read_key(&mut self) -> Key {
        loop {
            if let Some(key) = self.scan() {
                return key;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_char() {
        assert_eq!(Key::from_char('7'), Key::Digit(b'7'));
        assert_eq!(Key::from_char('#'), Key::Ok);
        assert_eq!(Key::from_char('*'), Key::Backspace);
        assert_eq!(Key::from_char('A'), Key::Arm);
        assert_eq!(Key::from_char('B'), Key::PowerOff);
        assert_eq!(Key::from_char('D'), Key::Other('D'));
    }

    struct Queue<'a>(&'a [Option<Key>]);

    impl Keypad for Queue<'_> {
        fn scan(&mut self) -> Option<Key> {
            let (first, rest) = self.0.split_first()?;
            self.0 = rest;
            *first
        }
    }

    #[test]
    fn test_read_key_skips_idle_scans() {
        let mut keypad = Queue(&[None, None, Some(Key::Arm)]);
        assert_eq!(keypad.read_key(), Key::Arm);
    }
}
