//! Command executor
//!
//! Applies one received frame to the display and buzzer. Frames that do
//! not decode, or carry an id outside the catalogue, are logged and
//! dropped with no output change.

use sentinel_protocol::{Command, CommandKind, Frame, FrameError};

use crate::backend::{Buzzer, DisplayBackend, DisplayError};

/// Row used by `DisplayText`
const TEXT_ROW: u8 = 0;
/// Row used by `DisplayStatus`
const STATUS_ROW: u8 = 1;

/// Result of executing one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Command applied to the outputs
    Executed(CommandKind),
    /// Frame dropped; outputs untouched
    Ignored(FrameError),
    /// Outputs shut off; the caller should enter its lowest-power sleep
    PowerDown,
}

/// Peripheral command executor
pub struct Executor<D, B> {
    display: D,
    buzzer: B,
}

impl<D: DisplayBackend, B: Buzzer> Executor<D, B> {
    pub fn new(display: D, buzzer: B) -> Self {
        Self { display, buzzer }
    }

    /// Decode and apply one frame
    pub fn execute(&mut self, frame: &Frame) -> Result<Outcome, DisplayError> {
        let command = match Command::from_frame(frame) {
            Ok(command) => command,
            Err(err) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Ignoring frame: {}", err);
                return Ok(Outcome::Ignored(err));
            }
        };

        #[cfg(feature = "defmt")]
        defmt::debug!("Command: {}", command);

        match command {
            Command::BuzzerOn => self.buzzer.set_enabled(true),
            Command::BuzzerOff => self.buzzer.set_enabled(false),
            Command::DisplayText(text) => {
                self.display.clear()?;
                self.display.draw_text(TEXT_ROW, text)?;
            }
            Command::DisplayClear => self.display.clear()?,
            Command::DisplayStatus(text) => self.display.draw_text(STATUS_ROW, text)?,
            Command::PowerDown => {
                self.buzzer.set_enabled(false);
                self.display.clear()?;
                return Ok(Outcome::PowerDown);
            }
        }

        Ok(Outcome::Executed(command.kind()))
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn buzzer(&self) -> &B {
        &self.buzzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::Screen;

    /// Buzzer that counts gate changes
    #[derive(Default)]
    struct MockBuzzer {
        on: bool,
        switches: usize,
    }

    impl Buzzer for MockBuzzer {
        fn set_enabled(&mut self, on: bool) {
            if self.on != on {
                self.switches += 1;
            }
            self.on = on;
        }

        fn is_enabled(&self) -> bool {
            self.on
        }
    }

    fn executor() -> Executor<Screen, MockBuzzer> {
        Executor::new(Screen::new(), MockBuzzer::default())
    }

    fn run(executor: &mut Executor<Screen, MockBuzzer>, command: Command<'_>) -> Outcome {
        executor.execute(&command.to_frame().unwrap()).unwrap()
    }

    #[test]
    fn test_buzzer_on_is_idempotent() {
        let mut exec = executor();
        run(&mut exec, Command::BuzzerOn);
        run(&mut exec, Command::BuzzerOn);

        assert!(exec.buzzer().is_enabled());
        assert_eq!(exec.buzzer().switches, 1);

        run(&mut exec, Command::BuzzerOff);
        assert!(!exec.buzzer().is_enabled());
    }

    #[test]
    fn test_display_text_clears_first() {
        let mut exec = executor();
        run(&mut exec, Command::DisplayStatus("****"));
        let outcome = run(&mut exec, Command::DisplayText("Try again:"));

        assert_eq!(outcome, Outcome::Executed(CommandKind::DisplayText));
        assert_eq!(exec.display().get_line(0), Some("Try again:"));
        assert_eq!(exec.display().get_line(1), Some(""));
    }

    #[test]
    fn test_status_keeps_first_row() {
        let mut exec = executor();
        run(&mut exec, Command::DisplayText("Rearming in:"));
        run(&mut exec, Command::DisplayStatus("3s"));

        assert_eq!(exec.display().get_line(0), Some("Rearming in:"));
        assert_eq!(exec.display().get_line(1), Some("3s"));
    }

    #[test]
    fn test_display_clear() {
        let mut exec = executor();
        run(&mut exec, Command::DisplayText("I'm Waiting!!!"));
        run(&mut exec, Command::DisplayClear);
        assert!(exec.display().is_blank());
    }

    #[test]
    fn test_unknown_id_fails_open() {
        let mut exec = executor();
        run(&mut exec, Command::BuzzerOn);
        run(&mut exec, Command::DisplayText("Alarm triggered"));

        let frame = Frame::encode(42, Some(b"whatever")).unwrap();
        assert_eq!(
            exec.execute(&frame),
            Ok(Outcome::Ignored(FrameError::UnknownCommandId(42)))
        );

        // Nothing changed
        assert!(exec.buzzer().is_enabled());
        assert_eq!(exec.display().get_line(0), Some("Alarm triggered"));
    }

    #[test]
    fn test_malformed_frame_dropped() {
        let mut bytes = [0u8; sentinel_protocol::FRAME_SIZE];
        bytes[..4].copy_from_slice(b"x>hi");

        let mut exec = executor();
        assert_eq!(
            exec.execute(&Frame::from_bytes(bytes)),
            Ok(Outcome::Ignored(FrameError::MalformedCommand))
        );
        assert!(exec.display().is_blank());
    }

    #[test]
    fn test_power_down_silences_and_clears() {
        let mut exec = executor();
        run(&mut exec, Command::BuzzerOn);
        run(&mut exec, Command::DisplayText("Shutting down..."));

        assert_eq!(run(&mut exec, Command::PowerDown), Outcome::PowerDown);
        assert!(!exec.buzzer().is_enabled());
        assert!(exec.display().is_blank());
    }
}
