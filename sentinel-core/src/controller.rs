//! Alarm controller
//!
//! Runs on the master's control loop. Each call to [`AlarmController::step`]
//! performs the work for the current state: notices on the peripheral,
//! pauses, grace timer control, and at most one user input. The state
//! itself lives in [`AlarmSignals`] so the motion interrupt can change it.
//!
//! Blocking points are the notice pauses, the keypad poll and the link
//! transfer; interrupt sources keep running underneath all of them.

use core::fmt::{self, Write};

use embedded_hal::delay::DelayNs;
use heapless::String;
use sentinel_protocol::Command;

use crate::config::AlarmConfig;
use crate::pin::PinBuffer;
use crate::sources::AlarmSignals;
use crate::state::{AlarmState, Event};
use crate::traits::{CommandLink, Key, Keypad, LinkError, PowerControl};

/// Rearm countdown step
const SECOND_MS: u32 = 1000;

/// Formatted notice text; longer than a display row so nothing is cut here
type Line = String<24>;

/// One input for the PIN entry state, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Grace period elapsed: sound the alarm
    AlarmDue,
    /// Grace timer advanced by one second
    GraceTick { remaining: u8 },
    /// Key pressed
    Key(Key),
}

/// Master-side alarm sequencer
pub struct AlarmController<'a, L, D, P> {
    config: AlarmConfig,
    signals: &'a AlarmSignals,
    link: L,
    delay: D,
    power: P,
    pin: PinBuffer,
    /// Buzzer-on has been sent for the current episode
    sounding: bool,
    /// State whose entry notices have been shown
    announced: Option<AlarmState>,
    /// Tick count last shown to the user
    seen_ticks: u8,
}

impl<'a, L, D, P> AlarmController<'a, L, D, P>
where
    L: CommandLink,
    D: DelayNs,
    P: PowerControl,
{
    /// Create a controller and put `signals` into the boot state
    pub fn new(
        config: AlarmConfig,
        signals: &'a AlarmSignals,
        link: L,
        delay: D,
        power: P,
    ) -> Self {
        signals.cancel_grace_timer();
        signals.set_grace_ticks(config.grace_seconds);
        signals.set_state(config.boot.initial_state());

        let pin = PinBuffer::new(config.pin_len());

        Self {
            config,
            signals,
            link,
            delay,
            power,
            pin,
            sounding: false,
            announced: None,
            seen_ticks: 0,
        }
    }

    pub fn state(&self) -> AlarmState {
        self.signals.state()
    }

    pub fn pin(&self) -> &PinBuffer {
        &self.pin
    }

    /// Whether the buzzer is on for the current episode
    pub fn is_sounding(&self) -> bool {
        self.sounding
    }

    /// Run one unit of work for the current state
    ///
    /// Returns the state after the work. On a link error the state reached
    /// so far is kept and the next call repeats that state's entry notices.
    pub fn step<K: Keypad>(&mut self, keypad: &mut K) -> Result<AlarmState, LinkError> {
        match self.signals.state() {
            AlarmState::ArmedWaiting => self.wait_for_motion()?,
            AlarmState::MotionDetected => self.notify_motion()?,
            AlarmState::PinEntry => {
                if self.announced != Some(AlarmState::PinEntry) {
                    self.prompt()?;
                    self.announced = Some(AlarmState::PinEntry);
                }
                let input = self.next_input(keypad);
                self.handle(input)?;
            }
            AlarmState::Disarmed => self.notify_disarmed()?,
            AlarmState::Rearming => self.rearm_menu(keypad)?,
            AlarmState::PoweredDown => self.power.power_down(),
        }
        Ok(self.signals.state())
    }

    /// Block until the alarm signal, a grace tick, or a key press
    ///
    /// Interrupt flags are checked before the keypad on every pass, so a
    /// due alarm always wins over a key pressed at the same moment.
    pub fn next_input<K: Keypad>(&mut self, keypad: &mut K) -> Input {
        loop {
            if self.signals.take_alarm_due() {
                return Input::AlarmDue;
            }

            let ticks = self.signals.ticks();
            if ticks != self.seen_ticks {
                self.seen_ticks = ticks;
                if self.signals.timer_running() {
                    return Input::GraceTick {
                        remaining: self.signals.remaining(),
                    };
                }
            }

            if let Some(key) = keypad.scan() {
                return Input::Key(key);
            }
        }
    }

    /// Apply one input while PIN entry is open
    pub fn handle(&mut self, input: Input) -> Result<(), LinkError> {
        if !self.signals.state().is_alert() {
            return Ok(());
        }

        match input {
            Input::AlarmDue => self.sound_alarm(),
            // Countdown is no longer meaningful once the buzzer is on
            Input::GraceTick { .. } if self.sounding => Ok(()),
            Input::GraceTick { remaining } => self.show_countdown(remaining),
            Input::Key(key) => self.handle_key(key),
        }
    }

    fn wait_for_motion(&mut self) -> Result<(), LinkError> {
        if self.announced != Some(AlarmState::ArmedWaiting) {
            self.send(Command::DisplayText("I'm Waiting!!!"))?;
            self.announced = Some(AlarmState::ArmedWaiting);
        }

        // Motion may have fired while the notice was going out
        if self.signals.state().is_armed() {
            self.power.idle();
        }
        Ok(())
    }

    fn notify_motion(&mut self) -> Result<(), LinkError> {
        #[cfg(feature = "defmt")]
        defmt::info!("Motion detected");

        self.sounding = false;
        self.pin.clear();

        let hint = line(format_args!("Give pin in {}s", self.config.grace_seconds));
        self.send(Command::DisplayText("Motion Detected!"))?;
        self.send(Command::DisplayStatus(&hint))?;

        self.signals.start_grace_timer();
        self.delay.delay_ms(self.config.timings.motion_notice_ms);

        self.enter(AlarmState::MotionDetected.transition(Event::EntryPrompted));
        Ok(())
    }

    /// Header for the current phase plus the masked indicator
    fn prompt(&mut self) -> Result<(), LinkError> {
        self.seen_ticks = self.signals.ticks();

        if self.sounding || !self.signals.timer_running() {
            self.send(Command::DisplayText("Enter PIN:"))?;
            self.send_mask()
        } else {
            self.show_countdown(self.signals.remaining())
        }
    }

    fn show_countdown(&mut self, remaining: u8) -> Result<(), LinkError> {
        let header = line(format_args!("Enter PIN: {}s", remaining));
        self.send(Command::DisplayText(&header))?;
        self.send_mask()
    }

    fn send_mask(&mut self) -> Result<(), LinkError> {
        let mask = self.pin.mask();
        self.send(Command::DisplayStatus(&mask))
    }

    fn sound_alarm(&mut self) -> Result<(), LinkError> {
        if self.sounding {
            return Ok(());
        }
        let state = self.signals.state();
        self.enter(state.transition(Event::GraceElapsed));

        #[cfg(feature = "defmt")]
        defmt::warn!("Grace period elapsed, sounding alarm");

        self.send(Command::BuzzerOn)?;
        self.sounding = true;

        self.send(Command::DisplayText("Alarm triggered"))?;
        self.delay.delay_ms(self.config.timings.alarm_notice_ms);

        self.send(Command::DisplayText("Enter PIN:"))?;
        self.send_mask()
    }

    fn handle_key(&mut self, key: Key) -> Result<(), LinkError> {
        match key {
            Key::Digit(digit) => match self.pin.push(digit) {
                Ok(()) => self.send_mask(),
                // Full buffer: further digits are dropped
                Err(_) => Ok(()),
            },
            Key::Backspace => match self.pin.pop() {
                Some(_) => self.send_mask(),
                None => Ok(()),
            },
            Key::Ok => self.submit_pin(),
            _ => Ok(()),
        }
    }

    fn submit_pin(&mut self) -> Result<(), LinkError> {
        let state = self.signals.state();
        let accepted = self.pin.matches(self.config.pin.as_bytes());
        self.pin.clear();

        if accepted {
            self.signals.cancel_grace_timer();
            self.enter(state.transition(Event::PinAccepted));

            self.send(Command::DisplayText("Correct PIN"))?;
            self.delay.delay_ms(self.config.timings.pin_accepted_ms);
        } else {
            #[cfg(feature = "defmt")]
            defmt::info!("Wrong PIN");

            self.enter(state.transition(Event::PinRejected));
            self.send(Command::DisplayText("Try again:"))?;
        }
        Ok(())
    }

    fn notify_disarmed(&mut self) -> Result<(), LinkError> {
        self.send(Command::BuzzerOff)?;
        self.sounding = false;

        self.send(Command::DisplayText("Alarm disarmed"))?;
        self.delay.delay_ms(self.config.timings.disarmed_notice_ms);

        self.enter(AlarmState::Disarmed.transition(Event::DisarmNoticed));
        Ok(())
    }

    fn rearm_menu<K: Keypad>(&mut self, keypad: &mut K) -> Result<(), LinkError> {
        if self.announced != Some(AlarmState::Rearming) {
            self.send(Command::DisplayText("Arm alarm?"))?;
            self.send(Command::DisplayStatus("A arm B shutdown"))?;
            self.announced = Some(AlarmState::Rearming);
        }

        match keypad.read_key() {
            Key::Arm => {
                self.send(Command::DisplayText("Rearming in:"))?;
                self.delay.delay_ms(self.config.timings.rearm_settle_ms);

                for n in (1..=self.config.rearm_seconds).rev() {
                    let count = line(format_args!("{}s", n));
                    self.send(Command::DisplayStatus(&count))?;
                    self.delay.delay_ms(SECOND_MS);
                }

                self.enter(AlarmState::Rearming.transition(Event::ArmSelected));
            }
            Key::PowerOff => {
                self.send(Command::DisplayText("Shutting down..."))?;
                self.delay.delay_ms(self.config.timings.shutdown_notice_ms);
                self.send(Command::DisplayClear)?;
                self.send(Command::PowerDown)?;

                self.enter(AlarmState::Rearming.transition(Event::PowerDownSelected));
                self.power.power_down();
            }
            _ => {}
        }
        Ok(())
    }

    /// Store a new state; entry notices run on the next step
    fn enter(&mut self, next: AlarmState) {
        let prev = self.signals.state();
        if next == prev {
            return;
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("State: {} -> {}", prev, next);

        self.signals.set_state(next);
        self.announced = None;
    }

    fn send(&mut self, command: Command<'_>) -> Result<(), LinkError> {
        #[cfg(feature = "defmt")]
        defmt::trace!("Send {}", command);

        self.link.send(command)
    }
}

fn line(args: fmt::Arguments<'_>) -> Line {
    let mut text = Line::new();
    // Every notice fits; overflow would only shorten the text
    let _ = text.write_fmt(args);
    text
}
