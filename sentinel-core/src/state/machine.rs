//! State machine definition
//!
//! Every command the master sends is a function of the current state
//! and an event.

use super::events::Event;

/// Alarm states
///
/// Stored as a `u8` in [`AlarmSignals`](crate::sources::AlarmSignals) so the
/// motion interrupt can move the machine out of `ArmedWaiting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum AlarmState {
    /// Sensor armed, CPU idle until motion
    ArmedWaiting = 0,
    /// Motion seen, grace countdown starting
    MotionDetected = 1,
    /// Collecting PIN digits while the grace (or alarm) timer runs
    PinEntry = 2,
    /// Correct PIN entered; buzzer silenced
    Disarmed = 3,
    /// Waiting for the user to arm again or shut down
    Rearming = 4,
    /// Lowest-power sleep; only a hardware reset leaves this state
    PoweredDown = 5,
}

impl AlarmState {
    /// Decode a stored state, `None` for out-of-range values
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AlarmState::ArmedWaiting),
            1 => Some(AlarmState::MotionDetected),
            2 => Some(AlarmState::PinEntry),
            3 => Some(AlarmState::Disarmed),
            4 => Some(AlarmState::Rearming),
            5 => Some(AlarmState::PoweredDown),
            _ => None,
        }
    }

    /// Check if the motion sensor can trigger from this state
    pub fn is_armed(&self) -> bool {
        matches!(self, AlarmState::ArmedWaiting)
    }

    /// Check if the grace or alarm timer may be running
    pub fn is_alert(&self) -> bool {
        matches!(self, AlarmState::MotionDetected | AlarmState::PinEntry)
    }

    /// Check if this state can never be left programmatically
    pub fn is_terminal(&self) -> bool {
        matches!(self, AlarmState::PoweredDown)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use AlarmState::*;
        use Event::*;

        match (self, event) {
            (ArmedWaiting, Motion) => MotionDetected,

            // Alarm phase does not change state; PIN entry stays open
            (MotionDetected, GraceElapsed) => MotionDetected,
            (MotionDetected, EntryPrompted) => PinEntry,
            (MotionDetected, PinAccepted) => Disarmed,

            (PinEntry, GraceElapsed) => PinEntry,
            (PinEntry, PinAccepted) => Disarmed,
            (PinEntry, PinRejected) => PinEntry,

            (Disarmed, DisarmNoticed) => Rearming,

            (Rearming, ArmSelected) => ArmedWaiting,
            (Rearming, PowerDownSelected) => PoweredDown,

            // PoweredDown absorbs everything; other pairs are ignored
            _ => self,
        }
    }
}
