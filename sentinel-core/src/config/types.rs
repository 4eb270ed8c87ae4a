//! Configuration type definitions

use heapless::String;

use crate::state::AlarmState;

/// Longest PIN secret accepted
pub const MAX_PIN_LEN: usize = 8;

/// Factory PIN
pub const DEFAULT_PIN: &str = "1234";

/// State the master boots into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootPolicy {
    /// Start armed, waiting for motion
    #[default]
    Armed,
    /// Start in the rearm menu so the user confirms before arming
    Rearm,
}

impl BootPolicy {
    /// Initial alarm state for this policy
    pub fn initial_state(&self) -> AlarmState {
        match self {
            BootPolicy::Armed => AlarmState::ArmedWaiting,
            BootPolicy::Rearm => AlarmState::Rearming,
        }
    }
}

/// Pauses between user-visible notices, in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timings {
    /// "Motion Detected!" before the PIN prompt
    pub motion_notice_ms: u32,
    /// "Alarm triggered" before PIN entry resumes
    pub alarm_notice_ms: u32,
    /// "Correct PIN" before disarming
    pub pin_accepted_ms: u32,
    /// "Alarm disarmed" before the rearm menu
    pub disarmed_notice_ms: u32,
    /// "Rearming in:" before the countdown starts
    pub rearm_settle_ms: u32,
    /// "Shutting down..." before the peripheral is powered down
    pub shutdown_notice_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            motion_notice_ms: 3000,
            alarm_notice_ms: 5000,
            pin_accepted_ms: 4000,
            disarmed_notice_ms: 5000,
            rearm_settle_ms: 100,
            shutdown_notice_ms: 2000,
        }
    }
}

/// Master unit configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AlarmConfig {
    /// PIN secret, ASCII digits only
    pub pin: String<MAX_PIN_LEN>,
    /// Seconds between motion and the alarm sounding
    pub grace_seconds: u8,
    /// Seconds to leave the area after choosing to arm
    pub rearm_seconds: u8,
    /// State entered at power-on
    pub boot: BootPolicy,
    /// Notice pauses
    pub timings: Timings,
}

impl Default for AlarmConfig {
    fn default() -> Self {
        let mut pin = String::new();
        // DEFAULT_PIN is shorter than MAX_PIN_LEN
        let _ = pin.push_str(DEFAULT_PIN);

        Self {
            pin,
            grace_seconds: 10,
            rearm_seconds: 5,
            boot: BootPolicy::Armed,
            timings: Timings::default(),
        }
    }
}

/// Configuration rejected by [`AlarmConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// PIN is empty
    EmptyPin,
    /// PIN contains something other than `0`-`9`
    PinNotNumeric,
    /// Grace period of zero seconds would sound the alarm immediately
    ZeroGrace,
}

impl AlarmConfig {
    /// Check the invariants the controller relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pin.is_empty() {
            return Err(ConfigError::EmptyPin);
        }
        if !self.pin.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::PinNotNumeric);
        }
        if self.grace_seconds == 0 {
            return Err(ConfigError::ZeroGrace);
        }
        Ok(())
    }

    /// Number of digits the PIN buffer accepts
    pub fn pin_len(&self) -> usize {
        self.pin.len()
    }
}
