//! Piezo buzzer on a PWM channel
//!
//! The tone frequency is fixed when the timer is configured; the gate
//! only switches the duty cycle between 0 and 50%.

use core::convert::Infallible;

use embedded_hal::pwm::SetDutyCycle;
use sentinel_peripheral::Buzzer;

/// Buzzer driven by a square wave on a PWM channel
pub struct GatedTone<P> {
    channel: P,
    on: bool,
}

impl<P: SetDutyCycle<Error = Infallible>> GatedTone<P> {
    /// Create a silent buzzer
    pub fn new(channel: P) -> Self {
        let mut tone = Self { channel, on: true };
        tone.set_enabled(false);
        tone
    }
}

impl<P: SetDutyCycle<Error = Infallible>> Buzzer for GatedTone<P> {
    fn set_enabled(&mut self, on: bool) {
        if self.on == on {
            return;
        }
        let result = if on {
            self.channel.set_duty_cycle_percent(50)
        } else {
            self.channel.set_duty_cycle_fully_off()
        };
        result.unwrap_or_else(|e| match e {});
        self.on = on;

        #[cfg(feature = "defmt")]
        defmt::debug!("Buzzer {}", if on { "on" } else { "off" });
    }

    fn is_enabled(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Mock PWM channel recording the duty cycle
    struct MockChannel {
        duty: u16,
        writes: usize,
    }

    impl MockChannel {
        fn new() -> Self {
            Self { duty: 0, writes: 0 }
        }
    }

    impl embedded_hal::pwm::ErrorType for MockChannel {
        type Error = Infallible;
    }

    impl SetDutyCycle for MockChannel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn test_starts_silent() {
        let tone = GatedTone::new(MockChannel::new());
        assert!(!tone.is_enabled());
        assert_eq!(tone.channel.duty, 0);
    }

    #[test]
    fn test_gate_sets_half_duty() {
        let mut tone = GatedTone::new(MockChannel::new());

        tone.set_enabled(true);
        assert!(tone.is_enabled());
        assert_eq!(tone.channel.duty, 500);

        tone.set_enabled(false);
        assert!(!tone.is_enabled());
        assert_eq!(tone.channel.duty, 0);
    }

    #[test]
    fn test_repeated_gate_is_noop() {
        let mut tone = GatedTone::new(MockChannel::new());
        let writes = tone.channel.writes;

        tone.set_enabled(true);
        tone.set_enabled(true);
        assert_eq!(tone.channel.writes, writes + 1);
    }
}
