//! Sentinel Peripheral Firmware
//!
//! Firmware for the peripheral unit (STM32F042K6): receives fixed-size
//! command frames from the master over SPI and drives a 16x2 LCD and a
//! piezo buzzer. Holds no alarm state of its own.

#![no_std]
#![no_main]

mod board;

use cortex_m_rt::entry;
use defmt::*;
use embassy_stm32::gpio::{Level, Output, OutputType, Speed};
use embassy_stm32::time::Hertz;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sentinel_drivers::buzzer::GatedTone;
use sentinel_drivers::lcd::Hd44780;
use sentinel_drivers::link::SpiFrameReceiver;
use sentinel_hal::{Mode, SpiConfig};
use sentinel_peripheral::{DisplayBackend, Executor, Outcome, Screen};

use crate::board::Spi1Slave;

/// Buzzer tone frequency
const TONE_HZ: u32 = 2_000;

#[entry]
fn main() -> ! {
    info!("Sentinel peripheral starting...");

    let p = embassy_stm32::init(Default::default());
    let cp = unwrap!(cortex_m::Peripherals::take());

    // Character LCD
    let lcd = Hd44780::new(
        Output::new(p.PB0, Level::Low, Speed::Low),
        Output::new(p.PB1, Level::Low, Speed::Low),
        [
            Output::new(p.PA0, Level::Low, Speed::Low),
            Output::new(p.PA1, Level::Low, Speed::Low),
            Output::new(p.PA2, Level::Low, Speed::Low),
            Output::new(p.PA3, Level::Low, Speed::Low),
        ],
        Delay,
    );
    let mut lcd = unwrap!(lcd);
    info!("LCD initialized ({} x {})", lcd.dimensions().0, lcd.dimensions().1);

    // Buzzer: fixed tone, gated by duty cycle
    let pwm = SimplePwm::new(
        p.TIM3,
        Some(PwmPin::new(p.PB4, OutputType::PushPull)),
        None,
        None,
        None,
        Hertz::hz(TONE_HZ),
        CountingMode::EdgeAlignedUp,
    );
    let mut channel = pwm.split().ch1;
    channel.enable();
    let buzzer = GatedTone::new(channel);

    // Must match the master's link mode
    let link_config = SpiConfig::with_mode(Mode::Mode0);
    info!("SPI link: {}", link_config.mode());
    let mut receiver = SpiFrameReceiver::new(Spi1Slave::new(&link_config));
    let mut executor = Executor::new(Screen::new(), buzzer);
    info!("Waiting for commands");

    loop {
        let frame = match receiver.receive() {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Receive failed: {}", e);
                continue;
            }
        };

        let outcome = match executor.execute(&frame) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("Display error: {}", e);
                continue;
            }
        };

        if let Err(e) = executor.display_mut().render(&mut lcd) {
            warn!("LCD write failed: {}", e);
        }

        if outcome == Outcome::PowerDown {
            info!("Power down requested");
            board::power_down(cp.SCB);
        }
    }
}
