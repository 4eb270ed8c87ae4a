//! Sentinel - Intrusion Alarm Master Firmware
//!
//! Main firmware binary for the RP2040 master unit. Reads the keypad,
//! watches the PIR sensor, runs the alarm sequence and drives the
//! peripheral unit (LCD + buzzer) over SPI.
//!
//! The control loop is blocking and runs in thread mode. The motion and
//! tick sources run on an interrupt executor so they preempt it.

#![no_std]
#![no_main]

use cortex_m_rt::entry;
use defmt::*;
use embassy_executor::InterruptExecutor;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::interrupt;
use embassy_rp::interrupt::{InterruptExt, Priority};
use embassy_rp::spi::Spi;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use sentinel_core::config::{parse_config, AlarmConfig};
use sentinel_core::{AlarmController, AlarmSignals, AlarmState};
use sentinel_drivers::keypad::MatrixKeypad;
use sentinel_drivers::link::SpiCommandLink;
use sentinel_hal::{Mode, SpiConfig};

mod board;
mod tasks;

use crate::board::{spi_config, Power, Spi0Master};

/// Embedded configuration (compiled into firmware)
/// Edit alarm.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../alarm.toml");

/// State shared between the control loop and the interrupt tasks
pub static SIGNALS: AlarmSignals = AlarmSignals::new(AlarmState::ArmedWaiting, 0);

static EXECUTOR_SOURCES: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SWI_IRQ_1() {
    EXECUTOR_SOURCES.on_interrupt()
}

#[entry]
fn main() -> ! {
    info!("Sentinel master starting...");

    let p = embassy_rp::init(Default::default());
    let cp = unwrap!(cortex_m::Peripherals::take());
    info!("Peripherals initialized");

    let config = load_config();

    // Link to the peripheral unit
    let link_config = SpiConfig::with_mode(Mode::Mode0);
    info!("SPI link: {} at {} Hz", link_config.mode(), link_config.frequency);
    let spi = Spi::new_blocking(p.SPI0, p.PIN_18, p.PIN_19, p.PIN_16, spi_config(&link_config));
    let select = Output::new(p.PIN_17, Level::High);
    let link = SpiCommandLink::new(Spi0Master::new(spi), select, Delay);

    let rows = [
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
        Output::new(p.PIN_5, Level::High),
    ];
    let cols = [
        Input::new(p.PIN_6, Pull::Up),
        Input::new(p.PIN_7, Pull::Up),
        Input::new(p.PIN_8, Pull::Up),
        Input::new(p.PIN_9, Pull::Up),
    ];
    let mut keypad = MatrixKeypad::new(rows, cols, Delay);

    // Puts SIGNALS into the boot state before any source can fire
    let mut controller = AlarmController::new(config, &SIGNALS, link, Delay, Power::new(cp.SCB));

    interrupt::SWI_IRQ_1.set_priority(Priority::P2);
    let spawner = EXECUTOR_SOURCES.start(interrupt::SWI_IRQ_1);
    spawner
        .spawn(tasks::motion_task(Input::new(p.PIN_15, Pull::Down)))
        .unwrap();
    spawner.spawn(tasks::tick_task()).unwrap();

    info!("Sentinel running, state {}", controller.state());

    let mut last = controller.state();
    loop {
        match controller.step(&mut keypad) {
            Ok(state) if state != last => {
                info!("State: {} -> {}", last, state);
                last = state;
            }
            Ok(_) => {}
            Err(e) => warn!("Link error in {}: {}", controller.state(), e),
        }
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> AlarmConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Config: grace {}s, rearm {}s, PIN length {}, boot {}",
                config.grace_seconds,
                config.rearm_seconds,
                config.pin_len(),
                config.boot
            );
            config
        }
        Err(e) => {
            error!("Config parse error: {}, using defaults", e);
            AlarmConfig::default()
        }
    }
}
