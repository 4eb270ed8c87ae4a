//! Board glue for the RP2040 master
//!
//! Pin assignments (Raspberry Pi Pico):
//! - SPI0: SCK=GPIO18, MOSI=GPIO19, MISO=GPIO16, select=GPIO17
//! - Keypad rows GPIO2-5 (outputs), columns GPIO6-9 (inputs, pull-up)
//! - PIR sensor output: GPIO15

use cortex_m::peripheral::SCB;
use embassy_rp::pac;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{self, Blocking, Spi};
use sentinel_core::traits::PowerControl;
use sentinel_hal::spi::{Phase, Polarity};
use sentinel_hal::{SpiConfig, SpiMaster};

/// Convert the link configuration to the embassy driver's
pub fn spi_config(config: &SpiConfig) -> spi::Config {
    let mut out = spi::Config::default();
    out.frequency = config.frequency;
    out.polarity = match config.polarity {
        Polarity::IdleLow => spi::Polarity::IdleLow,
        Polarity::IdleHigh => spi::Polarity::IdleHigh,
    };
    out.phase = match config.phase {
        Phase::CaptureOnFirstTransition => spi::Phase::CaptureOnFirstTransition,
        Phase::CaptureOnSecondTransition => spi::Phase::CaptureOnSecondTransition,
    };
    out
}

/// SPI0 as a byte-at-a-time master
///
/// The embassy driver sets up pins and clock; bytes then go straight
/// through the PL022 data and status registers.
pub struct Spi0Master {
    _driver: Spi<'static, SPI0, Blocking>,
}

impl Spi0Master {
    pub fn new(driver: Spi<'static, SPI0, Blocking>) -> Self {
        Self { _driver: driver }
    }
}

impl SpiMaster for Spi0Master {
    fn start_transfer(&mut self, byte: u8) {
        pac::SPI0.dr().write(|w| w.set_data(byte as u16));
    }

    fn transfer_complete(&mut self) -> bool {
        let sr = pac::SPI0.sr().read();
        if sr.bsy() || !sr.rne() {
            return false;
        }
        // Drain the byte clocked in so the receive FIFO never overruns
        let _ = pac::SPI0.dr().read();
        true
    }
}

/// Sleep control for the control loop
pub struct Power {
    scb: SCB,
}

impl Power {
    pub fn new(scb: SCB) -> Self {
        Self { scb }
    }
}

impl PowerControl for Power {
    fn idle(&mut self) {
        cortex_m::asm::wfi();
    }

    fn power_down(&mut self) {
        defmt::info!("Entering deep sleep");
        cortex_m::interrupt::disable();
        self.scb.set_sleepdeep();
        loop {
            cortex_m::asm::wfi();
        }
    }
}
