//! Board glue for the STM32F042K6 peripheral
//!
//! Pin assignments (Nucleo-32):
//! - SPI1 slave: NSS=PA4, SCK=PA5, MISO=PA6, MOSI=PA7 (AF0)
//! - LCD: RS=PB0, EN=PB1, D4-D7=PA0-PA3
//! - Buzzer: TIM3_CH1 on PB4

use cortex_m::peripheral::SCB;
use embassy_stm32::pac;
use embassy_stm32::pac::gpio::vals::Moder;
use embassy_stm32::pac::spi::vals;
use sentinel_hal::spi::{Phase, Polarity};
use sentinel_hal::{SpiConfig, SpiSlave};

/// SPI1 pins, all on port A
const SPI_PINS: [usize; 4] = [4, 5, 6, 7];

/// SPI1 in slave mode with hardware NSS
///
/// embassy-stm32 only drives SPI as a master, so the slave side is set
/// up on the registers directly.
pub struct Spi1Slave {
    _private: (),
}

impl Spi1Slave {
    /// Configure SPI1 and its pins; GPIO clocks are enabled by `embassy_stm32::init`
    pub fn new(config: &SpiConfig) -> Self {
        pac::RCC.apb2enr().modify(|w| w.set_spi1en(true));

        pac::GPIOA.moder().modify(|w| {
            for pin in SPI_PINS {
                w.set_moder(pin, Moder::ALTERNATE);
            }
        });
        pac::GPIOA.afr(0).modify(|w| {
            for pin in SPI_PINS {
                w.set_afr(pin, 0);
            }
        });

        let spi = pac::SPI1;
        spi.cr1().write(|w| {
            w.set_mstr(vals::Mstr::SLAVE);
            w.set_ssm(false);
            w.set_cpol(match config.polarity {
                Polarity::IdleLow => vals::Cpol::IDLE_LOW,
                Polarity::IdleHigh => vals::Cpol::IDLE_HIGH,
            });
            w.set_cpha(match config.phase {
                Phase::CaptureOnFirstTransition => vals::Cpha::FIRST_EDGE,
                Phase::CaptureOnSecondTransition => vals::Cpha::SECOND_EDGE,
            });
        });
        spi.cr2().write(|w| {
            w.set_ds(vals::Ds::BITS8);
            // RXNE on every byte
            w.set_frxth(vals::Frxth::QUARTER);
        });
        spi.cr1().modify(|w| w.set_spe(true));

        Self { _private: () }
    }
}

impl SpiSlave for Spi1Slave {
    fn byte_received(&mut self) -> bool {
        pac::SPI1.sr().read().rxne()
    }

    fn read_byte(&mut self) -> u8 {
        // 8-bit access pops exactly one byte from the receive FIFO
        unsafe { core::ptr::read_volatile(pac::SPI1.dr().as_ptr() as *const u8) }
    }
}

/// Enter Stop mode with interrupts masked; only a reset leaves it
pub fn power_down(mut scb: SCB) -> ! {
    pac::RCC.apb1enr().modify(|w| w.set_pwren(true));
    pac::PWR.cr().modify(|w| {
        w.set_pdds(pac::pwr::vals::Pdds::STOP_MODE);
        w.set_lpds(true);
    });

    cortex_m::interrupt::disable();
    scb.set_sleepdeep();
    loop {
        cortex_m::asm::wfi();
    }
}
