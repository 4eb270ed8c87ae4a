//! Frame link timing against a peripheral that redraws between frames.
//!
//! Master and peripheral each keep their own clock on a shared wire. The
//! peripheral's receive FIFO holds four bytes; anything arriving while it
//! is full is lost, as on the STM32F0 SPI block.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use sentinel_core::traits::{CommandLink, LinkError};
use sentinel_drivers::link::{SpiCommandLink, SpiFrameReceiver, WaitBound};
use sentinel_hal::{SpiMaster, SpiSlave};
use sentinel_protocol::Command;

/// Peripheral receive FIFO depth in bytes
const RX_FIFO: usize = 4;

/// Time to shift one byte at 1 MHz
const SHIFT_US: u64 = 8;

/// Full 16x2 LCD redraw on the peripheral, SPI unattended
const REDRAW_US: u64 = 3_500;

#[derive(Default)]
struct Wire {
    master_us: u64,
    slave_us: u64,
    /// Bytes on their way, with the slave time they land
    in_flight: VecDeque<(u64, u8)>,
    fifo: VecDeque<u8>,
    overruns: usize,
}

impl Wire {
    fn deliver(&mut self) {
        while let Some(&(at, byte)) = self.in_flight.front() {
            if at > self.slave_us {
                break;
            }
            self.in_flight.pop_front();
            if self.fifo.len() < RX_FIFO {
                self.fifo.push_back(byte);
            } else {
                self.overruns += 1;
            }
        }
    }
}

type Shared = Rc<RefCell<Wire>>;

struct MasterSpi {
    wire: Shared,
    done_at: u64,
}

impl SpiMaster for MasterSpi {
    fn start_transfer(&mut self, byte: u8) {
        let mut wire = self.wire.borrow_mut();
        self.done_at = wire.master_us + SHIFT_US;
        wire.in_flight.push_back((self.done_at, byte));
    }

    fn transfer_complete(&mut self) -> bool {
        self.wire.borrow().master_us >= self.done_at
    }
}

struct MasterClock(Shared);

impl DelayNs for MasterClock {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().master_us += u64::from(ns / 1000);
    }
}

struct Select;

impl ErrorType for Select {
    type Error = Infallible;
}

impl OutputPin for Select {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Each poll of the ready flag costs one microsecond of slave time
struct SlaveSpi(Shared);

impl SpiSlave for SlaveSpi {
    fn byte_received(&mut self) -> bool {
        let mut wire = self.0.borrow_mut();
        wire.slave_us += 1;
        wire.deliver();
        !wire.fifo.is_empty()
    }

    fn read_byte(&mut self) -> u8 {
        self.0.borrow_mut().fifo.pop_front().unwrap_or(0)
    }
}

fn units() -> (
    SpiCommandLink<MasterSpi, Select, MasterClock>,
    SpiFrameReceiver<SlaveSpi>,
    Shared,
) {
    let wire = Shared::default();
    let spi = MasterSpi {
        wire: wire.clone(),
        done_at: 0,
    };
    let link = SpiCommandLink::new(spi, Select, MasterClock(wire.clone()));
    let rx = SpiFrameReceiver::new(SlaveSpi(wire.clone())).with_bound(WaitBound { spins: 1_000 });
    (link, rx, wire)
}

#[test]
fn clear_then_power_down_both_arrive_across_a_redraw() {
    let (mut link, mut rx, wire) = units();
    link.send(Command::DisplayClear).unwrap();
    link.send(Command::PowerDown).unwrap();

    let first = rx.receive().unwrap();
    assert_eq!(Command::from_frame(&first), Ok(Command::DisplayClear));

    wire.borrow_mut().slave_us += REDRAW_US;

    let second = rx.receive().unwrap();
    assert_eq!(Command::from_frame(&second), Ok(Command::PowerDown));
    assert_eq!(wire.borrow().overruns, 0);
}

#[test]
fn text_and_status_pair_arrives_across_a_redraw() {
    let (mut link, mut rx, wire) = units();
    link.send(Command::DisplayText("Enter PIN: 7s")).unwrap();
    link.send(Command::DisplayStatus("**  ")).unwrap();

    let first = rx.receive().unwrap();
    assert_eq!(Command::from_frame(&first), Ok(Command::DisplayText("Enter PIN: 7s")));

    wire.borrow_mut().slave_us += REDRAW_US;

    let second = rx.receive().unwrap();
    assert_eq!(Command::from_frame(&second), Ok(Command::DisplayStatus("**  ")));
}

#[test]
fn without_frame_gap_the_second_frame_overruns() {
    let (link, mut rx, wire) = units();
    let mut link = link.with_frame_gap_us(0);
    link.send(Command::DisplayClear).unwrap();
    link.send(Command::PowerDown).unwrap();

    assert!(rx.receive().is_ok());
    wire.borrow_mut().slave_us += REDRAW_US;

    assert_eq!(rx.receive(), Err(LinkError::Timeout));
    assert!(wire.borrow().overruns > 0);
}
