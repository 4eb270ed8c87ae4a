//! Master → Peripheral Command Protocol
//!
//! This crate defines the command frames the master unit clocks over the
//! synchronous link to the peripheral unit (LCD + buzzer). The protocol is
//! deliberately tiny: one direction, one fixed-size frame per command.
//!
//! # Protocol Overview
//!
//! Every command occupies exactly one frame of [`FRAME_SIZE`] bytes:
//! ```text
//! ┌────────────┬───────────┬──────────────┬─────┬───────────────┐
//! │ ID (ASCII) │ DELIMITER │ PAYLOAD      │ NUL │ ZERO FILL     │
//! │ 1-3B       │ '>' opt.  │ 0-37B opt.   │ 1B  │ up to 40B     │
//! └────────────┴───────────┴──────────────┴─────┴───────────────┘
//! ```
//!
//! There is no length prefix, checksum, or acknowledgement. The peripheral
//! is a "dumb terminal": all security decisions remain on the master.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;

pub use frame::{Frame, FrameError, DELIMITER, FRAME_SIZE, MAX_PAYLOAD_SIZE};
pub use messages::{Command, CommandKind};
