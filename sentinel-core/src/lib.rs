//! Board-agnostic alarm logic for the master unit
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Alarm state machine and the controller that sequences it
//! - PIN entry buffer
//! - Interrupt-shared event signals (motion edge, grace timer)
//! - Collaborator traits (command link, keypad, power)
//! - Configuration types and parser

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod pin;
pub mod sources;
pub mod state;
pub mod traits;

pub use controller::{AlarmController, Input};
pub use sources::AlarmSignals;
pub use state::{AlarmState, Event};
