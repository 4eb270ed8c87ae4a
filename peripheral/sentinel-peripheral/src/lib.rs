//! Peripheral (slave) unit logic for Sentinel
//!
//! This crate provides:
//! - `DisplayBackend` and `Buzzer` traits for the unit's output hardware
//! - `Screen`, an in-memory 16x2 character buffer
//! - `Executor`, which applies one received frame to the outputs
//!
//! # Architecture
//!
//! The peripheral is a dumb terminal. It never decides anything: each frame
//! from the master maps to exactly one output action, and frames it does
//! not understand are dropped without changing any output.

#![no_std]

pub mod backend;
pub mod executor;
pub mod screen;

// Re-export key types
pub use backend::{Buzzer, DisplayBackend, DisplayError};
pub use executor::{Executor, Outcome};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
