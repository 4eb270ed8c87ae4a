//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the collaborator
//! traits defined in sentinel-core and sentinel-peripheral:
//!
//! - Frame link over SPI (master transmit, peripheral receive)
//! - 4x4 matrix keypad
//! - HD44780 character LCD (4-bit bus)
//! - Gated PWM tone buzzer

#![no_std]
#![deny(unsafe_code)]

pub mod buzzer;
pub mod keypad;
pub mod lcd;
pub mod link;
