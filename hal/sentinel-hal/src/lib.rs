//! Sentinel Hardware Abstraction Layer
//!
//! This crate defines the byte-level link traits that chip-specific code
//! implements on each unit. The frame link drivers in `sentinel-drivers`
//! are written against these traits only.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────┐     ┌──────────────────────────────┐
//! │ sentinel-firmware (RP2040)   │     │ sentinel-peripheral-fw (F042)│
//! └──────────────────────────────┘     └──────────────────────────────┘
//!               │                                    │
//!               ▼                                    ▼
//! ┌──────────────────────────────┐     ┌──────────────────────────────┐
//! │ SpiCommandLink<SpiMaster>    │ ──▶ │ SpiFrameReceiver<SpiSlave>   │
//! └──────────────────────────────┘     └──────────────────────────────┘
//!               │                                    │
//!               └──────────────┬─────────────────────┘
//!                              ▼
//!             ┌──────────────────────────────────┐
//!             │  sentinel-hal (this crate)       │
//!             └──────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`spi::SpiMaster`] - Byte-at-a-time transmit with completion polling
//! - [`spi::SpiSlave`] - Byte-ready polling on the receiving unit

#![no_std]
#![deny(unsafe_code)]

pub mod spi;

pub use spi::{Mode, Phase, Polarity, SpiConfig, SpiMaster, SpiSlave};
