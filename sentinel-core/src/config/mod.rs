//! Alarm configuration
//!
//! Types with the factory defaults, plus a small parser for the
//! `alarm.toml` embedded in the master firmware.

pub mod parse;
pub mod types;

pub use parse::{parse_config, ParseError};
pub use types::*;
