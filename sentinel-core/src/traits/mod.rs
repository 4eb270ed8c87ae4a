//! Collaborator traits
//!
//! These traits define the interface between the alarm logic and the
//! hardware-specific implementations in `sentinel-drivers` and the
//! firmware crates.

pub mod keypad;
pub mod link;
pub mod power;

pub use keypad::{Key, Keypad};
pub use link::{CommandLink, LinkError};
pub use power::PowerControl;
