//! Alarm state machine
//!
//! The machine is explicit, finite, and deterministic. Side effects
//! (commands, pauses, timer control) live in the controller; this module
//! only answers "which state comes next".

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::AlarmState;
