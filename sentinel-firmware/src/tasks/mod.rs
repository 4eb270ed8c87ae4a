//! Interrupt-priority tasks feeding the control loop

mod motion;
mod tick;

pub use motion::motion_task;
pub use tick::tick_task;
