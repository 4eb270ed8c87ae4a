//! Event sources shared between interrupt context and the control loop
//!
//! The motion edge and the grace timer tick run in interrupt context.
//! They never block and never touch the link; they only update the
//! atomics in [`AlarmSignals`], which the control loop polls.
//!
//! Ownership of each field:
//! - `state`: control loop stores; motion edge compare-and-swaps out of
//!   `ArmedWaiting` only
//! - `ticks`, `alarm_due`: timer tick writes; control loop resets
//! - `timer_running`, `grace_ticks`: control loop writes; timer tick reads

use portable_atomic::{AtomicBool, AtomicU8, Ordering};

use crate::state::{AlarmState, Event};

/// Flags and counters shared with interrupt handlers
///
/// `const`-constructible so it can live in a `static`.
pub struct AlarmSignals {
    state: AtomicU8,
    ticks: AtomicU8,
    grace_ticks: AtomicU8,
    timer_running: AtomicBool,
    alarm_due: AtomicBool,
}

impl AlarmSignals {
    pub const fn new(initial: AlarmState, grace_ticks: u8) -> Self {
        Self {
            state: AtomicU8::new(initial as u8),
            ticks: AtomicU8::new(0),
            grace_ticks: AtomicU8::new(grace_ticks),
            timer_running: AtomicBool::new(false),
            alarm_due: AtomicBool::new(false),
        }
    }

    /// Current alarm state
    pub fn state(&self) -> AlarmState {
        // Only valid discriminants are ever stored
        AlarmState::from_u8(self.state.load(Ordering::Acquire)).unwrap_or(AlarmState::PoweredDown)
    }

    /// Store a new state (control loop only)
    pub fn set_state(&self, state: AlarmState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Number of ticks after which the alarm sounds
    pub fn set_grace_ticks(&self, ticks: u8) {
        self.grace_ticks.store(ticks, Ordering::Relaxed);
    }

    pub fn grace_ticks(&self) -> u8 {
        self.grace_ticks.load(Ordering::Relaxed)
    }

    /// Motion sensor edge (interrupt context)
    ///
    /// Returns `true` if the edge moved the machine out of `ArmedWaiting`.
    /// Edges in any other state are ignored.
    pub fn on_motion_edge(&self) -> bool {
        let current = self.state();
        if !current.is_armed() {
            return false;
        }
        let next = current.transition(Event::Motion);
        // Lost race with the control loop: the edge no longer applies
        self.state
            .compare_exchange(current as u8, next as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Periodic timer tick (interrupt context)
    ///
    /// Counts only while the grace timer runs. On reaching the threshold the
    /// timer stops itself, resets its count and raises the alarm signal;
    /// later ticks are no-ops until the timer is started again.
    pub fn on_timer_tick(&self) {
        if !self.timer_running.load(Ordering::Acquire) {
            return;
        }

        let ticks = self.ticks.load(Ordering::Relaxed).saturating_add(1);
        if ticks >= self.grace_ticks() {
            self.timer_running.store(false, Ordering::Release);
            self.ticks.store(0, Ordering::Relaxed);
            self.alarm_due.store(true, Ordering::Release);
        } else {
            self.ticks.store(ticks, Ordering::Release);
        }
    }

    /// Start the grace countdown from zero
    pub fn start_grace_timer(&self) {
        self.ticks.store(0, Ordering::Relaxed);
        self.alarm_due.store(false, Ordering::Relaxed);
        self.timer_running.store(true, Ordering::Release);
    }

    /// Stop the countdown, reset it and drop any pending alarm signal
    pub fn cancel_grace_timer(&self) {
        self.timer_running.store(false, Ordering::Release);
        self.ticks.store(0, Ordering::Relaxed);
        self.alarm_due.store(false, Ordering::Release);
    }

    /// Consume the alarm signal
    pub fn take_alarm_due(&self) -> bool {
        self.alarm_due.swap(false, Ordering::AcqRel)
    }

    pub fn timer_running(&self) -> bool {
        self.timer_running.load(Ordering::Acquire)
    }

    /// Ticks counted since the grace timer started
    pub fn ticks(&self) -> u8 {
        self.ticks.load(Ordering::Acquire)
    }

    /// Whole seconds left before the alarm sounds
    pub fn remaining(&self) -> u8 {
        if self.timer_running() {
            self.grace_ticks().saturating_sub(self.ticks())
        } else {
            0
        }
    }
}
