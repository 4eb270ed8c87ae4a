//! Test doubles shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use sentinel_core::config::AlarmConfig;
use sentinel_core::traits::{CommandLink, Key, Keypad, LinkError, PowerControl};
use sentinel_core::{AlarmController, AlarmSignals, AlarmState};
use sentinel_protocol::Frame;

/// Link that keeps every frame it is asked to send
#[derive(Default)]
pub struct RecordingLink {
    pub frames: Vec<Frame>,
}

impl CommandLink for RecordingLink {
    fn send_frame(&mut self, frame: &Frame) -> Result<(), LinkError> {
        self.frames.push(*frame);
        Ok(())
    }
}

impl RecordingLink {
    /// Frame contents as text, e.g. `"3>Try again:"`
    pub fn texts(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|f| String::from_utf8_lossy(f.content()).into_owned())
            .collect()
    }

    pub fn count(&self, text: &str) -> usize {
        self.texts().iter().filter(|t| *t == text).count()
    }
}

/// Delay that returns at once but remembers the total requested
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ms: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}

#[derive(Default)]
pub struct MockPower {
    pub idles: usize,
    pub power_downs: usize,
}

impl PowerControl for MockPower {
    fn idle(&mut self) {
        self.idles += 1;
    }

    fn power_down(&mut self) {
        self.power_downs += 1;
    }
}

/// One scripted keypad scan
#[derive(Debug, Clone, Copy)]
pub enum Scan {
    /// Report this key
    Press(Key),
    /// Fire one timer interrupt, report nothing
    Tick,
}

/// Keypad that replays a script and fires timer ticks in between
pub struct ScriptedKeypad<'a> {
    signals: &'a AlarmSignals,
    script: VecDeque<Scan>,
}

impl<'a> ScriptedKeypad<'a> {
    pub fn new(signals: &'a AlarmSignals) -> Self {
        Self {
            signals,
            script: VecDeque::new(),
        }
    }

    pub fn press(&mut self, keys: &str) -> &mut Self {
        self.script
            .extend(keys.chars().map(|c| Scan::Press(Key::from_char(c))));
        self
    }

    pub fn ticks(&mut self, count: usize) -> &mut Self {
        self.script.extend(std::iter::repeat(Scan::Tick).take(count));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.script.is_empty()
    }
}

impl Keypad for ScriptedKeypad<'_> {
    fn scan(&mut self) -> Option<Key> {
        match self.script.pop_front() {
            Some(Scan::Press(key)) => Some(key),
            Some(Scan::Tick) => {
                self.signals.on_timer_tick();
                None
            }
            None => panic!("keypad script exhausted"),
        }
    }
}

pub type TestController<'a> =
    AlarmController<'a, &'a mut RecordingLink, &'a mut RecordingDelay, &'a mut MockPower>;

/// Bench of test doubles around one controller
#[derive(Default)]
pub struct Bench {
    pub link: RecordingLink,
    pub delay: RecordingDelay,
    pub power: MockPower,
}

impl Bench {
    pub fn controller<'a>(
        &'a mut self,
        config: AlarmConfig,
        signals: &'a AlarmSignals,
    ) -> TestController<'a> {
        AlarmController::new(
            config,
            signals,
            &mut self.link,
            &mut self.delay,
            &mut self.power,
        )
    }
}

/// Step until `done` holds, with a bound so a broken controller fails fast
pub fn step_until<K: Keypad>(
    controller: &mut TestController<'_>,
    keypad: &mut K,
    mut done: impl FnMut(&TestController<'_>) -> bool,
) {
    for _ in 0..64 {
        if done(controller) {
            return;
        }
        controller.step(keypad).expect("link never fails in tests");
    }
    panic!("condition not reached, state {:?}", controller.state());
}

/// Boot armed, take one motion edge, and open PIN entry
pub fn open_pin_entry(controller: &mut TestController<'_>, signals: &AlarmSignals) {
    let mut idle = ScriptedKeypad::new(signals);
    controller.step(&mut idle).unwrap();
    assert!(signals.on_motion_edge());
    controller.step(&mut idle).unwrap();
    assert_eq!(controller.state(), AlarmState::PinEntry);
}
