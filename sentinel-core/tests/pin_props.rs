//! Property tests for PIN entry.

mod common;

use common::{open_pin_entry, step_until, Bench, ScriptedKeypad};
use proptest::prelude::*;
use sentinel_core::config::{AlarmConfig, MAX_PIN_LEN};
use sentinel_core::pin::PinBuffer;
use sentinel_core::{AlarmSignals, AlarmState};

#[derive(Debug, Clone, Copy)]
enum Edit {
    Digit(u8),
    Backspace,
}

fn arb_edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => (b'0'..=b'9').prop_map(Edit::Digit),
        1 => Just(Edit::Backspace),
    ]
}

fn arb_digits(max: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(b'0'..=b'9', 0..=max)
        .prop_map(|digits| digits.into_iter().map(char::from).collect())
}

proptest! {
    #[test]
    fn length_counts_accepted_digits(
        capacity in 1usize..=MAX_PIN_LEN,
        digits in proptest::collection::vec(b'0'..=b'9', 0..=20),
    ) {
        let mut pin = PinBuffer::new(capacity);
        let accepted = digits.iter().filter(|d| pin.push(**d).is_ok()).count();

        prop_assert_eq!(pin.len(), accepted);
        prop_assert_eq!(pin.len(), digits.len().min(capacity));
    }

    #[test]
    fn edits_follow_a_bounded_stack(
        capacity in 1usize..=MAX_PIN_LEN,
        edits in proptest::collection::vec(arb_edit(), 0..40),
    ) {
        let mut pin = PinBuffer::new(capacity);
        let mut model: Vec<u8> = Vec::new();

        for edit in edits {
            match edit {
                Edit::Digit(d) => {
                    let _ = pin.push(d);
                    if model.len() < capacity {
                        model.push(d);
                    }
                }
                Edit::Backspace => {
                    prop_assert_eq!(pin.pop(), model.pop());
                }
            }
            prop_assert!(pin.len() <= capacity);
            prop_assert_eq!(pin.mask().len(), capacity);
        }

        prop_assert!(pin.matches(&model));
    }

    #[test]
    fn correct_pin_disarms_however_composed(noise in arb_digits(3), split in 0usize..=4) {
        let signals = AlarmSignals::new(AlarmState::ArmedWaiting, 0);
        let mut bench = Bench::default();
        let mut controller = bench.controller(AlarmConfig::default(), &signals);
        open_pin_entry(&mut controller, &signals);

        // Type part of the PIN, some wrong digits, erase them, then finish
        let (head, tail) = "1234".split_at(split);
        let noise: String = noise.chars().take(4 - head.len()).collect();
        let erase = "*".repeat(noise.len());

        let mut keypad = ScriptedKeypad::new(&signals);
        keypad.press(head).press(&noise).press(&erase).press(tail).press("#");
        step_until(&mut controller, &mut keypad, |c| c.state() == AlarmState::Disarmed);

        prop_assert!(controller.pin().is_empty());
        prop_assert!(keypad.is_empty());
    }

    #[test]
    fn wrong_pin_asks_again(entry in arb_digits(4)) {
        prop_assume!(entry != "1234");

        let signals = AlarmSignals::new(AlarmState::ArmedWaiting, 0);
        let mut bench = Bench::default();
        let mut controller = bench.controller(AlarmConfig::default(), &signals);
        open_pin_entry(&mut controller, &signals);

        let mut keypad = ScriptedKeypad::new(&signals);
        keypad.press(&entry).press("#");
        while !keypad.is_empty() {
            controller.step(&mut keypad).unwrap();
        }

        prop_assert_eq!(controller.state(), AlarmState::PinEntry);
        prop_assert!(controller.pin().is_empty());
        prop_assert!(signals.timer_running());
        drop(controller);

        let texts = bench.link.texts();
        prop_assert_eq!(texts.last().map(String::as_str), Some("3>Try again:"));
    }
}
