//! Property tests for the fixed-frame codec.

use proptest::prelude::*;
use sentinel_protocol::{Command, Frame, FrameError, FRAME_SIZE, MAX_PAYLOAD_SIZE};

// Printable ASCII never contains the terminator
fn arb_text(max: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(0x20u8..0x7f, 0..=max)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

proptest! {
    #[test]
    fn text_commands_survive_the_wire(text in arb_text(MAX_PAYLOAD_SIZE), status in any::<bool>()) {
        let command = if status {
            Command::DisplayStatus(&text)
        } else {
            Command::DisplayText(&text)
        };

        let frame = command.to_frame().unwrap();
        prop_assert_eq!(frame.as_bytes().len(), FRAME_SIZE);
        prop_assert_eq!(Command::from_frame(&frame).unwrap(), command);
    }

    #[test]
    fn oversize_payload_is_rejected(extra in 1usize..64, id in 1u8..=6) {
        let payload = vec![b'x'; MAX_PAYLOAD_SIZE + extra];
        prop_assert_eq!(
            Frame::encode(id, Some(&payload)),
            Err(FrameError::PayloadTooLarge)
        );
    }

    #[test]
    fn fill_after_terminator_is_zero(text in arb_text(MAX_PAYLOAD_SIZE)) {
        let frame = Frame::encode(3, Some(text.as_bytes())).unwrap();
        let used = frame.content().len();

        prop_assert_eq!(used, 2 + text.len());
        prop_assert!(frame.as_bytes()[used..].iter().all(|&b| b == 0));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in proptest::collection::vec(any::<u8>(), FRAME_SIZE)) {
        let mut raw = [0u8; FRAME_SIZE];
        raw.copy_from_slice(&bytes);
        let frame = Frame::from_bytes(raw);

        // Either outcome is fine; only the absence of a panic matters
        let _ = Command::from_frame(&frame);
        prop_assert!(frame.content().len() <= FRAME_SIZE);
    }
}
