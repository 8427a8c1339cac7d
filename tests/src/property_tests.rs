//! Property tests over arbitrary keying

use proptest::prelude::*;
use decoder_core::hal::BANNER;
use decoder_core::test_utils::simulator::{Fist, Simulator};
use decoder_core::{DecoderConfig, DecoderEvent, Symbol, TRANSCRIPT_CAPACITY};

const KEYABLE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn keyable_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::sample::select(KEYABLE.chars().collect::<Vec<_>>()), 1..8)
        .prop_map(|chars| chars.into_iter().collect())
}

/// (held, idle) pairs, both beyond the debounce window
fn keying() -> impl Strategy<Value = Vec<(u32, u32)>> {
    proptest::collection::vec((60u32..800, 60u32..4_000), 0..24)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn classification_follows_dot_threshold(held in 0u32..10_000) {
        let config = DecoderConfig::default();
        let expected = if held < config.dot_threshold { Symbol::Dot } else { Symbol::Dash };
        prop_assert_eq!(config.classify(held), expected);
    }

    #[test]
    fn keyed_text_round_trips(text in keyable_text()) {
        let mut sim = Simulator::new(DecoderConfig::default());
        sim.key_text(&text, Fist::default());
        prop_assert_eq!(sim.transcript(), text.as_str());
        let pending = sim.pending_text();
        prop_assert_eq!(pending.as_str(), "");
    }

    #[test]
    fn transcript_spacing_is_well_formed(presses in keying()) {
        let mut sim = Simulator::new(DecoderConfig::default());
        for (held, idle) in presses {
            sim.press(held);
            sim.idle(idle);
        }
        let transcript = sim.transcript();
        prop_assert!(!transcript.starts_with(' '));
        prop_assert!(!transcript.contains("  "));
        prop_assert!(transcript.len() <= TRANSCRIPT_CAPACITY);
    }

    #[test]
    fn reset_always_returns_to_banner(presses in keying()) {
        let mut sim = Simulator::new(DecoderConfig::default());
        for (held, idle) in presses {
            sim.press(held);
            sim.idle(idle);
        }
        sim.take_events();
        sim.reset_button(100);

        prop_assert!(sim.take_events().contains(&DecoderEvent::Reset));
        prop_assert_eq!(sim.transcript(), "");
        let pending = sim.pending_text();
        prop_assert_eq!(pending.as_str(), "");
        prop_assert_eq!(sim.display.row_text(0), BANNER);
        prop_assert_eq!(sim.display.row_text(1), "");
    }
}
