//! Parameterised threshold and table checks

use rstest::rstest;
use decoder_core::test_utils::simulator::Simulator;
use heapless::Vec;
use decoder_core::{decode, encode, BoundaryPolicy, DecoderConfig, DecoderEvent, Symbol, PENDING_CAPACITY};

/// Pattern as the decoder would hold it; longer patterns are cut at capacity
fn symbols(pattern: &str) -> Vec<Symbol, PENDING_CAPACITY> {
    pattern.chars().filter_map(Symbol::from_char).take(PENDING_CAPACITY).collect()
}

#[rstest]
#[case(60, Symbol::Dot)]
#[case(120, Symbol::Dot)]
#[case(299, Symbol::Dot)]
#[case(300, Symbol::Dash)]
#[case(450, Symbol::Dash)]
#[case(2_500, Symbol::Dash)]
fn press_duration_classifies(#[case] held: u32, #[case] expected: Symbol) {
    let mut sim = Simulator::new(DecoderConfig::default());
    sim.press(held);
    assert_eq!(sim.take_events(), [DecoderEvent::SymbolAdded(expected)]);
}

#[rstest]
#[case(999, "", ".")]
#[case(1_000, "E", "")]
#[case(2_999, "E", "")]
fn idle_after_dot(#[case] idle: u32, #[case] transcript: &str, #[case] pending: &str) {
    let mut sim = Simulator::new(DecoderConfig::default());
    sim.press(100);
    sim.idle(idle);
    assert_eq!(sim.transcript(), transcript);
    assert_eq!(sim.pending_text(), pending);
}

#[rstest]
#[case(BoundaryPolicy::SingleShotWindow, 999, false)]
#[case(BoundaryPolicy::SingleShotWindow, 1_000, true)]
#[case(BoundaryPolicy::SingleShotWindow, 2_999, true)]
#[case(BoundaryPolicy::SingleShotWindow, 3_000, false)]
#[case(BoundaryPolicy::OpenEnded, 3_000, true)]
#[case(BoundaryPolicy::OpenEnded, u32::MAX, true)]
fn boundary_window(#[case] policy: BoundaryPolicy, #[case] idle: u32, #[case] expected: bool) {
    let config = DecoderConfig {
        boundary: policy,
        ..DecoderConfig::default()
    };
    assert_eq!(config.is_boundary(idle), expected);
}

#[rstest]
#[case(0, 1000, 3000, 10)]
#[case(1000, 1000, 3000, 10)]
#[case(300, 3000, 3000, 10)]
#[case(300, 1000, 3000, 300)]
fn invalid_configs_are_rejected(
    #[case] dot: u32,
    #[case] next_char: u32,
    #[case] space: u32,
    #[case] debounce: u16,
) {
    assert!(DecoderConfig::new(dot, next_char, space, debounce, BoundaryPolicy::SingleShotWindow).is_err());
}

#[rstest]
#[case(".-", Some('A'))]
#[case("-----", Some('0'))]
#[case("..--..", Some('?'))]
#[case(".--.-.", Some('@'))]
#[case("...---...", None)]
#[case(".-.-.-.-", None)]
#[case("", None)]
#[case("................", None)]
fn table_lookup(#[case] pattern: &str, #[case] expected: Option<char>) {
    assert_eq!(decode(&symbols(pattern)), expected);
}

#[rstest]
#[case('s', Some("..."))]
#[case('Q', Some("--.-"))]
#[case('#', None)]
fn table_encode(#[case] letter: char, #[case] expected: Option<&str>) {
    assert_eq!(encode(letter), expected);
}
