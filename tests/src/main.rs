// Host-side walkthrough of the decoder using the tick simulator

use decoder_core::test_utils::simulator::{Fist, Simulator};
use decoder_core::{validate_table, BoundaryPolicy, DecoderConfig, DecoderEvent, Level, Line};

fn main() {
    println!("🧪 Morse Decoder Host Simulation");

    // Test 1: Decode table consistency
    test_decode_table();

    // Test 2: Keyed text reaches the display
    test_keyed_text();

    // Test 3: Bounce and reset handling
    test_bounce_and_reset();

    // Test 4: Boundary policies with a stalled main loop
    test_boundary_policies();

    println!("✅ All simulation checks passed!");
    println!();
    println!("📝 Run the full suite with: cargo test");
}

/// Check the table has no duplicate or malformed entries
fn test_decode_table() {
    println!("📖 Checking decode table...");
    validate_table().expect("decode table is consistent");
    println!("  ✅ Table entries are unique and well-formed");
}

/// Key a short message and show both display rows
fn test_keyed_text() {
    println!("📡 Keying \"CQ DE\"...");

    let mut sim = Simulator::new(DecoderConfig::default());
    sim.key_text("CQ DE", Fist::default());

    println!("  row 0: [{}]", sim.display.row(0));
    println!("  row 1: [{}]", sim.display.row(1));
    println!("  elapsed: {} ms", sim.now());
    assert_eq!(sim.transcript(), "CQ DE");

    println!("  ✅ Transcript matches keyed text");
}

/// Chatter on press and a reset mid-character
fn test_bounce_and_reset() {
    println!("🔘 Testing bounce filtering and reset...");

    let mut sim = Simulator::new(DecoderConfig::default());
    sim.edge(Line::Primary, Level::Active);
    sim.bounce(8);
    sim.advance(100);
    sim.edge(Line::Primary, Level::Inactive);
    assert_eq!(sim.pending_text(), ".");
    println!("  ✅ 8 bounce edges filtered, one dot recorded");

    sim.idle(100);
    sim.reset_button(80);
    assert!(sim.take_events().contains(&DecoderEvent::Reset));
    assert_eq!(sim.pending_text(), "");
    println!("  row 0 after reset: [{}]", sim.display.row(0));
    println!("  ✅ Reset restores the banner");
}

/// A main loop that stalls through the whole boundary window
fn test_boundary_policies() {
    println!("⏱️  Testing boundary policies...");

    for policy in [BoundaryPolicy::SingleShotWindow, BoundaryPolicy::OpenEnded] {
        let config = DecoderConfig {
            boundary: policy,
            ..DecoderConfig::default()
        };
        let mut sim = Simulator::new(config);
        sim.press(100);
        sim.stall(true);
        sim.idle(3_500);
        sim.stall(false);
        sim.poll();
        println!(
            "  {:?}: transcript [{}], pending [{}]",
            policy,
            sim.transcript(),
            sim.pending_text()
        );
    }

    println!("  ✅ Policies behave as configured");
}
