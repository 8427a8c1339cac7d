//! Host-side integration tests for the Morse decoder
//!
//! Everything runs against `decoder_core::test_utils::simulator`, which
//! interleaves tick interrupts and main-loop iterations at 1 ms resolution.

#[cfg(test)]
mod threshold_tests;
#[cfg(test)]
mod property_tests;
#[cfg(test)]
mod lcd_bus_tests;
