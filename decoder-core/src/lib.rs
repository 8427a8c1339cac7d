#![cfg_attr(not(any(test, feature = "std")), no_std)]

//! # Decoder Core
//!
//! Straight-key Morse decoder logic for embedded systems.
//! Turns button hold and idle durations, counted by a 1 kHz tick, into
//! dots, dashes and decoded text on a 16x2 character display.

pub mod types;
pub mod table;
pub mod timing;
pub mod input;
pub mod buffer;
pub mod decoder;
pub mod hal;
pub mod lcd;

#[cfg(feature = "test-utils")]
pub mod test_utils;


pub use types::*;
pub use table::{decode, encode, validate_table, TableError, MORSE_TABLE};
pub use timing::TimingState;
pub use input::{ButtonInput, EventFlags};
pub use buffer::{PendingCode, Transcript};
pub use decoder::{MorseDecoder, PollEvents, POLL_STEPS};
pub use hal::{ActiveLowButton, DisplaySink, HalError, InputButton};
pub use lcd::Lcd1602;

/// Decoder library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default configuration: 1 kHz tick, 300 ms dot limit, 1 s character gap
pub const fn default_config() -> DecoderConfig {
    DecoderConfig::DEFAULT
}
