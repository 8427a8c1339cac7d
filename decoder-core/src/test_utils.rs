//! Test utilities for decoder core functionality

#[cfg(feature = "test-utils")]
pub mod simulator {
    //! Tick-accurate simulation of the interrupt and main-loop contexts

    use std::vec::Vec;
    use crate::decoder::MorseDecoder;
    use crate::hal::mock::MockDisplay;
    use crate::hal::DisplaySink;
    use crate::input::ButtonInput;
    use crate::table::encode;
    use crate::types::{DecoderConfig, DecoderEvent, Level, Line};

    /// Keying rhythm in ticks
    #[derive(Copy, Clone, Debug)]
    pub struct Fist {
        pub dot: u32,
        pub dash: u32,
        /// Gap between symbols of one character
        pub element_gap: u32,
        /// Gap after each character
        pub char_gap: u32,
        /// Gap for a word space in text
        pub word_gap: u32,
    }

    impl Default for Fist {
        fn default() -> Self {
            Self {
                dot: 100,
                dash: 400,
                element_gap: 100,
                char_gap: 1200,
                word_gap: 2200,
            }
        }
    }

    /// Drives `ButtonInput` and `MorseDecoder` the way the firmware does:
    /// the tick interrupt fires, then the main loop runs one iteration.
    pub struct Simulator {
        pub input: ButtonInput,
        pub decoder: MorseDecoder,
        pub display: MockDisplay,
        events: Vec<DecoderEvent>,
        stalled: bool,
        now: u64,
    }

    impl Simulator {
        /// Simulator with the firmware's default timing
        pub fn with_defaults() -> Self {
            Self::new(crate::default_config())
        }

        pub fn new(config: DecoderConfig) -> Self {
            let mut display = MockDisplay::new();
            display
                .show_banner()
                .expect("mock display does not fail");
            Self {
                input: ButtonInput::new(config.debounce_ticks),
                decoder: MorseDecoder::new(config),
                display,
                events: Vec::new(),
                stalled: false,
                now: 0,
            }
        }

        /// Stop running the main loop between ticks (interrupts keep firing)
        pub fn stall(&mut self, stalled: bool) {
            self.stalled = stalled;
        }

        /// Run one main-loop iteration now
        pub fn poll(&mut self) {
            let events = self
                .decoder
                .poll(&self.input, &mut self.display)
                .expect("mock display does not fail");
            self.events.extend(events);
        }

        /// Advance `ticks` milliseconds
        pub fn advance(&mut self, ticks: u32) {
            for _ in 0..ticks {
                self.input.on_tick();
                self.now += 1;
                if !self.stalled {
                    self.poll();
                }
            }
        }

        /// Deliver an edge, then let the main loop see it
        pub fn edge(&mut self, line: Line, level: Level) -> bool {
            let accepted = self.input.on_edge(line, level);
            if !self.stalled {
                self.poll();
            }
            accepted
        }

        /// Hold the signal button for `ticks`
        pub fn press(&mut self, ticks: u32) {
            self.edge(Line::Primary, Level::Active);
            self.advance(ticks);
            self.edge(Line::Primary, Level::Inactive);
        }

        /// Leave the signal button up for `ticks`
        pub fn idle(&mut self, ticks: u32) {
            self.advance(ticks);
        }

        /// Press and release the reset button
        pub fn reset_button(&mut self, ticks: u32) {
            self.edge(Line::Secondary, Level::Active);
            self.advance(ticks);
            self.edge(Line::Secondary, Level::Inactive);
        }

        /// Key a dot/dash pattern, ending with the character gap
        pub fn key_pattern(&mut self, pattern: &str, fist: Fist) {
            let mut first = true;
            for c in pattern.chars() {
                let held = match c {
                    '.' => fist.dot,
                    '-' => fist.dash,
                    _ => continue,
                };
                if !first {
                    self.idle(fist.element_gap);
                }
                self.press(held);
                first = false;
            }
            self.idle(fist.char_gap);
        }

        /// Key text; characters outside the table are skipped
        pub fn key_text(&mut self, text: &str, fist: Fist) {
            for c in text.chars() {
                if c == ' ' {
                    self.idle(fist.word_gap);
                } else if let Some(pattern) = encode(c) {
                    self.key_pattern(pattern, fist);
                }
            }
        }

        /// Chatter on the signal line: alternating edges one tick apart
        pub fn bounce(&mut self, edges: u32) {
            for i in 0..edges {
                let level = if i % 2 == 0 { Level::Inactive } else { Level::Active };
                self.edge(Line::Primary, level);
                self.advance(1);
            }
        }

        /// Events seen since the last call
        pub fn take_events(&mut self) -> Vec<DecoderEvent> {
            core::mem::take(&mut self.events)
        }

        /// Simulated milliseconds since start
        pub fn now(&self) -> u64 {
            self.now
        }

        pub fn transcript(&self) -> &str {
            self.decoder.transcript().as_str()
        }

        pub fn pending_text(&self) -> heapless::String<{ crate::types::PENDING_CAPACITY }> {
            self.decoder.pending().to_text()
        }
    }
}
