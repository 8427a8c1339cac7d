//! Main-loop state machine: symbol classification, boundaries and reset

use heapless::Vec;
use crate::buffer::{PendingCode, Transcript};
use crate::hal::DisplaySink;
use crate::input::ButtonInput;
use crate::table;
use crate::types::{DecoderConfig, DecoderEvent, InputEvent};

/// Steps in one main-loop iteration: press-ended, boundary, reset
pub const POLL_STEPS: usize = 3;

/// Events produced by one main-loop iteration (at most one per step)
pub type PollEvents = Vec<DecoderEvent, POLL_STEPS>;

fn record(events: &mut PollEvents, event: DecoderEvent) {
    let stored = events.push(event).is_ok();
    debug_assert!(stored, "more events than poll steps");
}

/// Morse decoder owning the pending code and transcript
pub struct MorseDecoder {
    config: DecoderConfig,
    pending: PendingCode,
    transcript: Transcript,
}

impl MorseDecoder {
    /// Create decoder with given configuration
    pub const fn new(config: DecoderConfig) -> Self {
        Self {
            config,
            pending: PendingCode::new(),
            transcript: Transcript::new(),
        }
    }

    /// Run one main-loop iteration against the shared input state
    ///
    /// Buffers, flags and the idle counter are updated before anything is
    /// rendered, so a display error loses no input. Events not reached
    /// because of an early error stay pending for the next iteration.
    pub fn poll<D: DisplaySink>(
        &mut self,
        input: &ButtonInput,
        display: &mut D,
    ) -> Result<PollEvents, D::Error> {
        let mut events = PollEvents::new();

        if input.take_event(InputEvent::PressEnded) {
            let held = input.timing().held_ticks();
            let event = self.on_press_ended(held, display)?;
            record(&mut events, event);
        }

        if self.config.is_boundary(input.timing().idle_ticks()) {
            let event = self.on_boundary(display, || input.timing().rearm_idle())?;
            record(&mut events, event);
        }

        if input.take_event(InputEvent::ResetRequested) {
            let event = self.reset(display)?;
            record(&mut events, event);
        }

        Ok(events)
    }

    /// Classify a finished press and show the pending code
    pub fn on_press_ended<D: DisplaySink>(
        &mut self,
        held_ticks: u32,
        display: &mut D,
    ) -> Result<DecoderEvent, D::Error> {
        let symbol = self.config.classify(held_ticks);
        let event = if self.pending.push(symbol) {
            DecoderEvent::SymbolAdded(symbol)
        } else {
            DecoderEvent::SymbolDropped(symbol)
        };

        #[cfg(feature = "defmt")]
        defmt::trace!("held {=u32} -> {:?}", held_ticks, event);

        display.show_code(&self.pending.to_text())?;
        Ok(event)
    }

    /// Handle an idle period that crossed into the boundary window
    ///
    /// `rearm` is called once the buffers are updated and before rendering.
    pub fn on_boundary<D, F>(&mut self, display: &mut D, rearm: F) -> Result<DecoderEvent, D::Error>
    where
        D: DisplaySink,
        F: FnOnce(),
    {
        if self.pending.is_empty() {
            let event = if self.transcript.push_space() {
                DecoderEvent::WordSpace
            } else {
                DecoderEvent::SpaceSuppressed
            };
            rearm();
            return Ok(event);
        }

        let event = match table::decode(self.pending.as_slice()) {
            Some(letter) if self.transcript.push_char(letter) => DecoderEvent::Decoded(letter),
            Some(letter) => DecoderEvent::CharacterDropped(letter),
            None => DecoderEvent::UnknownCode,
        };
        self.pending.clear();
        rearm();

        #[cfg(feature = "defmt")]
        defmt::debug!("boundary: {:?}", event);

        match event {
            DecoderEvent::Decoded(_) => display.show_transcript(self.transcript.as_str())?,
            _ => display.clear_code()?,
        }
        Ok(event)
    }

    /// Clear both buffers and return the display to the banner
    pub fn reset<D: DisplaySink>(&mut self, display: &mut D) -> Result<DecoderEvent, D::Error> {
        self.pending.clear();
        self.transcript.clear();

        #[cfg(feature = "defmt")]
        defmt::debug!("reset");

        display.show_banner()?;
        Ok(DecoderEvent::Reset)
    }

    /// Pending code
    pub fn pending(&self) -> &PendingCode {
        &self.pending
    }

    /// Decoded transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Get current configuration
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}
