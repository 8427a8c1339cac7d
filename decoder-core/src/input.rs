//! Button edge detection with a shared debounce guard

use portable_atomic::{AtomicBool, Ordering};
use crate::timing::TimingState;
use crate::types::{InputEvent, Level, Line};

/// Take-once event flags
///
/// A flag raised twice before the main loop takes it is delivered once.
pub struct EventFlags {
    press_ended: AtomicBool,
    reset_requested: AtomicBool,
}

impl EventFlags {
    /// Create cleared flags
    pub const fn new() -> Self {
        Self {
            press_ended: AtomicBool::new(false),
            reset_requested: AtomicBool::new(false),
        }
    }

    fn flag(&self, event: InputEvent) -> &AtomicBool {
        match event {
            InputEvent::PressEnded => &self.press_ended,
            InputEvent::ResetRequested => &self.reset_requested,
        }
    }

    /// Raise an event (interrupt context)
    pub fn raise(&self, event: InputEvent) {
        self.flag(event).store(true, Ordering::Release);
    }

    /// Consume an event if pending
    pub fn take(&self, event: InputEvent) -> bool {
        self.flag(event).swap(false, Ordering::AcqRel)
    }

    /// Check an event without consuming it
    pub fn is_pending(&self, event: InputEvent) -> bool {
        self.flag(event).load(Ordering::Acquire)
    }
}

impl Default for EventFlags {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything the interrupts write and the main loop reads
///
/// Safe to place in a `static` and share between the edge interrupt, the
/// tick interrupt and the main loop.
pub struct ButtonInput {
    timing: TimingState,
    events: EventFlags,
    debounce_ticks: u16,
}

impl ButtonInput {
    /// Create input state with the given debounce guard in ticks
    pub const fn new(debounce_ticks: u16) -> Self {
        Self {
            timing: TimingState::new(),
            events: EventFlags::new(),
            debounce_ticks,
        }
    }

    /// Report a single edge (called from the edge interrupt)
    pub fn on_edge(&self, line: Line, level: Level) -> bool {
        match line {
            Line::Primary => self.on_edges(Some(level), None),
            Line::Secondary => self.on_edges(None, Some(level)),
        }
    }

    /// Report the lines pending in one interrupt
    ///
    /// Both lines are judged against the same debounce state; the guard is
    /// armed once afterwards. Returns false if the edges were ignored.
    pub fn on_edges(&self, primary: Option<Level>, secondary: Option<Level>) -> bool {
        if primary.is_none() && secondary.is_none() {
            return false;
        }
        if self.timing.debounce_active() {
            return false;
        }

        match primary {
            Some(Level::Active) => self.timing.begin_press(),
            Some(Level::Inactive) => {
                self.timing.end_press();
                self.events.raise(InputEvent::PressEnded);
            }
            None => {}
        }

        if secondary == Some(Level::Active) {
            self.events.raise(InputEvent::ResetRequested);
        }

        self.timing.arm_debounce(self.debounce_ticks);
        true
    }

    /// Advance one tick (called from the tick interrupt)
    pub fn on_tick(&self) {
        self.timing.on_tick();
    }

    /// Consume a pending event
    pub fn take_event(&self, event: InputEvent) -> bool {
        self.events.take(event)
    }

    /// Duration counters
    pub fn timing(&self) -> &TimingState {
        &self.timing
    }

    /// Event flags
    pub fn events(&self) -> &EventFlags {
        &self.events
    }
}
