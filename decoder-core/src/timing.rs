//! Tick-driven duration bookkeeping shared between interrupt and main contexts

use portable_atomic::{AtomicBool, AtomicU16, AtomicU32, Ordering};

/// Held/idle/debounce counters
///
/// The tick interrupt is the only incrementer. Multi-field transitions
/// (press start and end, idle re-arm) run inside a critical section so a
/// tick never lands between them.
pub struct TimingState {
    held: AtomicU32,
    idle: AtomicU32,
    debounce: AtomicU16,
    measuring: AtomicBool,
}

impl TimingState {
    /// Create zeroed timing state
    pub const fn new() -> Self {
        Self {
            held: AtomicU32::new(0),
            idle: AtomicU32::new(0),
            debounce: AtomicU16::new(0),
            measuring: AtomicBool::new(false),
        }
    }

    /// Advance one tick (called from the 1 kHz tick interrupt)
    pub fn on_tick(&self) {
        if self.measuring.load(Ordering::Relaxed) {
            saturating_increment(&self.held);
        } else {
            saturating_increment(&self.idle);
        }

        let remaining = self.debounce.load(Ordering::Relaxed);
        if remaining > 0 {
            self.debounce.store(remaining - 1, Ordering::Relaxed);
        }
    }

    /// Ticks the signal button has been (or was last) held
    pub fn held_ticks(&self) -> u32 {
        self.held.load(Ordering::Acquire)
    }

    /// Ticks since the signal button was last released
    pub fn idle_ticks(&self) -> u32 {
        self.idle.load(Ordering::Acquire)
    }

    /// Ticks left in the debounce guard
    pub fn debounce_remaining(&self) -> u16 {
        self.debounce.load(Ordering::Relaxed)
    }

    /// Returns true while measuring a press
    pub fn is_measuring(&self) -> bool {
        self.measuring.load(Ordering::Relaxed)
    }

    /// Returns true while the debounce guard is active
    pub fn debounce_active(&self) -> bool {
        self.debounce_remaining() > 0
    }

    /// Start the debounce guard
    pub fn arm_debounce(&self, ticks: u16) {
        self.debounce.store(ticks, Ordering::Relaxed);
    }

    /// Switch to held measurement from zero
    pub fn begin_press(&self) {
        critical_section::with(|_| {
            self.held.store(0, Ordering::Relaxed);
            self.idle.store(0, Ordering::Relaxed);
            self.measuring.store(true, Ordering::Release);
        });
    }

    /// Freeze the held count and restart idle measurement
    pub fn end_press(&self) {
        critical_section::with(|_| {
            self.measuring.store(false, Ordering::Relaxed);
            self.idle.store(0, Ordering::Release);
        });
    }

    /// Zero the idle count after a boundary event
    pub fn rearm_idle(&self) {
        critical_section::with(|_| {
            self.idle.store(0, Ordering::Release);
        });
    }
}

impl Default for TimingState {
    fn default() -> Self {
        Self::new()
    }
}

// Plain load/store; only the tick interrupt increments
fn saturating_increment(counter: &AtomicU32) {
    let value = counter.load(Ordering::Relaxed);
    counter.store(value.saturating_add(1), Ordering::Release);
}
