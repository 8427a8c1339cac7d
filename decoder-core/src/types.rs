//! Core data types for the Morse decoder

/// Maximum number of symbols held in the pending code
pub const PENDING_CAPACITY: usize = 16;

/// Visible columns on one display row
pub const DISPLAY_WIDTH: usize = 16;

/// Rows on the display
pub const DISPLAY_ROWS: usize = 2;

/// Maximum number of characters in the transcript (one display row)
pub const TRANSCRIPT_CAPACITY: usize = DISPLAY_WIDTH;

/// Morse code symbols
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Symbol {
    /// Short press
    Dot,
    /// Long press
    Dash,
}

impl Symbol {
    /// Printable form used on the display and in the decode table
    pub const fn as_char(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    /// Parse a single table character
    pub const fn from_char(c: char) -> Option<Symbol> {
        match c {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }
}

/// Physical input lines
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Line {
    /// Signal button, keyed by the operator
    Primary,
    /// Reset button
    Secondary,
}

/// Logical level reported for a line after an edge
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Button pressed
    Active,
    /// Button released
    Inactive,
}

impl Level {
    /// Map an active-low pin reading to a logical level
    pub const fn from_active_low(pin_high: bool) -> Level {
        if pin_high {
            Level::Inactive
        } else {
            Level::Active
        }
    }
}

/// Discrete events raised by the edge interrupt and consumed by the main loop
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// The signal button was released; the held duration is final
    PressEnded,
    /// The reset button was pressed
    ResetRequested,
}

/// How the boundary detector treats idle periods
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BoundaryPolicy {
    /// Fire only while idle is inside `[next_char, space)`.
    /// An idle period first observed past `space` never fires.
    SingleShotWindow,
    /// Fire for any idle at or past `next_char`
    OpenEnded,
}

/// Outcome of one step of the main iteration
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderEvent {
    /// Symbol appended to the pending code
    SymbolAdded(Symbol),
    /// Pending code full, symbol discarded
    SymbolDropped(Symbol),
    /// Pending code decoded and appended to the transcript
    Decoded(char),
    /// Pending code decoded but the transcript is full
    CharacterDropped(char),
    /// Pending code matched nothing and was discarded
    UnknownCode,
    /// Word space appended to the transcript
    WordSpace,
    /// Word boundary reached but a space was not allowed
    SpaceSuppressed,
    /// Transcript and pending code cleared
    Reset,
}

/// Decoder configuration parameters
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Held ticks below which a press is a Dot
    pub dot_threshold: u32,
    /// Idle ticks at which the pending code is complete
    pub next_char_threshold: u32,
    /// Idle ticks at which the boundary window closes
    pub space_threshold: u32,
    /// Guard window after an accepted edge, in ticks
    pub debounce_ticks: u16,
    /// Boundary window behaviour
    pub boundary: BoundaryPolicy,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl DecoderConfig {
    /// 1 kHz tick defaults; usable in `static` initialisers
    pub const DEFAULT: DecoderConfig = DecoderConfig {
        dot_threshold: 300,
        next_char_threshold: 1000,
        space_threshold: 3000,
        debounce_ticks: 50,
        boundary: BoundaryPolicy::SingleShotWindow,
    };

    /// Create a new configuration with validation
    pub fn new(
        dot_threshold: u32,
        next_char_threshold: u32,
        space_threshold: u32,
        debounce_ticks: u16,
        boundary: BoundaryPolicy,
    ) -> Result<Self, &'static str> {
        if dot_threshold == 0 {
            return Err("Dot threshold must be non-zero");
        }
        if dot_threshold >= next_char_threshold {
            return Err("Dot threshold must be below next-char threshold");
        }
        if next_char_threshold >= space_threshold {
            return Err("Next-char threshold must be below space threshold");
        }
        if u32::from(debounce_ticks) >= dot_threshold {
            return Err("Debounce must be shorter than a dot");
        }

        Ok(Self {
            dot_threshold,
            next_char_threshold,
            space_threshold,
            debounce_ticks,
            boundary,
        })
    }

    /// Classify a finished press by its held duration
    pub const fn classify(&self, held_ticks: u32) -> Symbol {
        if held_ticks < self.dot_threshold {
            Symbol::Dot
        } else {
            Symbol::Dash
        }
    }

    /// Returns true if an idle duration counts as a boundary event
    pub const fn is_boundary(&self, idle_ticks: u32) -> bool {
        if idle_ticks < self.next_char_threshold {
            return false;
        }
        match self.boundary {
            BoundaryPolicy::SingleShotWindow => idle_ticks < self.space_threshold,
            BoundaryPolicy::OpenEnded => true,
        }
    }
}
