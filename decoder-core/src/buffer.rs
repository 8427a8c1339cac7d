//! Bounded pending-code and transcript buffers

use heapless::{String, Vec};
use crate::types::{Symbol, PENDING_CAPACITY, TRANSCRIPT_CAPACITY};

/// Symbols keyed since the last boundary
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PendingCode {
    symbols: Vec<Symbol, PENDING_CAPACITY>,
}

impl PendingCode {
    pub const fn new() -> Self {
        Self { symbols: Vec::new() }
    }

    /// Append a symbol; returns false and drops it when full
    pub fn push(&mut self, symbol: Symbol) -> bool {
        self.symbols.push(symbol).is_ok()
    }

    pub fn clear(&mut self) {
        self.symbols.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.symbols.is_full()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn as_slice(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Dot/dash text for the display
    pub fn to_text(&self) -> String<PENDING_CAPACITY> {
        let mut text = String::new();
        for symbol in &self.symbols {
            // One ASCII byte per symbol, same capacity as the symbol buffer
            let stored = text.push(symbol.as_char()).is_ok();
            debug_assert!(stored, "code text shorter than pending code");
        }
        text
    }
}

/// Decoded text, append-only until reset
///
/// Never holds two adjacent spaces and never starts with one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Transcript {
    text: String<TRANSCRIPT_CAPACITY>,
}

impl Transcript {
    pub const fn new() -> Self {
        Self { text: String::new() }
    }

    /// Append a decoded character; returns false and drops it when full
    pub fn push_char(&mut self, letter: char) -> bool {
        if letter == ' ' {
            return self.push_space();
        }
        self.text.push(letter).is_ok()
    }

    /// Append a word space unless empty, already spaced, or full
    pub fn push_space(&mut self) -> bool {
        match self.text.chars().last() {
            None | Some(' ') => false,
            Some(_) => self.text.push(' ').is_ok(),
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn as_str(&self) -> &str {
        self.text.as_str()
    }
}
