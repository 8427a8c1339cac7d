//! Morse decode table and lookup

use crate::types::{Symbol, PENDING_CAPACITY};

/// Pattern to character mapping: letters, digits and punctuation
pub static MORSE_TABLE: [(&str, char); 52] = [
    (".-", 'A'),
    ("-...", 'B'),
    ("-.-.", 'C'),
    ("-..", 'D'),
    (".", 'E'),
    ("..-.", 'F'),
    ("--.", 'G'),
    ("....", 'H'),
    ("..", 'I'),
    (".---", 'J'),
    ("-.-", 'K'),
    (".-..", 'L'),
    ("--", 'M'),
    ("-.", 'N'),
    ("---", 'O'),
    (".--.", 'P'),
    ("--.-", 'Q'),
    (".-.", 'R'),
    ("...", 'S'),
    ("-", 'T'),
    ("..-", 'U'),
    ("...-", 'V'),
    (".--", 'W'),
    ("-..-", 'X'),
    ("-.--", 'Y'),
    ("--..", 'Z'),
    (".----", '1'),
    ("..---", '2'),
    ("...--", '3'),
    ("....-", '4'),
    (".....", '5'),
    ("-....", '6'),
    ("--...", '7'),
    ("---..", '8'),
    ("----.", '9'),
    ("-----", '0'),
    (".-.-.-", '.'),
    ("--..--", ','),
    (".----.", '\''),
    (".-..-.", '"'),
    ("..--.-", '_'),
    ("---...", ':'),
    ("-.-.-.", ';'),
    ("..--..", '?'),
    ("-.-.--", '!'),
    ("-....-", '-'),
    (".-.-.", '+'),
    ("-..-.", '/'),
    ("-.--.", '('),
    ("-.--.-", ')'),
    ("-...-", '='),
    (".--.-.", '@'),
];

/// Decode table consistency errors
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TableError {
    /// Two entries share a pattern (entry indices)
    DuplicatePattern(usize, usize),
    /// Two entries decode to the same character (entry indices)
    DuplicateCharacter(usize, usize),
    /// Pattern contains something other than '.' or '-'
    InvalidSymbol(usize),
    /// Pattern can never fit in the pending code
    PatternTooLong(usize),
}

#[cfg(feature = "std")]
impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::DuplicatePattern(a, b) => write!(f, "entries {a} and {b} share a pattern"),
            TableError::DuplicateCharacter(a, b) => write!(f, "entries {a} and {b} share a character"),
            TableError::InvalidSymbol(i) => write!(f, "entry {i} has an invalid symbol"),
            TableError::PatternTooLong(i) => write!(f, "entry {i} exceeds the pending code capacity"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}

/// Check a table for the invariants lookup relies on
pub fn validate(table: &[(&str, char)]) -> Result<(), TableError> {
    for (i, (pattern, letter)) in table.iter().enumerate() {
        if pattern.is_empty() || pattern.chars().any(|c| Symbol::from_char(c).is_none()) {
            return Err(TableError::InvalidSymbol(i));
        }
        if pattern.len() > PENDING_CAPACITY {
            return Err(TableError::PatternTooLong(i));
        }
        for (j, (other_pattern, other_letter)) in table.iter().enumerate().skip(i + 1) {
            if pattern == other_pattern {
                return Err(TableError::DuplicatePattern(i, j));
            }
            if letter == other_letter {
                return Err(TableError::DuplicateCharacter(i, j));
            }
        }
    }
    Ok(())
}

/// Check the built-in table; run once at startup
pub fn validate_table() -> Result<(), TableError> {
    validate(&MORSE_TABLE)
}

fn matches(pattern: &str, code: &[Symbol]) -> bool {
    pattern.len() == code.len()
        && pattern
            .chars()
            .zip(code.iter())
            .all(|(c, symbol)| c == symbol.as_char())
}

/// Decode a complete code by exact match; `None` if the code is unknown
pub fn decode(code: &[Symbol]) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(pattern, _)| matches(pattern, code))
        .map(|&(_, letter)| letter)
}

/// Pattern for a character, ignoring ASCII case
pub fn encode(letter: char) -> Option<&'static str> {
    let letter = letter.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .find(|&&(_, c)| c == letter)
        .map(|&(pattern, _)| pattern)
}
