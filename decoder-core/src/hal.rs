//! Hardware Abstraction Layer for the decoder's display and buttons

use embedded_hal::digital::InputPin;
use crate::types::{Level, DISPLAY_WIDTH};

/// Startup text on the code row
pub const BANNER: &str = "Morse Decoder";

/// One display row of spaces
pub const BLANK_ROW: &str = "                ";

/// Row showing the pending code
pub const CODE_ROW: u8 = 0;

/// Row showing the transcript
pub const TRANSCRIPT_ROW: u8 = 1;

/// Error types for HAL operations
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HalError {
    /// GPIO read failed
    GpioError,
    /// Bus error or arbitration loss
    BusError,
    /// Peripheral did not respond in time
    BusTimeout,
    /// Device did not acknowledge its address
    AddressNack,
    /// Hardware not initialized
    NotInitialized,
    /// Invalid configuration or argument
    InvalidConfig,
}

#[cfg(feature = "std")]
impl core::fmt::Display for HalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            HalError::GpioError => write!(f, "GPIO operation failed"),
            HalError::BusError => write!(f, "Bus error"),
            HalError::BusTimeout => write!(f, "Bus timeout"),
            HalError::AddressNack => write!(f, "Address not acknowledged"),
            HalError::NotInitialized => write!(f, "Hardware not initialized"),
            HalError::InvalidConfig => write!(f, "Invalid configuration"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for HalError {}

impl embedded_hal::i2c::Error for HalError {
    fn kind(&self) -> embedded_hal::i2c::ErrorKind {
        use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
        match self {
            HalError::BusError => ErrorKind::Bus,
            HalError::AddressNack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
            _ => ErrorKind::Other,
        }
    }
}

/// Trait for a fixed-width character display
///
/// Text past the end of a row is dropped, never wrapped.
pub trait DisplaySink {
    type Error: From<HalError>;

    /// Blank the whole display and home the cursor
    fn clear(&mut self) -> Result<(), Self::Error>;

    /// Move the cursor
    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error>;

    /// Write text at the cursor
    fn print(&mut self, text: &str) -> Result<(), Self::Error>;

    /// Initial banner state
    fn show_banner(&mut self) -> Result<(), Self::Error> {
        self.clear()?;
        self.set_cursor(CODE_ROW, 0)?;
        self.print(BANNER)
    }

    /// Replace the code row with the in-progress code
    fn show_code(&mut self, code: &str) -> Result<(), Self::Error> {
        self.clear_code()?;
        self.set_cursor(CODE_ROW, 0)?;
        self.print(code)
    }

    /// Blank the code row
    fn clear_code(&mut self) -> Result<(), Self::Error> {
        self.set_cursor(CODE_ROW, 0)?;
        self.print(BLANK_ROW)
    }

    /// Clear everything and show the transcript
    fn show_transcript(&mut self, text: &str) -> Result<(), Self::Error> {
        self.clear()?;
        self.set_cursor(TRANSCRIPT_ROW, 0)?;
        self.print(text)
    }
}

/// Trait for a button line sampled at edge time
pub trait InputButton {
    type Error: From<HalError>;

    /// Current logical level
    fn level(&mut self) -> Result<Level, Self::Error>;
}

/// Generic implementation for embedded-hal pins wired active low
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P> ActiveLowButton<P>
where
    P: InputPin,
{
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the underlying pin
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P> InputButton for ActiveLowButton<P>
where
    P: InputPin,
{
    type Error = HalError;

    fn level(&mut self) -> Result<Level, Self::Error> {
        // Pulled up, grounded when pressed
        self.pin
            .is_high()
            .map(Level::from_active_low)
            .map_err(|_| HalError::GpioError)
    }
}

/// Byte sent to a character display for `c`
pub(crate) fn glyph(c: char) -> u8 {
    if c.is_ascii() && !c.is_ascii_control() {
        c as u8
    } else {
        b'?'
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    //! Mock implementations for testing

    use super::*;
    use crate::types::DISPLAY_ROWS;

    /// Frame-buffer display that records what an LCD would show
    pub struct MockDisplay {
        rows: [[u8; DISPLAY_WIDTH]; DISPLAY_ROWS],
        row: usize,
        col: usize,
        clears: usize,
        fail: bool,
    }

    impl MockDisplay {
        pub fn new() -> Self {
            Self {
                rows: [[b' '; DISPLAY_WIDTH]; DISPLAY_ROWS],
                row: 0,
                col: 0,
                clears: 0,
                fail: false,
            }
        }

        /// Full row contents including trailing blanks
        pub fn row(&self, row: usize) -> &str {
            core::str::from_utf8(&self.rows[row]).unwrap_or("")
        }

        /// Row contents without trailing blanks
        pub fn row_text(&self, row: usize) -> &str {
            self.row(row).trim_end()
        }

        /// Number of `clear` calls seen
        pub fn clear_count(&self) -> usize {
            self.clears
        }

        /// Make every following call fail with a bus error
        pub fn set_failing(&mut self, fail: bool) {
            self.fail = fail;
        }

        fn check(&self) -> Result<(), HalError> {
            if self.fail {
                Err(HalError::BusError)
            } else {
                Ok(())
            }
        }
    }

    impl Default for MockDisplay {
        fn default() -> Self {
            Self::new()
        }
    }

    impl DisplaySink for MockDisplay {
        type Error = HalError;

        fn clear(&mut self) -> Result<(), Self::Error> {
            self.check()?;
            self.rows = [[b' '; DISPLAY_WIDTH]; DISPLAY_ROWS];
            self.row = 0;
            self.col = 0;
            self.clears += 1;
            Ok(())
        }

        fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
            self.check()?;
            if row as usize >= DISPLAY_ROWS || col as usize >= DISPLAY_WIDTH {
                return Err(HalError::InvalidConfig);
            }
            self.row = row as usize;
            self.col = col as usize;
            Ok(())
        }

        fn print(&mut self, text: &str) -> Result<(), Self::Error> {
            self.check()?;
            let room = DISPLAY_WIDTH.saturating_sub(self.col);
            for c in text.chars().take(room) {
                self.rows[self.row][self.col] = glyph(c);
                self.col += 1;
            }
            Ok(())
        }
    }
}
