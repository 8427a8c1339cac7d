//! HD44780-compatible 16x2 character LCD behind a PCF8574 I2C backpack

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use crate::hal::{glyph, DisplaySink, HalError};
use crate::types::{DISPLAY_ROWS, DISPLAY_WIDTH};

/// Usual PCF8574 backpack address
pub const DEFAULT_ADDRESS: u8 = 0x27;

// PCF8574 pin mapping: P0=RS, P1=RW, P2=E, P3=Backlight, P4-P7=Data
pub(crate) const LCD_BACKLIGHT: u8 = 0x08;
pub(crate) const LCD_ENABLE: u8 = 0x04;
pub(crate) const LCD_RS: u8 = 0x01;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_SET: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

const ROW_OFFSETS: [u8; DISPLAY_ROWS] = [0x00, 0x40];

/// Blocking LCD1602 driver
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    col: u8,
    initialized: bool,
}

impl<I2C, D> Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            col: 0,
            initialized: false,
        }
    }

    /// Power-on sequence: 4-bit mode, 2 lines, display on, cleared
    pub fn init(&mut self) -> Result<(), HalError> {
        self.delay.delay_ms(50);

        self.write_nibble(0x03, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x03, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x03, false)?;
        self.write_nibble(0x02, false)?;

        self.write_byte(CMD_FUNCTION_SET, false)?;
        self.write_byte(CMD_DISPLAY_ON, false)?;
        self.write_byte(CMD_CLEAR, false)?;
        self.delay.delay_ms(2);
        self.write_byte(CMD_ENTRY_MODE, false)?;

        self.col = 0;
        self.initialized = true;

        #[cfg(feature = "defmt")]
        defmt::debug!("LCD ready at {=u8:#x}", self.address);
        Ok(())
    }

    /// Give back the bus and delay
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    fn ensure_initialized(&self) -> Result<(), HalError> {
        if self.initialized {
            Ok(())
        } else {
            Err(HalError::NotInitialized)
        }
    }

    fn write_nibble(&mut self, nibble: u8, rs: bool) -> Result<(), HalError> {
        let rs_bit = if rs { LCD_RS } else { 0 };
        let data = ((nibble & 0x0F) << 4) | LCD_BACKLIGHT | rs_bit;

        // Latch on the falling edge of E
        self.i2c
            .write(self.address, &[data | LCD_ENABLE])
            .map_err(|e| bus_error(e.kind()))?;
        self.delay.delay_us(1);
        self.i2c
            .write(self.address, &[data])
            .map_err(|e| bus_error(e.kind()))?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, rs: bool) -> Result<(), HalError> {
        self.write_nibble(byte >> 4, rs)?;
        self.write_nibble(byte & 0x0F, rs)
    }
}

fn bus_error(kind: ErrorKind) -> HalError {
    match kind {
        ErrorKind::NoAcknowledge(_) => HalError::AddressNack,
        _ => HalError::BusError,
    }
}

impl<I2C, D> DisplaySink for Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    type Error = HalError;

    fn clear(&mut self) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        self.write_byte(CMD_CLEAR, false)?;
        self.delay.delay_ms(2);
        self.col = 0;
        Ok(())
    }

    fn set_cursor(&mut self, row: u8, col: u8) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        if row as usize >= DISPLAY_ROWS || col as usize >= DISPLAY_WIDTH {
            return Err(HalError::InvalidConfig);
        }
        self.write_byte(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col), false)?;
        self.col = col;
        Ok(())
    }

    fn print(&mut self, text: &str) -> Result<(), Self::Error> {
        self.ensure_initialized()?;
        let room = DISPLAY_WIDTH.saturating_sub(self.col as usize);
        for c in text.chars().take(room) {
            self.write_byte(glyph(c), true)?;
            self.col += 1;
        }
        Ok(())
    }
}
