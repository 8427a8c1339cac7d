//! LCD1602 traffic checked against embedded-hal-mock

use embedded_hal::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use decoder_core::lcd::DEFAULT_ADDRESS;
use decoder_core::{DisplaySink, HalError, Lcd1602};

const BACKLIGHT: u8 = 0x08;
const ENABLE: u8 = 0x04;
const RS: u8 = 0x01;

/// Two bus writes per nibble: E high, then E low
fn nibble(value: u8, rs: bool) -> [I2cTransaction; 2] {
    let data = (value << 4) | BACKLIGHT | if rs { RS } else { 0 };
    [
        I2cTransaction::write(DEFAULT_ADDRESS, vec![data | ENABLE]),
        I2cTransaction::write(DEFAULT_ADDRESS, vec![data]),
    ]
}

fn byte(value: u8, rs: bool) -> Vec<I2cTransaction> {
    let mut out = nibble(value >> 4, rs).to_vec();
    out.extend(nibble(value & 0x0F, rs));
    out
}

fn init_sequence() -> Vec<I2cTransaction> {
    let mut out = Vec::new();
    for n in [0x03, 0x03, 0x03, 0x02] {
        out.extend(nibble(n, false));
    }
    for cmd in [0x28, 0x0C, 0x01, 0x06] {
        out.extend(byte(cmd, false));
    }
    out
}

#[test]
fn init_and_banner_traffic() {
    let mut expected = init_sequence();
    // show_banner: clear, home, text
    expected.extend(byte(0x01, false));
    expected.extend(byte(0x80, false));
    for b in "Morse Decoder".bytes() {
        expected.extend(byte(b, true));
    }

    let mut i2c = I2cMock::new(&expected);
    let mut lcd = Lcd1602::new(i2c.clone(), NoopDelay::new(), DEFAULT_ADDRESS);
    lcd.init().unwrap();
    lcd.show_banner().unwrap();
    i2c.done();
}

#[test]
fn transcript_goes_to_second_row() {
    let mut expected = init_sequence();
    expected.extend(byte(0x01, false));
    expected.extend(byte(0x80 | 0x40, false));
    for b in "SOS".bytes() {
        expected.extend(byte(b, true));
    }

    let mut i2c = I2cMock::new(&expected);
    let mut lcd = Lcd1602::new(i2c.clone(), NoopDelay::new(), DEFAULT_ADDRESS);
    lcd.init().unwrap();
    lcd.show_transcript("SOS").unwrap();
    i2c.done();
}

#[test]
fn missing_backpack_reports_nack() {
    let expected = [nibble(0x03, false)[0]
        .clone()
        .with_error(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address))];

    let mut i2c = I2cMock::new(&expected);
    let mut lcd = Lcd1602::new(i2c.clone(), NoopDelay::new(), DEFAULT_ADDRESS);
    assert_eq!(lcd.init(), Err(HalError::AddressNack));
    i2c.done();
}

#[test]
fn bus_fault_after_init_is_reported() {
    let mut expected = init_sequence();
    expected.push(I2cTransaction::write(DEFAULT_ADDRESS, vec![0x08 | ENABLE]).with_error(ErrorKind::Bus));

    let mut i2c = I2cMock::new(&expected);
    let mut lcd = Lcd1602::new(i2c.clone(), NoopDelay::new(), DEFAULT_ADDRESS);
    lcd.init().unwrap();
    assert_eq!(lcd.clear(), Err(HalError::BusError));
    i2c.done();
}
