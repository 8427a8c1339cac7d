//! CH32V003 register-level bring-up, I2C master and delay
//!
//! Pin assignments:
//! PD2 = signal button (active low with pull-up)
//! PD3 = reset button (active low with pull-up)
//! PC1 = I2C1 SDA, PC2 = I2C1 SCL (LCD1602 backpack)

use core::convert::Infallible;
use decoder_core::{ActiveLowButton, HalError, InputButton, Level};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, InputPin};
use embedded_hal::i2c::{ErrorType as I2cErrorType, I2c, Operation};
use crate::vectors::{IRQ_EXTI7_0, IRQ_SYSTICK};

// Critical section implementation for single-core RISC-V
struct RiscvCriticalSection;
critical_section::set_impl!(RiscvCriticalSection);

unsafe impl critical_section::Impl for RiscvCriticalSection {
    unsafe fn acquire() -> critical_section::RawRestoreState {
        let was_enabled = riscv::register::mstatus::read().mie();
        riscv::register::mstatus::clear_mie();
        was_enabled
    }

    unsafe fn release(was_enabled: critical_section::RawRestoreState) {
        if was_enabled {
            riscv::register::mstatus::set_mie();
        }
    }
}

/// Core clock after `enable_peripheral_clocks` (HSI, no prescaler)
pub const CORE_CLOCK_HZ: u32 = 24_000_000;

/// Tick interrupt rate
pub const TICK_HZ: u32 = 1_000;

// ========================================
// Register Base Addresses
// ========================================

const RCC_BASE: u32 = 0x4002_1000;
const GPIOC_BASE: u32 = 0x4001_1000;
const GPIOD_BASE: u32 = 0x4001_1400;
const AFIO_BASE: u32 = 0x4001_0000;
const EXTI_BASE: u32 = 0x4001_0400;
const I2C1_BASE: u32 = 0x4000_5400;
const PFIC_BASE: u32 = 0xE000_E000;
const STK_BASE: u32 = 0xE000_F000;

/// RCC Register offsets
const RCC_CFGR0: u32 = 0x04;
const RCC_APB2PCENR: u32 = 0x18;
const RCC_APB1PCENR: u32 = 0x1C;

/// GPIO Register offsets
const GPIO_CFGLR: u32 = 0x00;
const GPIO_INDR: u32 = 0x08;
const GPIO_OUTDR: u32 = 0x0C;

/// AFIO Register offsets
const AFIO_EXTICR: u32 = 0x08;

/// EXTI Register offsets
const EXTI_INTENR: u32 = 0x00;
const EXTI_RTENR: u32 = 0x08;
const EXTI_FTENR: u32 = 0x0C;
const EXTI_INTFR: u32 = 0x14;

/// I2C Register offsets
const I2C_CTLR1: u32 = 0x00;
const I2C_CTLR2: u32 = 0x04;
const I2C_DATAR: u32 = 0x10;
const I2C_STAR1: u32 = 0x14;
const I2C_STAR2: u32 = 0x18;
const I2C_CKCFGR: u32 = 0x1C;

const I2C_CTLR1_PE: u32 = 1 << 0;
const I2C_CTLR1_START: u32 = 1 << 8;
const I2C_CTLR1_STOP: u32 = 1 << 9;
const I2C_STAR1_SB: u32 = 1 << 0;
const I2C_STAR1_ADDR: u32 = 1 << 1;
const I2C_STAR1_BTF: u32 = 1 << 2;
const I2C_STAR1_TXE: u32 = 1 << 7;
const I2C_STAR1_BERR: u32 = 1 << 8;
const I2C_STAR1_ARLO: u32 = 1 << 9;
const I2C_STAR1_AF: u32 = 1 << 10;
const I2C_STAR2_BUSY: u32 = 1 << 1;

/// SysTick (STK) Register offsets
const STK_CTLR: u32 = 0x00;
const STK_SR: u32 = 0x04;
const STK_CNT: u32 = 0x08;
const STK_CMPLR: u32 = 0x10;

/// PFIC interrupt enable register for IRQ 0-31
const PFIC_IENR1: u32 = 0x100;

pub const SIGNAL_PIN: u8 = 2;
pub const RESET_PIN: u8 = 3;
pub const SIGNAL_MASK: u32 = 1 << SIGNAL_PIN;
pub const RESET_MASK: u32 = 1 << RESET_PIN;

const I2C_SPIN_LIMIT: u32 = 20_000;

#[inline(always)]
fn read_reg(addr: u32) -> u32 {
    unsafe { core::ptr::read_volatile(addr as *const u32) }
}

#[inline(always)]
fn write_reg(addr: u32, value: u32) {
    unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
}

#[inline(always)]
fn modify_reg(addr: u32, f: impl FnOnce(u32) -> u32) {
    write_reg(addr, f(read_reg(addr)));
}

// ========================================
// Bring-up
// ========================================

/// Hardware initialization wrapper; interrupts stay masked until `enable_interrupts`
pub fn hardware_init() {
    crate::vectors::install();
    enable_peripheral_clocks();
    configure_button_pins();
    configure_i2c_pins();
    configure_exti();
    configure_systick();
}

/// Run HCLK at full HSI speed and enable GPIOC, GPIOD, AFIO and I2C1 clocks
fn enable_peripheral_clocks() {
    // HPRE = 0: HCLK = SYSCLK
    modify_reg(RCC_BASE + RCC_CFGR0, |v| v & !(0xF << 4));
    // Bit 0 = AFIO, Bit 4 = GPIOC, Bit 5 = GPIOD
    modify_reg(RCC_BASE + RCC_APB2PCENR, |v| v | (1 << 0) | (1 << 4) | (1 << 5));
    // Bit 21 = I2C1
    modify_reg(RCC_BASE + RCC_APB1PCENR, |v| v | (1 << 21));
}

/// PD2 and PD3 as inputs with pull-up
fn configure_button_pins() {
    modify_reg(GPIOD_BASE + GPIO_CFGLR, |mut cfg| {
        for pin in [SIGNAL_PIN, RESET_PIN] {
            let shift = pin as u32 * 4;
            cfg &= !(0xF << shift);
            // CNF=10 (input with pull), MODE=00
            cfg |= 0x8 << shift;
        }
        cfg
    });
    modify_reg(GPIOD_BASE + GPIO_OUTDR, |v| v | SIGNAL_MASK | RESET_MASK);
}

/// PC1/PC2 as alternate-function open-drain for I2C1
fn configure_i2c_pins() {
    modify_reg(GPIOC_BASE + GPIO_CFGLR, |mut cfg| {
        for pin in [1u32, 2] {
            cfg &= !(0xF << (pin * 4));
            // CNF=11 (AF open-drain), MODE=01 (10 MHz)
            cfg |= 0xD << (pin * 4);
        }
        cfg
    });
}

/// Route PD2/PD3 to EXTI2/EXTI3 on both edges
fn configure_exti() {
    // Port D = 0b11 in each 2-bit EXTICR field
    modify_reg(AFIO_BASE + AFIO_EXTICR, |v| {
        v | (0b11 << (SIGNAL_PIN as u32 * 2)) | (0b11 << (RESET_PIN as u32 * 2))
    });
    modify_reg(EXTI_BASE + EXTI_RTENR, |v| v | SIGNAL_MASK | RESET_MASK);
    modify_reg(EXTI_BASE + EXTI_FTENR, |v| v | SIGNAL_MASK | RESET_MASK);
    modify_reg(EXTI_BASE + EXTI_INTENR, |v| v | SIGNAL_MASK | RESET_MASK);
    // Drop anything latched during configuration
    write_reg(EXTI_BASE + EXTI_INTFR, SIGNAL_MASK | RESET_MASK);
}

/// STK counting HCLK, auto-reload at 1 kHz
fn configure_systick() {
    write_reg(STK_BASE + STK_SR, 0);
    write_reg(STK_BASE + STK_CNT, 0);
    write_reg(STK_BASE + STK_CMPLR, CORE_CLOCK_HZ / TICK_HZ - 1);
    // STE | STIE | STCLK | STRE
    write_reg(STK_BASE + STK_CTLR, 0xF);
}

/// Unmask SysTick and EXTI7_0 in the PFIC and enable interrupts globally
pub fn enable_interrupts() {
    write_reg(
        PFIC_BASE + PFIC_IENR1,
        (1 << IRQ_SYSTICK as u32) | (1 << IRQ_EXTI7_0 as u32),
    );
    unsafe { riscv::register::mstatus::set_mie() };
}

// ========================================
// Interrupt helpers
// ========================================

/// Acknowledge the STK compare flag
pub fn clear_systick_flag() {
    write_reg(STK_BASE + STK_SR, 0);
}

/// Pending EXTI lines
pub fn exti_pending() -> u32 {
    read_reg(EXTI_BASE + EXTI_INTFR)
}

/// Acknowledge EXTI lines (write-one-to-clear)
pub fn clear_exti_pending(mask: u32) {
    write_reg(EXTI_BASE + EXTI_INTFR, mask);
}

/// Current logical level of a Port D button
pub fn button_level(pin: u8) -> Level {
    ActiveLowButton::new(PortPin::new(GPIOD_BASE, pin))
        .level()
        .unwrap_or(Level::Inactive)
}

// ========================================
// GPIO
// ========================================

/// Input pin read straight from the port's INDR
pub struct PortPin {
    port: u32,
    pin: u8,
}

impl PortPin {
    pub const fn new(port: u32, pin: u8) -> Self {
        Self { port, pin }
    }
}

impl PinErrorType for PortPin {
    type Error = Infallible;
}

impl InputPin for PortPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(read_reg(self.port + GPIO_INDR) & (1 << self.pin) != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

// ========================================
// I2C1 master (write-only, 100 kHz)
// ========================================

/// Blocking I2C1 master; the LCD backpack only needs writes
pub struct I2cMaster {
    _private: (),
}

impl I2cMaster {
    /// Configure I2C1 for 100 kHz standard mode
    pub fn new() -> Self {
        let pclk_mhz = CORE_CLOCK_HZ / 1_000_000;
        write_reg(I2C1_BASE + I2C_CTLR1, 0);
        write_reg(I2C1_BASE + I2C_CTLR2, pclk_mhz);
        write_reg(I2C1_BASE + I2C_CKCFGR, CORE_CLOCK_HZ / (2 * 100_000));
        write_reg(I2C1_BASE + I2C_CTLR1, I2C_CTLR1_PE);
        Self { _private: () }
    }

    fn wait_star1(&self, flag: u32) -> Result<(), HalError> {
        for _ in 0..I2C_SPIN_LIMIT {
            let star1 = read_reg(I2C1_BASE + I2C_STAR1);
            if star1 & I2C_STAR1_AF != 0 {
                return Err(HalError::AddressNack);
            }
            if star1 & (I2C_STAR1_BERR | I2C_STAR1_ARLO) != 0 {
                return Err(HalError::BusError);
            }
            if star1 & flag != 0 {
                return Ok(());
            }
        }
        Err(HalError::BusTimeout)
    }

    fn wait_idle(&self) -> Result<(), HalError> {
        for _ in 0..I2C_SPIN_LIMIT {
            if read_reg(I2C1_BASE + I2C_STAR2) & I2C_STAR2_BUSY == 0 {
                return Ok(());
            }
        }
        Err(HalError::BusTimeout)
    }

    fn write_frame(&mut self, address: u8, bytes: &[u8]) -> Result<(), HalError> {
        self.wait_idle()?;
        modify_reg(I2C1_BASE + I2C_CTLR1, |v| v | I2C_CTLR1_START);
        self.wait_star1(I2C_STAR1_SB)?;

        write_reg(I2C1_BASE + I2C_DATAR, (address as u32) << 1);
        self.wait_star1(I2C_STAR1_ADDR)?;
        // ADDR clears on STAR1 then STAR2 read
        let _ = read_reg(I2C1_BASE + I2C_STAR1);
        let _ = read_reg(I2C1_BASE + I2C_STAR2);

        for &byte in bytes {
            self.wait_star1(I2C_STAR1_TXE)?;
            write_reg(I2C1_BASE + I2C_DATAR, byte as u32);
        }
        self.wait_star1(I2C_STAR1_BTF)?;
        modify_reg(I2C1_BASE + I2C_CTLR1, |v| v | I2C_CTLR1_STOP);
        Ok(())
    }

    fn recover(&mut self) {
        modify_reg(I2C1_BASE + I2C_CTLR1, |v| v | I2C_CTLR1_STOP);
        modify_reg(I2C1_BASE + I2C_STAR1, |v| {
            v & !(I2C_STAR1_AF | I2C_STAR1_BERR | I2C_STAR1_ARLO)
        });
    }
}

impl I2cErrorType for I2cMaster {
    type Error = HalError;
}

impl I2c for I2cMaster {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), Self::Error> {
        for op in operations.iter() {
            let result = match op {
                Operation::Write(bytes) => self.write_frame(address, bytes),
                Operation::Read(_) => Err(HalError::InvalidConfig),
            };
            if let Err(e) = result {
                self.recover();
                return Err(e);
            }
        }
        Ok(())
    }
}

// ========================================
// Delay
// ========================================

/// Busy-wait delay counted in core cycles
pub struct CycleDelay;

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns as u64 * CORE_CLOCK_HZ as u64 / 1_000_000_000) as u32;
        unsafe { riscv::asm::delay(cycles.max(1)) };
    }
}
