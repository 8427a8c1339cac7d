#![no_std]
#![no_main]

// Logging support
#[cfg(feature = "defmt")]
use defmt::{debug, info, warn};
#[cfg(feature = "defmt")]
use defmt_rtt as _;
use panic_halt as _;

// Swallow log arguments when defmt is not available
#[cfg(not(feature = "defmt"))]
macro_rules! info {
    ($fmt:literal $(, $arg:expr)*) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! debug {
    ($fmt:literal $(, $arg:expr)*) => {{ $( let _ = &$arg; )* }};
}

#[cfg(not(feature = "defmt"))]
macro_rules! warn {
    ($fmt:literal $(, $arg:expr)*) => {{ $( let _ = &$arg; )* }};
}

mod hardware;
mod vectors;

use decoder_core::lcd::DEFAULT_ADDRESS;
use decoder_core::{default_config, validate_table, ButtonInput, DecoderConfig, DisplaySink, Lcd1602, MorseDecoder};
use hardware::{CycleDelay, I2cMaster, RESET_MASK, RESET_PIN, SIGNAL_MASK, SIGNAL_PIN};
use riscv_rt::entry;

const CONFIG: DecoderConfig = default_config();

/// Counters and flags shared with the SysTick and EXTI handlers
static BUTTONS: ButtonInput = ButtonInput::new(CONFIG.debounce_ticks);

#[entry]
fn main() -> ! {
    hardware::hardware_init();

    info!("CH32V003 Morse Decoder v{}", decoder_core::VERSION);

    if let Err(e) = validate_table() {
        warn!("decode table invalid: {:?}", e);
    }

    let mut lcd = Lcd1602::new(I2cMaster::new(), CycleDelay, DEFAULT_ADDRESS);
    if let Err(e) = lcd.init().and_then(|_| lcd.show_banner()) {
        warn!("LCD init failed: {:?}", e);
    }

    let mut decoder = MorseDecoder::new(CONFIG);
    hardware::enable_interrupts();

    info!("Main loop started");

    loop {
        match decoder.poll(&BUTTONS, &mut lcd) {
            Ok(events) => {
                for event in events {
                    debug!("{:?}", event);
                }
            }
            Err(e) => warn!("display write failed: {:?}", e),
        }
    }
}

// ========================================
// Interrupt Handlers
// ========================================

/// 1 ms tick, entered through the PFIC table in `vectors`
#[no_mangle]
extern "C" fn SysTick() {
    hardware::clear_systick_flag();
    BUTTONS.on_tick();
}

/// Both-edge interrupts for the signal (EXTI2) and reset (EXTI3) buttons
#[no_mangle]
extern "C" fn EXTI7_0_IRQHandler() {
    let pending = hardware::exti_pending() & (SIGNAL_MASK | RESET_MASK);

    let signal = (pending & SIGNAL_MASK != 0).then(|| hardware::button_level(SIGNAL_PIN));
    let reset = (pending & RESET_MASK != 0).then(|| hardware::button_level(RESET_PIN));
    BUTTONS.on_edges(signal, reset);

    hardware::clear_exti_pending(pending);
}
