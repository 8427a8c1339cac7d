//! PFIC vector table and interrupt entry trampolines
//!
//! The QingKe V2 core jumps through a table of absolute handler addresses
//! (mtvec mode 0b11). Each entry saves the ilp32e caller-saved registers,
//! calls the Rust handler and returns with `mret`.

/// Vector numbers used by the firmware
pub const IRQ_SYSTICK: usize = 12;
pub const IRQ_EXTI7_0: usize = 20;

/// Table entries up to and including the last peripheral vector
const VECTOR_COUNT: usize = 39;

const _: () = assert!(IRQ_SYSTICK < VECTOR_COUNT && IRQ_EXTI7_0 < VECTOR_COUNT);
const _: () = assert!(IRQ_SYSTICK != IRQ_EXTI7_0);

macro_rules! trampoline {
    ($entry:literal, $handler:literal) => {
        concat!(
            ".section .text.", $entry, ", \"ax\"\n",
            ".balign 4\n",
            ".global ", $entry, "\n",
            $entry, ":\n",
            "  addi sp, sp, -40\n",
            "  sw ra, 0(sp)\n",
            "  sw t0, 4(sp)\n",
            "  sw t1, 8(sp)\n",
            "  sw t2, 12(sp)\n",
            "  sw a0, 16(sp)\n",
            "  sw a1, 20(sp)\n",
            "  sw a2, 24(sp)\n",
            "  sw a3, 28(sp)\n",
            "  sw a4, 32(sp)\n",
            "  sw a5, 36(sp)\n",
            "  call ", $handler, "\n",
            "  lw ra, 0(sp)\n",
            "  lw t0, 4(sp)\n",
            "  lw t1, 8(sp)\n",
            "  lw t2, 12(sp)\n",
            "  lw a0, 16(sp)\n",
            "  lw a1, 20(sp)\n",
            "  lw a2, 24(sp)\n",
            "  lw a3, 28(sp)\n",
            "  lw a4, 32(sp)\n",
            "  lw a5, 36(sp)\n",
            "  addi sp, sp, 40\n",
            "  mret\n",
        )
    };
}

core::arch::global_asm!(trampoline!("_pfic_systick", "SysTick"));
core::arch::global_asm!(trampoline!("_pfic_exti7_0", "EXTI7_0_IRQHandler"));

// Unused vectors are never enabled; park if one fires anyway
core::arch::global_asm!(
    ".section .text._pfic_unhandled, \"ax\"",
    ".balign 4",
    ".global _pfic_unhandled",
    "_pfic_unhandled:",
    "  j _pfic_unhandled",
);

// 39 words: 0-11 reserved/exceptions, 12 SysTick, 13-19, 20 EXTI7_0, 21-38
core::arch::global_asm!(
    ".section .text._pfic_vectors, \"ax\"",
    ".balign 1024",
    ".global _pfic_vectors",
    "_pfic_vectors:",
    ".rept 12",
    "  .word _pfic_unhandled",
    ".endr",
    "  .word _pfic_systick",
    ".rept 7",
    "  .word _pfic_unhandled",
    ".endr",
    "  .word _pfic_exti7_0",
    ".rept 18",
    "  .word _pfic_unhandled",
    ".endr",
);

extern "C" {
    static _pfic_vectors: u32;
}

/// Point mtvec at the PFIC table and turn off hardware stacking and nesting
pub fn install() {
    let table = unsafe { core::ptr::addr_of!(_pfic_vectors) } as usize;
    unsafe {
        // INTSYSCR: the trampolines save registers themselves
        core::arch::asm!("csrw 0x804, zero");
        core::arch::asm!("csrw mtvec, {0}", in(reg) table | 0b11);
    }
}
