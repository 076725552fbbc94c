#![doc = r#"
famicore library crate.

A MOS 6502 (NES 2A03) execution core paired with a small assembler for
its source dialect. The CPU steps instruction-by-instruction over a
bus that decodes internal RAM and cartridge PRG ROM; the assembler
turns source text into a byte buffer the bus loads at the program
origin.

Modules:
- asm: lexer, AST builder, and emitter (lex → parse → assemble)
- bus: address-space dispatch, RAM mirroring, host regions, program load
- cartridge: iNES v1 loader for mapper 0 (NROM)
- cpu: register file, addressing decoder, opcode dispatch, cycle hook

In tests, shared iNES builders and the reference disassembler live
under `crate::test_utils`.
"#]

pub mod asm;
pub mod bus;
pub mod cartridge;
pub mod cpu;

// Re-export the types most hosts touch.
pub use asm::{AsmError, Assembler};
pub use bus::{Bus, BusError};
pub use cartridge::{Cartridge, CartridgeError};
pub use cpu::{Cpu, CpuError, CpuStatus, Interrupt, StackError};

// Shared test utilities (only compiled for tests)
#[cfg(test)]
pub mod test_utils;
