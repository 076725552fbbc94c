/*!
misc.rs - Transfers, register inc/dec, flag operations, stack
operations, and NOP.

CLD and SED move the decimal flag like any other flag op, but nothing
reads it: the 2A03 has no decimal mode.
*/

use crate::bus::Bus;
use crate::cpu::execute::{
    dex, dey, inx, iny, pla, plp, push, push_status, tax, tay, tsx, txa, txs, tya,
};
use crate::cpu::state::{CpuState, CARRY, DECIMAL, IRQ_DISABLE, OVERFLOW};
use crate::cpu::CpuError;

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> Result<bool, CpuError> {
    match opcode {
        // Transfers
        0xAA => tax(state),
        0xA8 => tay(state),
        0x8A => txa(state),
        0x98 => tya(state),
        0xBA => tsx(state),
        0x9A => txs(state),

        // Register increment / decrement
        0xE8 => inx(state),
        0xC8 => iny(state),
        0xCA => dex(state),
        0x88 => dey(state),

        // Flag operations
        0x18 => state.set_flag(CARRY, false),
        0x38 => state.set_flag(CARRY, true),
        0x58 => state.set_flag(IRQ_DISABLE, false),
        0x78 => state.set_flag(IRQ_DISABLE, true),
        0xB8 => state.set_flag(OVERFLOW, false),
        0xD8 => state.set_flag(DECIMAL, false),
        0xF8 => state.set_flag(DECIMAL, true),

        // Stack
        0x48 => {
            // PHA; A read first to keep the borrows apart.
            let a = state.a;
            push(state, bus, a)?;
        }
        0x68 => pla(state, bus)?,
        0x08 => push_status(state, bus, true)?, // PHP
        0x28 => plp(state, bus)?,

        // NOP
        0xEA => {}

        _ => return Ok(false),
    }
    Ok(true)
}
