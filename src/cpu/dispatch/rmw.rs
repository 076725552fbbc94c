/*!
rmw.rs - Shift, rotate, and memory increment/decrement opcode family.

Every instruction here reads through a resolved `Address`, transforms,
and writes back to the same address. The accumulator variants resolve
to the A register, so the identical choreography covers both targets
and the result lands only where it came from.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{resolve, AddressingMode as M};
use crate::cpu::execute::{asl, load_operand, lsr, rol, ror, store_operand};
use crate::cpu::state::CpuState;
use crate::cpu::CpuError;

fn modify(
    state: &mut CpuState,
    bus: &mut Bus,
    mode: M,
    transform: impl FnOnce(&mut CpuState, u8) -> u8,
) -> Result<(), CpuError> {
    let addr = resolve(state, bus, mode)?;
    let old = load_operand(state, bus, addr)?;
    let new = transform(state, old);
    store_operand(state, bus, addr, new)?;
    state.update_zn(new);
    Ok(())
}

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> Result<bool, CpuError> {
    match opcode {
        // ASL
        0x0A => modify(state, bus, M::Accumulator, asl)?,
        0x06 => modify(state, bus, M::ZeroPage, asl)?,
        0x16 => modify(state, bus, M::ZeroPageX, asl)?,
        0x0E => modify(state, bus, M::Absolute, asl)?,
        0x1E => modify(state, bus, M::AbsoluteX, asl)?,

        // LSR
        0x4A => modify(state, bus, M::Accumulator, lsr)?,
        0x46 => modify(state, bus, M::ZeroPage, lsr)?,
        0x56 => modify(state, bus, M::ZeroPageX, lsr)?,
        0x4E => modify(state, bus, M::Absolute, lsr)?,
        0x5E => modify(state, bus, M::AbsoluteX, lsr)?,

        // ROL
        0x2A => modify(state, bus, M::Accumulator, rol)?,
        0x26 => modify(state, bus, M::ZeroPage, rol)?,
        0x36 => modify(state, bus, M::ZeroPageX, rol)?,
        0x2E => modify(state, bus, M::Absolute, rol)?,
        0x3E => modify(state, bus, M::AbsoluteX, rol)?,

        // ROR
        0x6A => modify(state, bus, M::Accumulator, ror)?,
        0x66 => modify(state, bus, M::ZeroPage, ror)?,
        0x76 => modify(state, bus, M::ZeroPageX, ror)?,
        0x6E => modify(state, bus, M::Absolute, ror)?,
        0x7E => modify(state, bus, M::AbsoluteX, ror)?,

        // INC
        0xE6 => modify(state, bus, M::ZeroPage, |_, v| v.wrapping_add(1))?,
        0xF6 => modify(state, bus, M::ZeroPageX, |_, v| v.wrapping_add(1))?,
        0xEE => modify(state, bus, M::Absolute, |_, v| v.wrapping_add(1))?,
        0xFE => modify(state, bus, M::AbsoluteX, |_, v| v.wrapping_add(1))?,

        // DEC
        0xC6 => modify(state, bus, M::ZeroPage, |_, v| v.wrapping_sub(1))?,
        0xD6 => modify(state, bus, M::ZeroPageX, |_, v| v.wrapping_sub(1))?,
        0xCE => modify(state, bus, M::Absolute, |_, v| v.wrapping_sub(1))?,
        0xDE => modify(state, bus, M::AbsoluteX, |_, v| v.wrapping_sub(1))?,

        _ => return Ok(false),
    }
    Ok(true)
}
