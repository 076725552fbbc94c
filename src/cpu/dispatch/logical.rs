//! logical.rs - AND/ORA/EOR/BIT opcode family.

use crate::bus::Bus;
use crate::cpu::addressing::{resolve, AddressingMode as M};
use crate::cpu::execute::{and, bit, eor, load_operand, ora};
use crate::cpu::state::CpuState;
use crate::cpu::CpuError;

fn read(state: &mut CpuState, bus: &mut Bus, mode: M) -> Result<u8, CpuError> {
    let addr = resolve(state, bus, mode)?;
    Ok(load_operand(state, bus, addr)?)
}

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> Result<bool, CpuError> {
    match opcode {
        // AND
        0x29 => {
            let v = read(state, bus, M::Immediate)?;
            and(state, v);
        }
        0x25 => {
            let v = read(state, bus, M::ZeroPage)?;
            and(state, v);
        }
        0x35 => {
            let v = read(state, bus, M::ZeroPageX)?;
            and(state, v);
        }
        0x2D => {
            let v = read(state, bus, M::Absolute)?;
            and(state, v);
        }
        0x3D => {
            let v = read(state, bus, M::AbsoluteX)?;
            and(state, v);
        }
        0x39 => {
            let v = read(state, bus, M::AbsoluteY)?;
            and(state, v);
        }
        0x21 => {
            let v = read(state, bus, M::IndirectX)?;
            and(state, v);
        }
        0x31 => {
            let v = read(state, bus, M::IndirectY)?;
            and(state, v);
        }

        // ORA
        0x09 => {
            let v = read(state, bus, M::Immediate)?;
            ora(state, v);
        }
        0x05 => {
            let v = read(state, bus, M::ZeroPage)?;
            ora(state, v);
        }
        0x15 => {
            let v = read(state, bus, M::ZeroPageX)?;
            ora(state, v);
        }
        0x0D => {
            let v = read(state, bus, M::Absolute)?;
            ora(state, v);
        }
        0x1D => {
            let v = read(state, bus, M::AbsoluteX)?;
            ora(state, v);
        }
        0x19 => {
            let v = read(state, bus, M::AbsoluteY)?;
            ora(state, v);
        }
        0x01 => {
            let v = read(state, bus, M::IndirectX)?;
            ora(state, v);
        }
        0x11 => {
            let v = read(state, bus, M::IndirectY)?;
            ora(state, v);
        }

        // EOR
        0x49 => {
            let v = read(state, bus, M::Immediate)?;
            eor(state, v);
        }
        0x45 => {
            let v = read(state, bus, M::ZeroPage)?;
            eor(state, v);
        }
        0x55 => {
            let v = read(state, bus, M::ZeroPageX)?;
            eor(state, v);
        }
        0x4D => {
            let v = read(state, bus, M::Absolute)?;
            eor(state, v);
        }
        0x5D => {
            let v = read(state, bus, M::AbsoluteX)?;
            eor(state, v);
        }
        0x59 => {
            let v = read(state, bus, M::AbsoluteY)?;
            eor(state, v);
        }
        0x41 => {
            let v = read(state, bus, M::IndirectX)?;
            eor(state, v);
        }
        0x51 => {
            let v = read(state, bus, M::IndirectY)?;
            eor(state, v);
        }

        // BIT
        0x24 => {
            let v = read(state, bus, M::ZeroPage)?;
            bit(state, v);
        }
        0x2C => {
            let v = read(state, bus, M::Absolute)?;
            bit(state, v);
        }

        _ => return Ok(false),
    }
    Ok(true)
}
