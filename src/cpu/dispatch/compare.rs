//! compare.rs - CMP/CPX/CPY opcode family.

use crate::bus::Bus;
use crate::cpu::addressing::{resolve, AddressingMode as M};
use crate::cpu::execute::{cmp, cpx, cpy, load_operand};
use crate::cpu::state::CpuState;
use crate::cpu::CpuError;

fn read(state: &mut CpuState, bus: &mut Bus, mode: M) -> Result<u8, CpuError> {
    let addr = resolve(state, bus, mode)?;
    Ok(load_operand(state, bus, addr)?)
}

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> Result<bool, CpuError> {
    match opcode {
        // CMP
        0xC9 => {
            let v = read(state, bus, M::Immediate)?;
            cmp(state, v);
        }
        0xC5 => {
            let v = read(state, bus, M::ZeroPage)?;
            cmp(state, v);
        }
        0xD5 => {
            let v = read(state, bus, M::ZeroPageX)?;
            cmp(state, v);
        }
        0xCD => {
            let v = read(state, bus, M::Absolute)?;
            cmp(state, v);
        }
        0xDD => {
            let v = read(state, bus, M::AbsoluteX)?;
            cmp(state, v);
        }
        0xD9 => {
            let v = read(state, bus, M::AbsoluteY)?;
            cmp(state, v);
        }
        0xC1 => {
            let v = read(state, bus, M::IndirectX)?;
            cmp(state, v);
        }
        0xD1 => {
            let v = read(state, bus, M::IndirectY)?;
            cmp(state, v);
        }

        // CPX
        0xE0 => {
            let v = read(state, bus, M::Immediate)?;
            cpx(state, v);
        }
        0xE4 => {
            let v = read(state, bus, M::ZeroPage)?;
            cpx(state, v);
        }
        0xEC => {
            let v = read(state, bus, M::Absolute)?;
            cpx(state, v);
        }

        // CPY
        0xC0 => {
            let v = read(state, bus, M::Immediate)?;
            cpy(state, v);
        }
        0xC4 => {
            let v = read(state, bus, M::ZeroPage)?;
            cpy(state, v);
        }
        0xCC => {
            let v = read(state, bus, M::Absolute)?;
            cpy(state, v);
        }

        _ => return Ok(false),
    }
    Ok(true)
}
