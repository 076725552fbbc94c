/*!
load_store.rs - LDA/LDX/LDY and STA/STX/STY opcode family.

Loads update Z/N through the execute helpers; stores change no flags.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{resolve, AddressingMode as M};
use crate::cpu::execute::{lda, ldx, ldy, load_operand, store_operand};
use crate::cpu::state::CpuState;
use crate::cpu::CpuError;

fn read(state: &mut CpuState, bus: &mut Bus, mode: M) -> Result<u8, CpuError> {
    let addr = resolve(state, bus, mode)?;
    Ok(load_operand(state, bus, addr)?)
}

fn store(state: &mut CpuState, bus: &mut Bus, mode: M, value: u8) -> Result<(), CpuError> {
    let addr = resolve(state, bus, mode)?;
    Ok(store_operand(state, bus, addr, value)?)
}

/// Execute a load/store opcode. Returns false if the opcode belongs to
/// another family.
pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> Result<bool, CpuError> {
    match opcode {
        // LDA
        0xA9 => {
            let v = read(state, bus, M::Immediate)?;
            lda(state, v);
        }
        0xA5 => {
            let v = read(state, bus, M::ZeroPage)?;
            lda(state, v);
        }
        0xB5 => {
            let v = read(state, bus, M::ZeroPageX)?;
            lda(state, v);
        }
        0xAD => {
            let v = read(state, bus, M::Absolute)?;
            lda(state, v);
        }
        0xBD => {
            let v = read(state, bus, M::AbsoluteX)?;
            lda(state, v);
        }
        0xB9 => {
            let v = read(state, bus, M::AbsoluteY)?;
            lda(state, v);
        }
        0xA1 => {
            let v = read(state, bus, M::IndirectX)?;
            lda(state, v);
        }
        0xB1 => {
            let v = read(state, bus, M::IndirectY)?;
            lda(state, v);
        }

        // LDX
        0xA2 => {
            let v = read(state, bus, M::Immediate)?;
            ldx(state, v);
        }
        0xA6 => {
            let v = read(state, bus, M::ZeroPage)?;
            ldx(state, v);
        }
        0xB6 => {
            let v = read(state, bus, M::ZeroPageY)?;
            ldx(state, v);
        }
        0xAE => {
            let v = read(state, bus, M::Absolute)?;
            ldx(state, v);
        }
        0xBE => {
            let v = read(state, bus, M::AbsoluteY)?;
            ldx(state, v);
        }

        // LDY
        0xA0 => {
            let v = read(state, bus, M::Immediate)?;
            ldy(state, v);
        }
        0xA4 => {
            let v = read(state, bus, M::ZeroPage)?;
            ldy(state, v);
        }
        0xB4 => {
            let v = read(state, bus, M::ZeroPageX)?;
            ldy(state, v);
        }
        0xAC => {
            let v = read(state, bus, M::Absolute)?;
            ldy(state, v);
        }
        0xBC => {
            let v = read(state, bus, M::AbsoluteX)?;
            ldy(state, v);
        }

        // STA (value read before the call to keep the borrows apart)
        0x85 => {
            let v = state.a;
            store(state, bus, M::ZeroPage, v)?;
        }
        0x95 => {
            let v = state.a;
            store(state, bus, M::ZeroPageX, v)?;
        }
        0x8D => {
            let v = state.a;
            store(state, bus, M::Absolute, v)?;
        }
        0x9D => {
            let v = state.a;
            store(state, bus, M::AbsoluteX, v)?;
        }
        0x99 => {
            let v = state.a;
            store(state, bus, M::AbsoluteY, v)?;
        }
        0x81 => {
            let v = state.a;
            store(state, bus, M::IndirectX, v)?;
        }
        0x91 => {
            let v = state.a;
            store(state, bus, M::IndirectY, v)?;
        }

        // STX
        0x86 => {
            let v = state.x;
            store(state, bus, M::ZeroPage, v)?;
        }
        0x96 => {
            let v = state.x;
            store(state, bus, M::ZeroPageY, v)?;
        }
        0x8E => {
            let v = state.x;
            store(state, bus, M::Absolute, v)?;
        }

        // STY
        0x84 => {
            let v = state.y;
            store(state, bus, M::ZeroPage, v)?;
        }
        0x94 => {
            let v = state.y;
            store(state, bus, M::ZeroPageX, v)?;
        }
        0x8C => {
            let v = state.y;
            store(state, bus, M::Absolute, v)?;
        }

        _ => return Ok(false),
    }
    Ok(true)
}
