/*!
arithmetic.rs - ADC/SBC opcode family.

Binary arithmetic only; the decimal flag is ignored (2A03 behavior).
*/

use crate::bus::Bus;
use crate::cpu::addressing::{resolve, AddressingMode as M};
use crate::cpu::execute::{adc, load_operand, sbc};
use crate::cpu::state::CpuState;
use crate::cpu::CpuError;

fn read(state: &mut CpuState, bus: &mut Bus, mode: M) -> Result<u8, CpuError> {
    let addr = resolve(state, bus, mode)?;
    Ok(load_operand(state, bus, addr)?)
}

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> Result<bool, CpuError> {
    match opcode {
        // ADC
        0x69 => {
            let v = read(state, bus, M::Immediate)?;
            adc(state, v);
        }
        0x65 => {
            let v = read(state, bus, M::ZeroPage)?;
            adc(state, v);
        }
        0x75 => {
            let v = read(state, bus, M::ZeroPageX)?;
            adc(state, v);
        }
        0x6D => {
            let v = read(state, bus, M::Absolute)?;
            adc(state, v);
        }
        0x7D => {
            let v = read(state, bus, M::AbsoluteX)?;
            adc(state, v);
        }
        0x79 => {
            let v = read(state, bus, M::AbsoluteY)?;
            adc(state, v);
        }
        0x61 => {
            let v = read(state, bus, M::IndirectX)?;
            adc(state, v);
        }
        0x71 => {
            let v = read(state, bus, M::IndirectY)?;
            adc(state, v);
        }

        // SBC
        0xE9 => {
            let v = read(state, bus, M::Immediate)?;
            sbc(state, v);
        }
        0xE5 => {
            let v = read(state, bus, M::ZeroPage)?;
            sbc(state, v);
        }
        0xF5 => {
            let v = read(state, bus, M::ZeroPageX)?;
            sbc(state, v);
        }
        0xED => {
            let v = read(state, bus, M::Absolute)?;
            sbc(state, v);
        }
        0xFD => {
            let v = read(state, bus, M::AbsoluteX)?;
            sbc(state, v);
        }
        0xF9 => {
            let v = read(state, bus, M::AbsoluteY)?;
            sbc(state, v);
        }
        0xE1 => {
            let v = read(state, bus, M::IndirectX)?;
            sbc(state, v);
        }
        0xF1 => {
            let v = read(state, bus, M::IndirectY)?;
            sbc(state, v);
        }

        _ => return Ok(false),
    }
    Ok(true)
}
