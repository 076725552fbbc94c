/*!
addressing.rs - Addressing modes and operand resolution.

One decoder function turns (mode, operand bytes at PC, register state)
into a tagged `Address` that load/store helpers consume uniformly; the
accumulator mode resolves to a register target rather than a memory
address, which is what lets shift/rotate share one code path for both
destinations.

Conventions:
- PC points at the first unread operand byte when `resolve` is called,
  and `resolve` advances it past everything it consumes.
- 16-bit address arithmetic wraps at 16 bits; zero-page arithmetic
  wraps at 8 bits.
- JMP (indirect) reproduces the hardware page-wrap quirk: a vector at
  $xxFF fetches its high byte from $xx00, not from the next page.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::state::{CpuState, Register};

/// The twelve operand-taking addressing modes of the 6502.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    Immediate,
    ZeroPage,
    ZeroPageX,
    ZeroPageY,
    Absolute,
    AbsoluteX,
    AbsoluteY,
    Indirect,
    IndirectX,
    IndirectY,
    Accumulator,
    Relative,
}

impl AddressingMode {
    pub const ALL: [AddressingMode; 12] = [
        AddressingMode::Immediate,
        AddressingMode::ZeroPage,
        AddressingMode::ZeroPageX,
        AddressingMode::ZeroPageY,
        AddressingMode::Absolute,
        AddressingMode::AbsoluteX,
        AddressingMode::AbsoluteY,
        AddressingMode::Indirect,
        AddressingMode::IndirectX,
        AddressingMode::IndirectY,
        AddressingMode::Accumulator,
        AddressingMode::Relative,
    ];

    /// Number of operand bytes following the opcode.
    pub fn operand_len(self) -> u16 {
        match self {
            AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

/// Where an operand lives: a bus address or a register. Loads and
/// stores accept either without caring which.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Address {
    Memory(u16),
    Register(Register),
}

/// Fetch the next byte of the instruction stream, advancing PC.
pub(crate) fn fetch_byte(state: &mut CpuState, bus: &mut Bus) -> Result<u8, BusError> {
    let v = bus.read(state.pc)?;
    state.advance_pc(1);
    Ok(v)
}

/// Fetch the next little-endian word, advancing PC twice.
pub(crate) fn fetch_word(state: &mut CpuState, bus: &mut Bus) -> Result<u16, BusError> {
    let lo = fetch_byte(state, bus)? as u16;
    let hi = fetch_byte(state, bus)? as u16;
    Ok((hi << 8) | lo)
}

/// Consume the operand bytes for `mode` and produce the effective
/// target.
pub(crate) fn resolve(
    state: &mut CpuState,
    bus: &mut Bus,
    mode: AddressingMode,
) -> Result<Address, BusError> {
    let addr = match mode {
        AddressingMode::Accumulator => return Ok(Address::Register(Register::A)),
        AddressingMode::Immediate => {
            let at = state.pc;
            state.advance_pc(1);
            at
        }
        AddressingMode::ZeroPage => fetch_byte(state, bus)? as u16,
        AddressingMode::ZeroPageX => fetch_byte(state, bus)?.wrapping_add(state.x) as u16,
        AddressingMode::ZeroPageY => fetch_byte(state, bus)?.wrapping_add(state.y) as u16,
        AddressingMode::Absolute => fetch_word(state, bus)?,
        AddressingMode::AbsoluteX => fetch_word(state, bus)?.wrapping_add(state.x as u16),
        AddressingMode::AbsoluteY => fetch_word(state, bus)?.wrapping_add(state.y as u16),
        AddressingMode::Indirect => {
            let vector = fetch_word(state, bus)?;
            read_word_indirect_bug(bus, vector)?
        }
        AddressingMode::IndirectX => {
            let zp = fetch_byte(state, bus)?.wrapping_add(state.x);
            read_word_zp(bus, zp)?
        }
        AddressingMode::IndirectY => {
            let zp = fetch_byte(state, bus)?;
            read_word_zp(bus, zp)?.wrapping_add(state.y as u16)
        }
        AddressingMode::Relative => {
            let offset = fetch_byte(state, bus)? as i8;
            state.pc.wrapping_add(offset as u16)
        }
    };
    Ok(Address::Memory(addr))
}

/// Read a 16-bit pointer from zero page; the high byte address wraps
/// within the page (standard zero-page indirect behavior).
pub(crate) fn read_word_zp(bus: &mut Bus, base: u8) -> Result<u16, BusError> {
    let lo = bus.read(base as u16)? as u16;
    let hi = bus.read(base.wrapping_add(1) as u16)? as u16;
    Ok((hi << 8) | lo)
}

/// JMP (indirect) hardware quirk: the high byte of the vector never
/// crosses a page boundary.
pub(crate) fn read_word_indirect_bug(bus: &mut Bus, addr: u16) -> Result<u16, BusError> {
    let lo = bus.read(addr)? as u16;
    let hi_addr = (addr & 0xFF00) | (addr.wrapping_add(1) & 0x00FF);
    let hi = bus.read(hi_addr)? as u16;
    Ok((hi << 8) | lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(bytes: &[u8]) -> (CpuState, Bus) {
        let mut bus = Bus::new();
        bus.load(bytes, 0x0600).expect("load");
        let mut state = CpuState::new();
        state.pc = 0x0600;
        (state, bus)
    }

    #[test]
    fn immediate_points_at_operand_byte() {
        let (mut state, mut bus) = setup(&[0x44]);
        let addr = resolve(&mut state, &mut bus, AddressingMode::Immediate).unwrap();
        assert_eq!(addr, Address::Memory(0x0600));
        assert_eq!(state.pc, 0x0601);
    }

    #[test]
    fn zero_page_indexed_wraps_in_page() {
        let (mut state, mut bus) = setup(&[0xF0]);
        state.x = 0x20;
        let addr = resolve(&mut state, &mut bus, AddressingMode::ZeroPageX).unwrap();
        // 0xF0 + 0x20 wraps to 0x10 inside the zero page.
        assert_eq!(addr, Address::Memory(0x0010));
    }

    #[test]
    fn absolute_indexed_adds_in_16_bits() {
        let (mut state, mut bus) = setup(&[0xFF, 0x02]);
        state.y = 0x03;
        let addr = resolve(&mut state, &mut bus, AddressingMode::AbsoluteY).unwrap();
        assert_eq!(addr, Address::Memory(0x0302));
        assert_eq!(state.pc, 0x0602);
    }

    #[test]
    fn indirect_x_reads_pointer_from_zero_page() {
        let (mut state, mut bus) = setup(&[0x20]);
        state.x = 0x04;
        bus.write(0x0024, 0x34).unwrap();
        bus.write(0x0025, 0x12).unwrap();
        let addr = resolve(&mut state, &mut bus, AddressingMode::IndirectX).unwrap();
        assert_eq!(addr, Address::Memory(0x1234));
    }

    #[test]
    fn indirect_y_adds_after_pointer_fetch() {
        let (mut state, mut bus) = setup(&[0x40]);
        state.y = 0x10;
        bus.write(0x0040, 0x00).unwrap();
        bus.write(0x0041, 0x03).unwrap();
        let addr = resolve(&mut state, &mut bus, AddressingMode::IndirectY).unwrap();
        assert_eq!(addr, Address::Memory(0x0310));
    }

    #[test]
    fn zero_page_pointer_high_byte_wraps() {
        let (mut state, mut bus) = setup(&[0xFF]);
        bus.write(0x00FF, 0xCD).unwrap();
        bus.write(0x0000, 0x01).unwrap();
        let addr = resolve(&mut state, &mut bus, AddressingMode::IndirectY).unwrap();
        assert_eq!(addr, Address::Memory(0x01CD));
    }

    #[test]
    fn jmp_indirect_page_wrap_quirk() {
        let mut bus = Bus::new();
        bus.write(0x01FF, 0x34).unwrap();
        bus.write(0x0100, 0x12).unwrap();
        bus.write(0x0200, 0x99).unwrap(); // would be the high byte without the quirk
        let target = read_word_indirect_bug(&mut bus, 0x01FF).unwrap();
        assert_eq!(target, 0x1234);
    }

    #[test]
    fn relative_is_signed_from_pc_after_operand() {
        // Offset -2 lands back on the opcode that fetched it.
        let (mut state, mut bus) = setup(&[0xFE]);
        let addr = resolve(&mut state, &mut bus, AddressingMode::Relative).unwrap();
        assert_eq!(state.pc, 0x0601);
        assert_eq!(addr, Address::Memory(0x05FF));

        let (mut state, mut bus) = setup(&[0x05]);
        let addr = resolve(&mut state, &mut bus, AddressingMode::Relative).unwrap();
        assert_eq!(addr, Address::Memory(0x0606));
    }

    #[test]
    fn accumulator_resolves_to_register() {
        let (mut state, mut bus) = setup(&[]);
        let addr = resolve(&mut state, &mut bus, AddressingMode::Accumulator).unwrap();
        assert_eq!(addr, Address::Register(Register::A));
    }
}
