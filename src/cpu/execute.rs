/*!
execute.rs - Instruction semantic helpers (ALU, flags, stack, branch).

Side-effect logic for instructions lives here so the per-family
dispatchers stay thin opcode matches. Helpers take the operand value or
resolved `Address`, mutate `CpuState`, and leave fetching/storing
choreography to the caller.

Shifts and rotates are pure value transforms: the dispatcher loads from
the resolved address (accumulator or memory), transforms, and stores
back to the same address, so the two destinations cannot cross-modify.

Stack helpers enforce the page-1 bounds: pushing with S at 0x00 or
popping with S at the 0xFF logical bottom is a `StackError` rather than
a silent wrap.
*/

use crate::bus::{Bus, BusError};
use crate::cpu::addressing::Address;
use crate::cpu::state::{CpuState, CARRY, NEGATIVE, OVERFLOW, STACK_BASE, UNUSED, ZERO};
use crate::cpu::{CpuError, StackError};

// ---------------------------------------------------------------------------
// Uniform operand access through a resolved Address
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn load_operand(
    state: &CpuState,
    bus: &mut Bus,
    addr: Address,
) -> Result<u8, BusError> {
    match addr {
        Address::Memory(a) => bus.read(a),
        Address::Register(r) => Ok(state.register(r)),
    }
}

#[inline]
pub(crate) fn store_operand(
    state: &mut CpuState,
    bus: &mut Bus,
    addr: Address,
    value: u8,
) -> Result<(), BusError> {
    match addr {
        Address::Memory(a) => bus.write(a, value),
        Address::Register(r) => {
            state.set_register(r, value);
            Ok(())
        }
    }
}

// ---------------------------------------------------------------------------
// Stack
// ---------------------------------------------------------------------------

pub(crate) fn push(state: &mut CpuState, bus: &mut Bus, value: u8) -> Result<(), CpuError> {
    if state.sp == 0x00 {
        return Err(StackError::Overflow.into());
    }
    bus.write(STACK_BASE | state.sp as u16, value)?;
    state.sp = state.sp.wrapping_sub(1);
    Ok(())
}

pub(crate) fn pop(state: &mut CpuState, bus: &mut Bus) -> Result<u8, CpuError> {
    if state.sp == 0xFF {
        return Err(StackError::Underflow.into());
    }
    state.sp = state.sp.wrapping_add(1);
    Ok(bus.read(STACK_BASE | state.sp as u16)?)
}

/// Push a word, high byte first, so the low byte ends up at the lower
/// stack address.
pub(crate) fn push_word(state: &mut CpuState, bus: &mut Bus, value: u16) -> Result<(), CpuError> {
    push(state, bus, (value >> 8) as u8)?;
    push(state, bus, (value & 0x00FF) as u8)
}

pub(crate) fn pop_word(state: &mut CpuState, bus: &mut Bus) -> Result<u16, CpuError> {
    let lo = pop(state, bus)? as u16;
    let hi = pop(state, bus)? as u16;
    Ok((hi << 8) | lo)
}

/// Push P with control over the Break flag (BRK/PHP set it, hardware
/// interrupt entry clears it).
pub(crate) fn push_status(state: &mut CpuState, bus: &mut Bus, set_break: bool) -> Result<(), CpuError> {
    let v = state.status_for_push(set_break);
    push(state, bus, v)
}

pub(crate) fn pla(state: &mut CpuState, bus: &mut Bus) -> Result<(), CpuError> {
    let v = pop(state, bus)?;
    state.a = v;
    state.update_zn(v);
    Ok(())
}

pub(crate) fn plp(state: &mut CpuState, bus: &mut Bus) -> Result<(), CpuError> {
    let v = pop(state, bus)?;
    state.status = (v | UNUSED) & !crate::cpu::state::BREAK;
    Ok(())
}

// ---------------------------------------------------------------------------
// Loads / transfers
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn lda(state: &mut CpuState, v: u8) {
    state.a = v;
    state.update_zn(v);
}

#[inline]
pub(crate) fn ldx(state: &mut CpuState, v: u8) {
    state.x = v;
    state.update_zn(v);
}

#[inline]
pub(crate) fn ldy(state: &mut CpuState, v: u8) {
    state.y = v;
    state.update_zn(v);
}

#[inline]
pub(crate) fn tax(state: &mut CpuState) {
    state.x = state.a;
    state.update_zn(state.x);
}

#[inline]
pub(crate) fn tay(state: &mut CpuState) {
    state.y = state.a;
    state.update_zn(state.y);
}

#[inline]
pub(crate) fn txa(state: &mut CpuState) {
    state.a = state.x;
    state.update_zn(state.a);
}

#[inline]
pub(crate) fn tya(state: &mut CpuState) {
    state.a = state.y;
    state.update_zn(state.a);
}

#[inline]
pub(crate) fn tsx(state: &mut CpuState) {
    state.x = state.sp;
    state.update_zn(state.x);
}

#[inline]
pub(crate) fn txs(state: &mut CpuState) {
    // No flags; the one transfer that skips the Z/N update.
    state.sp = state.x;
}

// ---------------------------------------------------------------------------
// Logic
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn and(state: &mut CpuState, v: u8) {
    state.a &= v;
    state.update_zn(state.a);
}

#[inline]
pub(crate) fn ora(state: &mut CpuState, v: u8) {
    state.a |= v;
    state.update_zn(state.a);
}

#[inline]
pub(crate) fn eor(state: &mut CpuState, v: u8) {
    state.a ^= v;
    state.update_zn(state.a);
}

#[inline]
pub(crate) fn bit(state: &mut CpuState, v: u8) {
    state.set_flag(ZERO, (state.a & v) == 0);
    state.set_flag(NEGATIVE, (v & 0x80) != 0);
    state.set_flag(OVERFLOW, (v & 0x40) != 0);
}

// ---------------------------------------------------------------------------
// Register increment / decrement
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn inx(state: &mut CpuState) {
    state.x = state.x.wrapping_add(1);
    state.update_zn(state.x);
}

#[inline]
pub(crate) fn iny(state: &mut CpuState) {
    state.y = state.y.wrapping_add(1);
    state.update_zn(state.y);
}

#[inline]
pub(crate) fn dex(state: &mut CpuState) {
    state.x = state.x.wrapping_sub(1);
    state.update_zn(state.x);
}

#[inline]
pub(crate) fn dey(state: &mut CpuState) {
    state.y = state.y.wrapping_sub(1);
    state.update_zn(state.y);
}

// ---------------------------------------------------------------------------
// Arithmetic
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn adc(state: &mut CpuState, v: u8) {
    let a = state.a;
    let carry_in = u16::from(state.get_flag(CARRY));
    let sum = a as u16 + v as u16 + carry_in;
    let result = sum as u8;

    state.set_flag(CARRY, sum > 0xFF);
    // Signed overflow: inputs agree in sign, result disagrees.
    state.set_flag(OVERFLOW, (!(a ^ v) & (a ^ result) & 0x80) != 0);
    state.a = result;
    state.update_zn(result);
}

/// SBC is ADC of the complemented operand: A - v - (1 - C).
#[inline]
pub(crate) fn sbc(state: &mut CpuState, v: u8) {
    adc(state, v ^ 0xFF);
}

/// Shared CMP/CPX/CPY: carry is the unnarrowed register >= operand
/// comparison, Z/N come from the wrapped difference.
#[inline]
pub(crate) fn compare(state: &mut CpuState, register: u8, v: u8) {
    state.set_flag(CARRY, register >= v);
    state.update_zn(register.wrapping_sub(v));
}

#[inline]
pub(crate) fn cmp(state: &mut CpuState, v: u8) {
    let r = state.a;
    compare(state, r, v);
}

#[inline]
pub(crate) fn cpx(state: &mut CpuState, v: u8) {
    let r = state.x;
    compare(state, r, v);
}

#[inline]
pub(crate) fn cpy(state: &mut CpuState, v: u8) {
    let r = state.y;
    compare(state, r, v);
}

// ---------------------------------------------------------------------------
// Shifts / rotates (pure value transforms)
// ---------------------------------------------------------------------------

#[inline]
pub(crate) fn asl(state: &mut CpuState, v: u8) -> u8 {
    state.set_flag(CARRY, (v & 0x80) != 0);
    v << 1
}

#[inline]
pub(crate) fn lsr(state: &mut CpuState, v: u8) -> u8 {
    state.set_flag(CARRY, (v & 0x01) != 0);
    v >> 1
}

#[inline]
pub(crate) fn rol(state: &mut CpuState, v: u8) -> u8 {
    let carry_in = u8::from(state.get_flag(CARRY));
    state.set_flag(CARRY, (v & 0x80) != 0);
    (v << 1) | carry_in
}

#[inline]
pub(crate) fn ror(state: &mut CpuState, v: u8) -> u8 {
    let carry_in = if state.get_flag(CARRY) { 0x80 } else { 0 };
    state.set_flag(CARRY, (v & 0x01) != 0);
    (v >> 1) | carry_in
}
