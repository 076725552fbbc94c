/*!
dispatch - Orchestrator for a single CPU instruction step.

Per step, in order:
1. Service a pending NMI, then a maskable IRQ (push PC and status with
   Break clear, set I, load the vector) and report `Interrupted`.
2. Fetch the opcode and offer it to each family handler in turn.
3. Anything unclaimed is an undocumented opcode: a fault in strict
   mode, otherwise logged and executed as NOP.

The cycle cost of whatever this step will do is computed by the facade
before calling in (so the cycle hook can wrap the work); handlers here
only execute semantics.
*/

pub(crate) mod arithmetic;
pub(crate) mod branches;
pub(crate) mod compare;
pub(crate) mod control_flow;
pub(crate) mod load_store;
pub(crate) mod logical;
pub(crate) mod misc;
pub(crate) mod rmw;

use log::warn;

use crate::bus::Bus;
use crate::cpu::addressing::fetch_byte;
use crate::cpu::execute::{push_status, push_word};
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::cpu::{CpuError, CpuStatus, Interrupt};

/// NMI service vector.
pub(crate) const NMI_VECTOR: u16 = 0xFFFA;
/// IRQ/BRK service vector.
pub(crate) const IRQ_VECTOR: u16 = 0xFFFE;

/// Execute one instruction (or interrupt entry) and report the
/// resulting CPU status.
pub(crate) fn step(state: &mut CpuState, bus: &mut Bus, strict: bool) -> Result<CpuStatus, CpuError> {
    // NMI wins over everything and ignores the I flag.
    if bus.nmi_pending {
        bus.nmi_pending = false;
        service_interrupt(state, bus, NMI_VECTOR)?;
        return Ok(CpuStatus::Interrupted(Interrupt::Nmi));
    }
    // IRQ is level-triggered; the host owns the line.
    if bus.irq_line && !state.get_flag(IRQ_DISABLE) {
        service_interrupt(state, bus, IRQ_VECTOR)?;
        return Ok(CpuStatus::Interrupted(Interrupt::Irq));
    }

    let opcode = fetch_byte(state, bus)?;

    if load_store::handle(opcode, state, bus)? {
        return Ok(CpuStatus::Ok);
    }
    if arithmetic::handle(opcode, state, bus)? {
        return Ok(CpuStatus::Ok);
    }
    if logical::handle(opcode, state, bus)? {
        return Ok(CpuStatus::Ok);
    }
    if compare::handle(opcode, state, bus)? {
        return Ok(CpuStatus::Ok);
    }
    if rmw::handle(opcode, state, bus)? {
        return Ok(CpuStatus::Ok);
    }
    if branches::handle(opcode, state, bus)? {
        return Ok(CpuStatus::Ok);
    }
    if let Some(status) = control_flow::handle(opcode, state, bus)? {
        return Ok(status);
    }
    if misc::handle(opcode, state, bus)? {
        return Ok(CpuStatus::Ok);
    }

    let at = state.pc.wrapping_sub(1);
    if strict {
        return Err(CpuError::IllegalOpcode { opcode, pc: at });
    }
    warn!("undocumented opcode ${opcode:02X} at ${at:04X}; executing as NOP");
    Ok(CpuStatus::Ok)
}

/// Hardware interrupt entry: push PC, push status with Break clear,
/// set I, load the vector.
fn service_interrupt(state: &mut CpuState, bus: &mut Bus, vector: u16) -> Result<(), CpuError> {
    let pc = state.pc;
    push_word(state, bus, pc)?;
    push_status(state, bus, false)?;
    state.set_flag(IRQ_DISABLE, true);
    state.pc = bus.read_word(vector)?;
    Ok(())
}
