/*!
control_flow.rs - JMP/JSR/RTS/RTI/BRK opcode family.

The one family whose handler can end the step with something other than
`CpuStatus::Ok`: BRK pushes return state like the hardware does, sets
the interrupt-disable flag, and then surfaces to the host as an IRQ
event instead of vectoring (the run loop exits on it).
*/

use crate::bus::Bus;
use crate::cpu::addressing::{fetch_word, resolve, Address, AddressingMode};
use crate::cpu::execute::{plp, pop_word, push_status, push_word};
use crate::cpu::state::{CpuState, IRQ_DISABLE};
use crate::cpu::{CpuError, CpuStatus, Interrupt};

/// Execute a control-flow opcode. `Ok(None)` means the opcode belongs
/// to another family.
pub(super) fn handle(
    opcode: u8,
    state: &mut CpuState,
    bus: &mut Bus,
) -> Result<Option<CpuStatus>, CpuError> {
    match opcode {
        // JMP absolute
        0x4C => {
            state.pc = fetch_word(state, bus)?;
        }
        // JMP (indirect)
        0x6C => {
            if let Address::Memory(target) = resolve(state, bus, AddressingMode::Indirect)? {
                state.pc = target;
            }
        }
        // JSR: push the address of the byte before the return target.
        0x20 => {
            let target = fetch_word(state, bus)?;
            let ret = state.pc.wrapping_sub(1);
            push_word(state, bus, ret)?;
            state.pc = target;
        }
        // RTS
        0x60 => {
            state.pc = pop_word(state, bus)?.wrapping_add(1);
        }
        // RTI: status first, then PC.
        0x40 => {
            plp(state, bus)?;
            state.pc = pop_word(state, bus)?;
        }
        // BRK
        0x00 => {
            let ret = state.pc.wrapping_add(1);
            push_word(state, bus, ret)?;
            push_status(state, bus, true)?;
            state.set_flag(IRQ_DISABLE, true);
            return Ok(Some(CpuStatus::Interrupted(Interrupt::Irq)));
        }
        _ => return Ok(None),
    }
    Ok(Some(CpuStatus::Ok))
}
