/*!
branches.rs - Conditional branch opcode family.

The relative operand is resolved against PC after the offset byte; a
branch that is not taken still consumes the offset.
*/

use crate::bus::Bus;
use crate::cpu::addressing::{resolve, Address, AddressingMode};
use crate::cpu::state::{CpuState, CARRY, NEGATIVE, OVERFLOW, ZERO};
use crate::cpu::CpuError;

pub(super) fn handle(opcode: u8, state: &mut CpuState, bus: &mut Bus) -> Result<bool, CpuError> {
    let take = match opcode {
        0x10 => !state.get_flag(NEGATIVE), // BPL
        0x30 => state.get_flag(NEGATIVE),  // BMI
        0x50 => !state.get_flag(OVERFLOW), // BVC
        0x70 => state.get_flag(OVERFLOW),  // BVS
        0x90 => !state.get_flag(CARRY),    // BCC
        0xB0 => state.get_flag(CARRY),     // BCS
        0xD0 => !state.get_flag(ZERO),     // BNE
        0xF0 => state.get_flag(ZERO),      // BEQ
        _ => return Ok(false),
    };

    let target = resolve(state, bus, AddressingMode::Relative)?;
    if take {
        if let Address::Memory(addr) = target {
            state.pc = addr;
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use crate::cpu::state::{Register, CARRY, NEGATIVE, OVERFLOW, ZERO};
    use crate::cpu::{Cpu, CpuStatus};

    /// Run a single branch with the given status byte. The program
    /// takes the branch to LDA #$FF, or falls through to LDA #$01.
    fn run_branch(opcode: u8, status: u8) -> u8 {
        let program = [
            opcode, 0x03, // branch +3 (to $0605)
            0xA9, 0x01, // LDA #$01
            0x00, // BRK
            0xA9, 0xFF, // LDA #$FF
            0x00, // BRK
        ];
        let mut cpu = Cpu::new();
        cpu.load(&program).unwrap();
        cpu.reset().unwrap();
        cpu.set_register(Register::P, status);
        loop {
            if let CpuStatus::Interrupted(_) = cpu.step().unwrap() {
                return cpu.a();
            }
        }
    }

    #[test]
    fn conditions_match_the_documented_table() {
        let cases: [(u8, u8); 8] = [
            (0x10, NEGATIVE), // BPL taken when N = 0
            (0x30, NEGATIVE), // BMI taken when N = 1
            (0x50, OVERFLOW), // BVC taken when V = 0
            (0x70, OVERFLOW), // BVS taken when V = 1
            (0x90, CARRY),    // BCC taken when C = 0
            (0xB0, CARRY),    // BCS taken when C = 1
            (0xD0, ZERO),     // BNE taken when Z = 0
            (0xF0, ZERO),     // BEQ taken when Z = 1
        ];
        for (opcode, flag) in cases {
            // Opcodes with bit 5 set branch on the flag being set.
            let takes_when_set = opcode & 0x20 != 0;
            let (set, clear) = (run_branch(opcode, flag), run_branch(opcode, 0));
            if takes_when_set {
                assert_eq!(set, 0xFF, "opcode {opcode:#04X} with flag set");
                assert_eq!(clear, 0x01, "opcode {opcode:#04X} with flag clear");
            } else {
                assert_eq!(set, 0x01, "opcode {opcode:#04X} with flag set");
                assert_eq!(clear, 0xFF, "opcode {opcode:#04X} with flag clear");
            }
        }
    }

    #[test]
    fn untaken_branch_consumes_the_offset() {
        // BNE with Z set falls through to the next instruction.
        let mut cpu = Cpu::new();
        cpu.load(&[0xD0, 0x10, 0xA9, 0x07, 0x00]).unwrap();
        cpu.reset().unwrap();
        cpu.set_register(Register::P, ZERO | 0x24);
        assert_eq!(cpu.step().unwrap(), CpuStatus::Ok);
        assert_eq!(cpu.pc(), 0x0602);
    }

    #[test]
    fn backward_branch_loops() {
        // LDX #$03 ; loop: DEX ; BNE loop ; BRK
        let mut cpu = Cpu::new();
        cpu.load_and_run(&[0xA2, 0x03, 0xCA, 0xD0, 0xFD, 0x00]).unwrap();
        assert_eq!(cpu.x(), 0x00);
    }
}
