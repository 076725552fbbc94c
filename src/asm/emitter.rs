/*!
emitter.rs - AST to machine code.

Second pass of label resolution: the AST fixed every offset, so label
references can now be patched to absolute addresses (JMP/JSR) or
PC-relative signed offsets (branches). Opcode bytes come from the
shared tables in `cpu::table`, which is what keeps the emitter and the
executor agreeing on the encoding.

All 16-bit operands are written little-endian. Zero-page and immediate
operands keep only their low byte.
*/

use thiserror::Error;

use crate::asm::ast::{IndexRegister, Instruction, InstructionArg, Node, Program};
use crate::cpu::addressing::AddressingMode;
use crate::cpu::table::{implied_opcode, opcode_for, Mnemonic};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EmitError {
    #[error("{mnemonic} requires an argument")]
    MissingArgument { mnemonic: Mnemonic },
    #[error("{mnemonic} does not take a {variant} argument")]
    UnexpectedArgument {
        mnemonic: Mnemonic,
        variant: &'static str,
    },
    #[error("label '{0}' is not defined")]
    LabelNotFound(String),
    #[error("branch to '{label}' is out of range ({distance} bytes)")]
    BranchOutOfRange { label: String, distance: i32 },
}

/// Emit the program as a byte buffer of exactly `program.len` bytes.
/// `origin` is the address the buffer will be loaded at; label
/// references on JMP/JSR resolve against it.
pub fn emit(program: &Program, origin: u16) -> Result<Vec<u8>, EmitError> {
    let mut out = Vec::with_capacity(program.len as usize);
    for node in &program.nodes {
        let Node::Instruction(inst) = node else {
            continue;
        };
        match &inst.arg {
            None => {
                let byte = implied_opcode(inst.mnemonic).ok_or(EmitError::MissingArgument {
                    mnemonic: inst.mnemonic,
                })?;
                out.push(byte);
            }
            Some(arg) => emit_with_argument(program, origin, inst, arg, &mut out)?,
        }
    }
    Ok(out)
}

fn emit_with_argument(
    program: &Program,
    origin: u16,
    inst: &Instruction,
    arg: &InstructionArg,
    out: &mut Vec<u8>,
) -> Result<(), EmitError> {
    let (mode, value) = match arg {
        InstructionArg::Immediate(n) => (AddressingMode::Immediate, *n),
        InstructionArg::ZeroPage(n) => (AddressingMode::ZeroPage, *n),
        InstructionArg::ZeroPageIndexed(n, IndexRegister::X) => (AddressingMode::ZeroPageX, *n),
        InstructionArg::ZeroPageIndexed(n, IndexRegister::Y) => (AddressingMode::ZeroPageY, *n),
        InstructionArg::Absolute(n) => (AddressingMode::Absolute, *n),
        InstructionArg::AbsoluteIndexed(n, IndexRegister::X) => (AddressingMode::AbsoluteX, *n),
        InstructionArg::AbsoluteIndexed(n, IndexRegister::Y) => (AddressingMode::AbsoluteY, *n),
        InstructionArg::Indirect(n) => (AddressingMode::Indirect, *n),
        InstructionArg::IndirectIndexed(n, IndexRegister::X) => (AddressingMode::IndirectX, *n),
        InstructionArg::IndirectIndexed(n, IndexRegister::Y) => (AddressingMode::IndirectY, *n),
        InstructionArg::Relative(n) => (AddressingMode::Relative, *n),
        InstructionArg::Accumulator => (AddressingMode::Accumulator, 0),
        InstructionArg::Label(name) => resolve_label(program, origin, inst, name)?,
    };

    let byte = opcode_for(inst.mnemonic, mode).ok_or(EmitError::UnexpectedArgument {
        mnemonic: inst.mnemonic,
        variant: variant_name(arg),
    })?;
    out.push(byte);
    match mode.operand_len() {
        0 => {}
        1 => out.push((value & 0x00FF) as u8),
        _ => {
            out.push((value & 0x00FF) as u8);
            out.push((value >> 8) as u8);
        }
    }
    Ok(())
}

/// Turn a label reference into an addressing mode and operand value:
/// absolute address for jumps, signed 8-bit offset for branches.
fn resolve_label(
    program: &Program,
    origin: u16,
    inst: &Instruction,
    name: &str,
) -> Result<(AddressingMode, u16), EmitError> {
    let target = *program
        .labels
        .get(name)
        .ok_or_else(|| EmitError::LabelNotFound(name.to_string()))?;

    if inst.mnemonic.is_branch() {
        // Offset is relative to the PC after the two branch bytes.
        let distance = target as i32 - (inst.offset as i32 + 2);
        if !(-128..=127).contains(&distance) {
            return Err(EmitError::BranchOutOfRange {
                label: name.to_string(),
                distance,
            });
        }
        Ok((AddressingMode::Relative, (distance as i8 as u8) as u16))
    } else if inst.mnemonic.is_jump() {
        Ok((AddressingMode::Absolute, origin.wrapping_add(target)))
    } else {
        Err(EmitError::UnexpectedArgument {
            mnemonic: inst.mnemonic,
            variant: "label",
        })
    }
}

fn variant_name(arg: &InstructionArg) -> &'static str {
    match arg {
        InstructionArg::Immediate(_) => "immediate",
        InstructionArg::Indirect(_) => "indirect",
        InstructionArg::IndirectIndexed(..) => "indexed indirect",
        InstructionArg::Absolute(_) => "absolute",
        InstructionArg::AbsoluteIndexed(..) => "indexed absolute",
        InstructionArg::ZeroPage(_) => "zero page",
        InstructionArg::ZeroPageIndexed(..) => "indexed zero page",
        InstructionArg::Relative(_) => "relative",
        InstructionArg::Accumulator => "accumulator",
        InstructionArg::Label(_) => "label",
    }
}
