/*!
disasm.rs - Reference disassembler for round-trip tests.

Decodes a byte buffer back into (mnemonic, addressing mode, operand)
triples by inverting the shared opcode tables. Test-only by design: the
emulator never needs it, but the assembler tests use it to prove that
every encodable instruction decodes back to the same shape, and its
`format` output makes failures readable.
*/

use crate::cpu::addressing::AddressingMode;
use crate::cpu::table::{decode, Mnemonic};

/// One decoded instruction. `mode` is `None` for implied forms and the
/// operand is the raw little-endian value of the operand bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisInstruction {
    pub mnemonic: Mnemonic,
    pub mode: Option<AddressingMode>,
    pub operand: u16,
}

impl DisInstruction {
    /// Render in the assembler's own source syntax.
    pub fn format(&self) -> String {
        use AddressingMode as M;
        let m = self.mnemonic;
        let n = self.operand;
        match self.mode {
            None => format!("{m}"),
            Some(M::Immediate) => format!("{m} #0x{n:02X}"),
            Some(M::ZeroPage) => format!("{m} #(0x{n:02X})"),
            Some(M::ZeroPageX) => format!("{m} #(0x{n:02X}, X)"),
            Some(M::ZeroPageY) => format!("{m} #(0x{n:02X}, Y)"),
            Some(M::Absolute) => format!("{m} 0x{n:04X}"),
            Some(M::AbsoluteX) => format!("{m} 0x{n:04X}, X"),
            Some(M::AbsoluteY) => format!("{m} 0x{n:04X}, Y"),
            Some(M::Indirect) => format!("{m} (0x{n:04X})"),
            Some(M::IndirectX) => format!("{m} (0x{n:02X}, X)"),
            Some(M::IndirectY) => format!("{m} (0x{n:02X}, Y)"),
            Some(M::Accumulator) => format!("{m} A"),
            Some(M::Relative) => format!("{m} 0x{n:02X}"),
        }
    }
}

/// Decode a full buffer. Fails on bytes that are not documented
/// opcodes or on truncated operands.
pub fn disassemble(bytes: &[u8]) -> Result<Vec<DisInstruction>, String> {
    let mut out = Vec::new();
    let mut cursor = 0usize;
    while cursor < bytes.len() {
        let opcode = bytes[cursor];
        let (mnemonic, mode) = decode(opcode)
            .ok_or_else(|| format!("undocumented opcode ${opcode:02X} at offset {cursor}"))?;
        cursor += 1;

        let operand_len = mode.map_or(0, |m| m.operand_len()) as usize;
        if cursor + operand_len > bytes.len() {
            return Err(format!(
                "truncated operand for {mnemonic} at offset {}",
                cursor - 1
            ));
        }
        let operand = match operand_len {
            0 => 0,
            1 => bytes[cursor] as u16,
            _ => bytes[cursor] as u16 | ((bytes[cursor + 1] as u16) << 8),
        };
        cursor += operand_len;

        out.push(DisInstruction {
            mnemonic,
            mode,
            operand,
        });
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_short_program() {
        // LDA #$05; TAX; STA $0200; BRK
        let bytes = [0xA9, 0x05, 0xAA, 0x8D, 0x00, 0x02, 0x00];
        let listing = disassemble(&bytes).expect("decodes");
        assert_eq!(listing.len(), 4);
        assert_eq!(listing[0].mnemonic, Mnemonic::Lda);
        assert_eq!(listing[0].mode, Some(AddressingMode::Immediate));
        assert_eq!(listing[0].operand, 0x05);
        assert_eq!(listing[1].mnemonic, Mnemonic::Tax);
        assert_eq!(listing[1].mode, None);
        assert_eq!(listing[2].operand, 0x0200);
        assert_eq!(listing[3].mnemonic, Mnemonic::Brk);
    }

    #[test]
    fn formats_in_source_syntax() {
        let listing = disassemble(&[0xBD, 0x34, 0x12]).unwrap();
        assert_eq!(listing[0].format(), "LDA 0x1234, X");
        let listing = disassemble(&[0x0A]).unwrap();
        assert_eq!(listing[0].format(), "ASL A");
    }

    #[test]
    fn rejects_undocumented_bytes() {
        assert!(disassemble(&[0x02]).is_err());
    }

    #[test]
    fn rejects_truncated_operands() {
        assert!(disassemble(&[0xAD, 0x00]).is_err());
    }
}
