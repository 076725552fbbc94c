/*!
table.rs - Mnemonics and the canonical (mnemonic, addressing mode) ⇄
opcode byte tables.

The executor dispatches on raw opcode bytes (see `dispatch/`), so these
tables exist for the other direction of the pipeline: the assembler
emitter selects opcode bytes here, and the reference disassembler in
`test_utils` inverts the same data by scanning it. Keeping both lookups
in this one module is what keeps emitter and executor agreeing on the
encoding.
*/

use crate::cpu::addressing::AddressingMode;

/// The 56 documented 6502 instruction mnemonics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx,
    Iny, Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp,
    Rol, Ror, Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay,
    Tsx, Txa, Txs, Tya,
}

impl Mnemonic {
    #[rustfmt::skip]
    pub const ALL: [Mnemonic; 56] = [
        Mnemonic::Adc, Mnemonic::And, Mnemonic::Asl, Mnemonic::Bcc,
        Mnemonic::Bcs, Mnemonic::Beq, Mnemonic::Bit, Mnemonic::Bmi,
        Mnemonic::Bne, Mnemonic::Bpl, Mnemonic::Brk, Mnemonic::Bvc,
        Mnemonic::Bvs, Mnemonic::Clc, Mnemonic::Cld, Mnemonic::Cli,
        Mnemonic::Clv, Mnemonic::Cmp, Mnemonic::Cpx, Mnemonic::Cpy,
        Mnemonic::Dec, Mnemonic::Dex, Mnemonic::Dey, Mnemonic::Eor,
        Mnemonic::Inc, Mnemonic::Inx, Mnemonic::Iny, Mnemonic::Jmp,
        Mnemonic::Jsr, Mnemonic::Lda, Mnemonic::Ldx, Mnemonic::Ldy,
        Mnemonic::Lsr, Mnemonic::Nop, Mnemonic::Ora, Mnemonic::Pha,
        Mnemonic::Php, Mnemonic::Pla, Mnemonic::Plp, Mnemonic::Rol,
        Mnemonic::Ror, Mnemonic::Rti, Mnemonic::Rts, Mnemonic::Sbc,
        Mnemonic::Sec, Mnemonic::Sed, Mnemonic::Sei, Mnemonic::Sta,
        Mnemonic::Stx, Mnemonic::Sty, Mnemonic::Tax, Mnemonic::Tay,
        Mnemonic::Tsx, Mnemonic::Txa, Mnemonic::Txs, Mnemonic::Tya,
    ];

    /// Parse a mnemonic, case-insensitively.
    pub fn from_str(s: &str) -> Option<Mnemonic> {
        let upper = s.to_ascii_uppercase();
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == upper)
    }

    /// The canonical upper-case assembler spelling.
    #[rustfmt::skip]
    pub fn as_str(self) -> &'static str {
        match self {
            Mnemonic::Adc => "ADC", Mnemonic::And => "AND", Mnemonic::Asl => "ASL",
            Mnemonic::Bcc => "BCC", Mnemonic::Bcs => "BCS", Mnemonic::Beq => "BEQ",
            Mnemonic::Bit => "BIT", Mnemonic::Bmi => "BMI", Mnemonic::Bne => "BNE",
            Mnemonic::Bpl => "BPL", Mnemonic::Brk => "BRK", Mnemonic::Bvc => "BVC",
            Mnemonic::Bvs => "BVS", Mnemonic::Clc => "CLC", Mnemonic::Cld => "CLD",
            Mnemonic::Cli => "CLI", Mnemonic::Clv => "CLV", Mnemonic::Cmp => "CMP",
            Mnemonic::Cpx => "CPX", Mnemonic::Cpy => "CPY", Mnemonic::Dec => "DEC",
            Mnemonic::Dex => "DEX", Mnemonic::Dey => "DEY", Mnemonic::Eor => "EOR",
            Mnemonic::Inc => "INC", Mnemonic::Inx => "INX", Mnemonic::Iny => "INY",
            Mnemonic::Jmp => "JMP", Mnemonic::Jsr => "JSR", Mnemonic::Lda => "LDA",
            Mnemonic::Ldx => "LDX", Mnemonic::Ldy => "LDY", Mnemonic::Lsr => "LSR",
            Mnemonic::Nop => "NOP", Mnemonic::Ora => "ORA", Mnemonic::Pha => "PHA",
            Mnemonic::Php => "PHP", Mnemonic::Pla => "PLA", Mnemonic::Plp => "PLP",
            Mnemonic::Rol => "ROL", Mnemonic::Ror => "ROR", Mnemonic::Rti => "RTI",
            Mnemonic::Rts => "RTS", Mnemonic::Sbc => "SBC", Mnemonic::Sec => "SEC",
            Mnemonic::Sed => "SED", Mnemonic::Sei => "SEI", Mnemonic::Sta => "STA",
            Mnemonic::Stx => "STX", Mnemonic::Sty => "STY", Mnemonic::Tax => "TAX",
            Mnemonic::Tay => "TAY", Mnemonic::Tsx => "TSX", Mnemonic::Txa => "TXA",
            Mnemonic::Txs => "TXS", Mnemonic::Tya => "TYA",
        }
    }

    /// True for the eight conditional branch mnemonics; they force
    /// relative argument parsing in the assembler.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Mnemonic::Bpl
                | Mnemonic::Bmi
                | Mnemonic::Bvc
                | Mnemonic::Bvs
                | Mnemonic::Bcc
                | Mnemonic::Bcs
                | Mnemonic::Bne
                | Mnemonic::Beq
        )
    }

    /// True for the mnemonics that resolve label arguments to absolute
    /// addresses.
    pub fn is_jump(self) -> bool {
        matches!(self, Mnemonic::Jmp | Mnemonic::Jsr)
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opcode byte for a mnemonic taking no operand (implied forms).
#[rustfmt::skip]
pub fn implied_opcode(m: Mnemonic) -> Option<u8> {
    let byte = match m {
        Mnemonic::Brk => 0x00, Mnemonic::Rti => 0x40, Mnemonic::Rts => 0x60,
        Mnemonic::Php => 0x08, Mnemonic::Plp => 0x28, Mnemonic::Pha => 0x48,
        Mnemonic::Pla => 0x68,
        Mnemonic::Dey => 0x88, Mnemonic::Tay => 0xA8, Mnemonic::Iny => 0xC8,
        Mnemonic::Inx => 0xE8, Mnemonic::Dex => 0xCA,
        Mnemonic::Clc => 0x18, Mnemonic::Sec => 0x38, Mnemonic::Cli => 0x58,
        Mnemonic::Sei => 0x78, Mnemonic::Clv => 0xB8, Mnemonic::Cld => 0xD8,
        Mnemonic::Sed => 0xF8,
        Mnemonic::Txa => 0x8A, Mnemonic::Tya => 0x98, Mnemonic::Txs => 0x9A,
        Mnemonic::Tax => 0xAA, Mnemonic::Tsx => 0xBA,
        Mnemonic::Nop => 0xEA,
        _ => return None,
    };
    Some(byte)
}

/// Opcode byte for a (mnemonic, addressing mode) pair. `None` means the
/// combination does not exist on the 6502.
#[rustfmt::skip]
pub fn opcode_for(m: Mnemonic, mode: AddressingMode) -> Option<u8> {
    use AddressingMode as M;
    use Mnemonic::*;
    let byte = match (m, mode) {
        // Loads
        (Lda, M::Immediate) => 0xA9, (Lda, M::ZeroPage) => 0xA5,
        (Lda, M::ZeroPageX) => 0xB5, (Lda, M::Absolute) => 0xAD,
        (Lda, M::AbsoluteX) => 0xBD, (Lda, M::AbsoluteY) => 0xB9,
        (Lda, M::IndirectX) => 0xA1, (Lda, M::IndirectY) => 0xB1,
        (Ldx, M::Immediate) => 0xA2, (Ldx, M::ZeroPage) => 0xA6,
        (Ldx, M::ZeroPageY) => 0xB6, (Ldx, M::Absolute) => 0xAE,
        (Ldx, M::AbsoluteY) => 0xBE,
        (Ldy, M::Immediate) => 0xA0, (Ldy, M::ZeroPage) => 0xA4,
        (Ldy, M::ZeroPageX) => 0xB4, (Ldy, M::Absolute) => 0xAC,
        (Ldy, M::AbsoluteX) => 0xBC,

        // Stores
        (Sta, M::ZeroPage) => 0x85, (Sta, M::ZeroPageX) => 0x95,
        (Sta, M::Absolute) => 0x8D, (Sta, M::AbsoluteX) => 0x9D,
        (Sta, M::AbsoluteY) => 0x99, (Sta, M::IndirectX) => 0x81,
        (Sta, M::IndirectY) => 0x91,
        (Stx, M::ZeroPage) => 0x86, (Stx, M::ZeroPageY) => 0x96,
        (Stx, M::Absolute) => 0x8E,
        (Sty, M::ZeroPage) => 0x84, (Sty, M::ZeroPageX) => 0x94,
        (Sty, M::Absolute) => 0x8C,

        // Arithmetic
        (Adc, M::Immediate) => 0x69, (Adc, M::ZeroPage) => 0x65,
        (Adc, M::ZeroPageX) => 0x75, (Adc, M::Absolute) => 0x6D,
        (Adc, M::AbsoluteX) => 0x7D, (Adc, M::AbsoluteY) => 0x79,
        (Adc, M::IndirectX) => 0x61, (Adc, M::IndirectY) => 0x71,
        (Sbc, M::Immediate) => 0xE9, (Sbc, M::ZeroPage) => 0xE5,
        (Sbc, M::ZeroPageX) => 0xF5, (Sbc, M::Absolute) => 0xED,
        (Sbc, M::AbsoluteX) => 0xFD, (Sbc, M::AbsoluteY) => 0xF9,
        (Sbc, M::IndirectX) => 0xE1, (Sbc, M::IndirectY) => 0xF1,

        // Logic
        (And, M::Immediate) => 0x29, (And, M::ZeroPage) => 0x25,
        (And, M::ZeroPageX) => 0x35, (And, M::Absolute) => 0x2D,
        (And, M::AbsoluteX) => 0x3D, (And, M::AbsoluteY) => 0x39,
        (And, M::IndirectX) => 0x21, (And, M::IndirectY) => 0x31,
        (Ora, M::Immediate) => 0x09, (Ora, M::ZeroPage) => 0x05,
        (Ora, M::ZeroPageX) => 0x15, (Ora, M::Absolute) => 0x0D,
        (Ora, M::AbsoluteX) => 0x1D, (Ora, M::AbsoluteY) => 0x19,
        (Ora, M::IndirectX) => 0x01, (Ora, M::IndirectY) => 0x11,
        (Eor, M::Immediate) => 0x49, (Eor, M::ZeroPage) => 0x45,
        (Eor, M::ZeroPageX) => 0x55, (Eor, M::Absolute) => 0x4D,
        (Eor, M::AbsoluteX) => 0x5D, (Eor, M::AbsoluteY) => 0x59,
        (Eor, M::IndirectX) => 0x41, (Eor, M::IndirectY) => 0x51,
        (Bit, M::ZeroPage) => 0x24, (Bit, M::Absolute) => 0x2C,

        // Compares
        (Cmp, M::Immediate) => 0xC9, (Cmp, M::ZeroPage) => 0xC5,
        (Cmp, M::ZeroPageX) => 0xD5, (Cmp, M::Absolute) => 0xCD,
        (Cmp, M::AbsoluteX) => 0xDD, (Cmp, M::AbsoluteY) => 0xD9,
        (Cmp, M::IndirectX) => 0xC1, (Cmp, M::IndirectY) => 0xD1,
        (Cpx, M::Immediate) => 0xE0, (Cpx, M::ZeroPage) => 0xE4,
        (Cpx, M::Absolute) => 0xEC,
        (Cpy, M::Immediate) => 0xC0, (Cpy, M::ZeroPage) => 0xC4,
        (Cpy, M::Absolute) => 0xCC,

        // Shifts / rotates
        (Asl, M::Accumulator) => 0x0A, (Asl, M::ZeroPage) => 0x06,
        (Asl, M::ZeroPageX) => 0x16, (Asl, M::Absolute) => 0x0E,
        (Asl, M::AbsoluteX) => 0x1E,
        (Lsr, M::Accumulator) => 0x4A, (Lsr, M::ZeroPage) => 0x46,
        (Lsr, M::ZeroPageX) => 0x56, (Lsr, M::Absolute) => 0x4E,
        (Lsr, M::AbsoluteX) => 0x5E,
        (Rol, M::Accumulator) => 0x2A, (Rol, M::ZeroPage) => 0x26,
        (Rol, M::ZeroPageX) => 0x36, (Rol, M::Absolute) => 0x2E,
        (Rol, M::AbsoluteX) => 0x3E,
        (Ror, M::Accumulator) => 0x6A, (Ror, M::ZeroPage) => 0x66,
        (Ror, M::ZeroPageX) => 0x76, (Ror, M::Absolute) => 0x6E,
        (Ror, M::AbsoluteX) => 0x7E,

        // Memory increment / decrement
        (Inc, M::ZeroPage) => 0xE6, (Inc, M::ZeroPageX) => 0xF6,
        (Inc, M::Absolute) => 0xEE, (Inc, M::AbsoluteX) => 0xFE,
        (Dec, M::ZeroPage) => 0xC6, (Dec, M::ZeroPageX) => 0xD6,
        (Dec, M::Absolute) => 0xCE, (Dec, M::AbsoluteX) => 0xDE,

        // Control flow
        (Jmp, M::Absolute) => 0x4C, (Jmp, M::Indirect) => 0x6C,
        (Jsr, M::Absolute) => 0x20,
        (Bpl, M::Relative) => 0x10, (Bmi, M::Relative) => 0x30,
        (Bvc, M::Relative) => 0x50, (Bvs, M::Relative) => 0x70,
        (Bcc, M::Relative) => 0x90, (Bcs, M::Relative) => 0xB0,
        (Bne, M::Relative) => 0xD0, (Beq, M::Relative) => 0xF0,

        _ => return None,
    };
    Some(byte)
}

/// Decode an opcode byte back into its mnemonic and addressing mode
/// (`None` mode for implied forms). Linear scan over the forward
/// tables, so the two directions cannot drift apart; used by the
/// reference disassembler, not the executor.
pub fn decode(byte: u8) -> Option<(Mnemonic, Option<AddressingMode>)> {
    for m in Mnemonic::ALL {
        if implied_opcode(m) == Some(byte) {
            return Some((m, None));
        }
        for mode in AddressingMode::ALL {
            if opcode_for(m, mode) == Some(byte) {
                return Some((m, Some(mode)));
            }
        }
    }
    None
}
