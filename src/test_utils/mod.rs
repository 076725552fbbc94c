//! Shared test utilities: minimal iNES (v1) image builders and the
//! reference disassembler used by the round-trip tests.
//!
//! Header fields the builders populate:
//! - bytes[0..4] = b"NES\x1A"
//! - byte 4 = PRG ROM size in 16 KiB units
//! - byte 5 = CHR ROM size in 8 KiB units
//! - byte 6 = flags 6 (mirroring, battery, trainer, mapper low nibble)
//! - byte 7 = flags 7 (version bits, mapper high nibble)
//! - bytes 8..15 = padding
//!
//! Vectors sit in the last six bytes of PRG: offset 0x3FFA (16 KiB)
//! or 0x7FFA (32 KiB).

#![allow(dead_code)]

pub mod disasm;

/// Build a minimal iNES (v1) image. PRG bytes are filled with 0xAA and
/// CHR with 0xCC so tests can tell the sections apart.
pub fn build_ines(
    prg_16k: usize,
    chr_8k: usize,
    flags6: u8,
    flags7: u8,
    trainer: Option<&[u8; 512]>,
) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(
        16 + trainer.map_or(0, |_| 512) + prg_16k * 16 * 1024 + chr_8k * 8 * 1024,
    );

    bytes.extend_from_slice(b"NES\x1A");
    bytes.push(prg_16k as u8);
    bytes.push(chr_8k as u8);
    bytes.push(flags6);
    bytes.push(flags7);
    bytes.extend_from_slice(&[0u8; 8]);

    if let Some(t) = trainer {
        bytes.extend_from_slice(t);
    }
    bytes.extend(std::iter::repeat(0xAA).take(prg_16k * 16 * 1024));
    bytes.extend(std::iter::repeat(0xCC).take(chr_8k * 8 * 1024));
    bytes
}

/// Build an NROM image with `prg` copied to the start of PRG and the
/// RESET vector pointing at `reset` (0x8000 when `None`). NMI and IRQ
/// vectors also point at 0x8000.
pub fn build_nrom_with_prg(prg: &[u8], prg_16k: usize, reset: Option<u16>) -> Vec<u8> {
    assert!(
        prg.len() <= prg_16k * 16 * 1024,
        "program must fit in the PRG banks"
    );

    let mut rom = build_ines(prg_16k, 1, 0, 0, None);
    let prg_start = 16;
    rom[prg_start..prg_start + prg.len()].copy_from_slice(prg);

    let reset = reset.unwrap_or(0x8000);
    let prg_end = prg_start + prg_16k * 16 * 1024;
    set_vectors_in_prg(&mut rom[prg_start..prg_end], reset, 0x8000, 0x8000);
    rom
}

/// Write the NMI/RESET/IRQ vectors into a 16 KiB or 32 KiB PRG slice.
pub fn set_vectors_in_prg(prg: &mut [u8], reset: u16, nmi: u16, irq: u16) {
    let base = match prg.len() {
        16384 => 0x3FFA,
        32768 => 0x7FFA,
        other => panic!("unsupported PRG length {other} for vector placement"),
    };
    write_le_u16(prg, base, nmi);
    write_le_u16(prg, base + 2, reset);
    write_le_u16(prg, base + 4, irq);
}

fn write_le_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset] = (value & 0x00FF) as u8;
    buf[offset + 1] = (value >> 8) as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_basic_ines() {
        let rom = build_ines(2, 1, 0x01, 0x00, None);
        assert_eq!(&rom[0..4], b"NES\x1A");
        assert_eq!(rom[4], 2);
        assert_eq!(rom[5], 1);
        assert_eq!(rom[6], 0x01);
        assert_eq!(rom[7], 0x00);
        assert_eq!(rom.len(), 16 + 2 * 16 * 1024 + 8 * 1024);
    }

    #[test]
    fn vectors_land_in_the_last_six_bytes() {
        let mut prg = vec![0u8; 16 * 1024];
        set_vectors_in_prg(&mut prg, 0x8123, 0x8456, 0x8ABC);
        assert_eq!(prg[0x3FFA], 0x56);
        assert_eq!(prg[0x3FFB], 0x84);
        assert_eq!(prg[0x3FFC], 0x23);
        assert_eq!(prg[0x3FFD], 0x81);
        assert_eq!(prg[0x3FFE], 0xBC);
        assert_eq!(prg[0x3FFF], 0x8A);
    }

    #[test]
    fn nrom_builder_injects_program_and_reset() {
        let rom = build_nrom_with_prg(&[0xA9, 0x01, 0x00], 1, Some(0x8005));
        assert_eq!(rom[16], 0xA9);
        assert_eq!(rom[16 + 0x3FFC], 0x05);
        assert_eq!(rom[16 + 0x3FFD], 0x80);
    }
}
