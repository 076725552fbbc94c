/*!
Cartridge: iNES (v1) loader for mapper 0 (NROM).

Parses the 16-byte header, slices out PRG/CHR, and exposes the PRG read
path the bus routes $8000-$FFFF through. 16 KiB PRG images (NROM-128)
mirror into the upper 16 KiB window, 32 KiB images (NROM-256) map flat.

Anything flagged as NES 2.0 (header byte 7 bits 2-3 nonzero) and any
mapper other than 0 is rejected; this core does not pretend to support
them.
*/

use std::fs;
use std::path::Path;

use log::debug;
use thiserror::Error;

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const PRG_BANK_SIZE: usize = 16 * 1024;
const CHR_BANK_SIZE: usize = 8 * 1024;
const PRG_ROM_BASE: u16 = 0x8000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartridgeError {
    #[error("image is {0} bytes, smaller than the 16-byte iNES header")]
    TooShort(usize),
    #[error("bad iNES magic (expected NES<1A>)")]
    BadMagic,
    #[error("header byte 7 bits 2-3 are set; not a supported iNES v1 image")]
    UnsupportedVersion,
    #[error("image truncated: expected {expected} bytes of {section}, found {found}")]
    Truncated {
        section: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("mapper {0} is not supported (only mapper 0 / NROM)")]
    UnsupportedMapper(u16),
    #[error("header declares zero PRG ROM banks")]
    NoPrgRom,
    #[error("failed to read iNES file: {0}")]
    Io(String),
}

/// Nametable arrangement advertised by the header. The core does not
/// render, but the bus hands this to hosts that do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

pub struct Cartridge {
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
    mapper_id: u16,
    mirroring: Mirroring,
}

impl Cartridge {
    /// Parse an iNES v1 image from raw bytes.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, CartridgeError> {
        if data.len() < HEADER_LEN {
            return Err(CartridgeError::TooShort(data.len()));
        }
        if &data[0..4] != b"NES\x1A" {
            return Err(CartridgeError::BadMagic);
        }

        let prg_banks = data[4] as usize;
        let chr_banks = data[5] as usize;
        let flags6 = data[6];
        let flags7 = data[7];

        if prg_banks == 0 {
            return Err(CartridgeError::NoPrgRom);
        }

        if flags7 & 0b0000_1100 != 0 {
            return Err(CartridgeError::UnsupportedVersion);
        }

        let mapper_id = u16::from((flags7 & 0xF0) | (flags6 >> 4));
        if mapper_id != 0 {
            return Err(CartridgeError::UnsupportedMapper(mapper_id));
        }

        let four_screen = flags6 & 0b0000_1000 != 0;
        let vertical = flags6 & 0b0000_0001 != 0;
        let mirroring = if four_screen {
            Mirroring::FourScreen
        } else if vertical {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        let mut offset = HEADER_LEN;
        if flags6 & 0b0000_0100 != 0 {
            // Trainer: 512 bytes between header and PRG; skipped.
            if data.len() < offset + TRAINER_LEN {
                return Err(CartridgeError::Truncated {
                    section: "trainer",
                    expected: offset + TRAINER_LEN,
                    found: data.len(),
                });
            }
            offset += TRAINER_LEN;
        }

        let prg_len = prg_banks * PRG_BANK_SIZE;
        if data.len() < offset + prg_len {
            return Err(CartridgeError::Truncated {
                section: "PRG ROM",
                expected: offset + prg_len,
                found: data.len(),
            });
        }
        let prg_rom = data[offset..offset + prg_len].to_vec();
        offset += prg_len;

        let chr_len = chr_banks * CHR_BANK_SIZE;
        if data.len() < offset + chr_len {
            return Err(CartridgeError::Truncated {
                section: "CHR ROM",
                expected: offset + chr_len,
                found: data.len(),
            });
        }
        let chr_rom = data[offset..offset + chr_len].to_vec();

        debug!(
            "loaded iNES image: mapper {mapper_id}, PRG {prg_len} bytes, CHR {chr_len} bytes, {mirroring:?} mirroring"
        );

        Ok(Self {
            prg_rom,
            chr_rom,
            mapper_id,
            mirroring,
        })
    }

    /// Parse an iNES v1 image from a `.nes` file.
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let bytes = fs::read(path).map_err(|e| CartridgeError::Io(e.to_string()))?;
        Self::from_ines_bytes(&bytes)
    }

    /// Read a byte from PRG ROM space ($8000-$FFFF). NROM-128 mirrors
    /// the single bank into the upper window.
    pub fn read_prg(&self, addr: u16) -> u8 {
        let mut index = (addr - PRG_ROM_BASE) as usize;
        if self.prg_rom.len() == PRG_BANK_SIZE {
            index %= PRG_BANK_SIZE;
        }
        self.prg_rom[index]
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn mapper_id(&self) -> u16 {
        self.mapper_id
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }
}
