#![doc = r#"
Bus module: CPU address-space dispatch.

Address map (CPU view):
- $0000-$07FF: 2 KiB internal RAM
- $0800-$1FFF: mirrors of $0000-$07FF (mask with & 0x07FF)
- $2000-$3FFF: PPU register window; not decoded by the core. A host may
  install a `RegionHandler` over it, otherwise access is a `BusError`.
- $4000-$7FFF: not decoded; reads log and return 0, writes log and are
  dropped. Lenient on purpose so programs under development keep running.
- $8000-$FFFF: cartridge PRG ROM (read-only; 16 KiB images mirror into
  the upper bank). The reset vector lives at $FFFC-$FFFD.

Host-installed regions are consulted first, in installation order, so a
host can shadow any range it likes.

For the standalone assembler path there is no cartridge: `load` copies
the program into RAM at its origin and records the origin in a two-byte
reset-vector latch that answers reads of $FFFC/$FFFD until a cartridge
is attached.
"#]

pub mod ram;
pub mod region;

use log::warn;
use thiserror::Error;

use crate::cartridge::Cartridge;
use ram::{Ram, RAM_MIRROR_END, RAM_SIZE};
use region::{Region, RegionHandler};

/// Start of the PPU register window.
const PPU_REG_START: u16 = 0x2000;
/// End of the PPU register window (inclusive).
const PPU_REG_END: u16 = 0x3FFF;
/// Start of cartridge PRG ROM space.
const PRG_ROM_START: u16 = 0x8000;
/// Little-endian reset vector location.
pub const RESET_VECTOR: u16 = 0xFFFC;

/// Faults raised by address-space dispatch. Unmapped ranges do not
/// fault; they log and fall through (see module docs).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("read of ${0:04X} hit PRG ROM space but no cartridge is loaded")]
    CartridgeNotLoaded(u16),
    #[error("write of ${value:02X} to read-only PRG ROM at ${addr:04X}")]
    ReadOnlyRom { addr: u16, value: u8 },
    #[error("access to PPU register ${0:04X} with no host handler installed")]
    UnsupportedRegion(u16),
    #[error("program of {len} bytes does not fit in RAM at origin ${origin:04X}")]
    ProgramOutOfRange { origin: u16, len: usize },
}

pub struct Bus {
    ram: Ram,
    cartridge: Option<Cartridge>,
    regions: Vec<Region>,

    // Reset vector recorded by `load` when running without a cartridge.
    vector_latch: Option<[u8; 2]>,

    // Interrupt request lines, driven by the host.
    pub nmi_pending: bool,
    pub irq_line: bool,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self {
            ram: Ram::new(),
            cartridge: None,
            regions: Vec::new(),
            vector_latch: None,
            nmi_pending: false,
            irq_line: false,
        }
    }

    pub fn attach_cartridge(&mut self, cart: Cartridge) {
        self.cartridge = Some(cart);
    }

    pub fn cartridge(&self) -> Option<&Cartridge> {
        self.cartridge.as_ref()
    }

    /// Map a host device over `start..=end`. Earlier installations win
    /// when ranges overlap.
    pub fn install_region(&mut self, start: u16, end: u16, handler: Box<dyn RegionHandler>) {
        self.regions.push(Region::new(start, end, handler));
    }

    /// Clear RAM and interrupt lines. Cartridge and regions stay.
    pub fn reset(&mut self) {
        self.ram.reset();
        self.nmi_pending = false;
        self.irq_line = false;
    }

    // -----------------------------
    // CPU-visible memory interface
    // -----------------------------

    pub fn read(&mut self, addr: u16) -> Result<u8, BusError> {
        if let Some(region) = self.regions.iter_mut().find(|r| r.contains(addr)) {
            return Ok(region.read(addr));
        }
        match addr {
            0..=RAM_MIRROR_END => Ok(self.ram.read(addr)),
            PPU_REG_START..=PPU_REG_END => Err(BusError::UnsupportedRegion(addr)),
            PRG_ROM_START..=0xFFFF => match &self.cartridge {
                Some(cart) => Ok(cart.read_prg(addr)),
                None => match (addr, &self.vector_latch) {
                    (RESET_VECTOR, Some(latch)) => Ok(latch[0]),
                    (a, Some(latch)) if a == RESET_VECTOR + 1 => Ok(latch[1]),
                    _ => Err(BusError::CartridgeNotLoaded(addr)),
                },
            },
            _ => {
                warn!("read of unmapped address ${addr:04X}; returning 0");
                Ok(0)
            }
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), BusError> {
        if let Some(region) = self.regions.iter_mut().find(|r| r.contains(addr)) {
            region.write(addr, value);
            return Ok(());
        }
        match addr {
            0..=RAM_MIRROR_END => {
                self.ram.write(addr, value);
                Ok(())
            }
            PPU_REG_START..=PPU_REG_END => Err(BusError::UnsupportedRegion(addr)),
            PRG_ROM_START..=0xFFFF => Err(BusError::ReadOnlyRom { addr, value }),
            _ => {
                warn!("write of ${value:02X} to unmapped address ${addr:04X}; dropped");
                Ok(())
            }
        }
    }

    /// Little-endian 16-bit read: low byte at `addr`, high at `addr + 1`
    /// (wrapping).
    pub fn read_word(&mut self, addr: u16) -> Result<u16, BusError> {
        let lo = self.read(addr)? as u16;
        let hi = self.read(addr.wrapping_add(1))? as u16;
        Ok((hi << 8) | lo)
    }

    /// Little-endian 16-bit write.
    pub fn write_word(&mut self, addr: u16, value: u16) -> Result<(), BusError> {
        self.write(addr, (value & 0x00FF) as u8)?;
        self.write(addr.wrapping_add(1), (value >> 8) as u8)
    }

    /// Copy `program` into RAM at `origin` and record `origin` as the
    /// little-endian reset vector.
    pub fn load(&mut self, program: &[u8], origin: u16) -> Result<(), BusError> {
        let end = origin as usize + program.len();
        if origin as usize >= RAM_SIZE || end > RAM_SIZE {
            return Err(BusError::ProgramOutOfRange {
                origin,
                len: program.len(),
            });
        }
        self.ram.load(origin, program);
        self.vector_latch = Some([(origin & 0x00FF) as u8, (origin >> 8) as u8]);
        Ok(())
    }
}
