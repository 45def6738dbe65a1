
use thiserror::Error;

use crate::cartridge::{MirrorType, mappers::MapperRef};

const PATTERN_TABLES_END: u16 = 0x1FFF;
const NAME_TABLES_END: u16 = 0x3EFF;
const PALETTE_END: u16 = 0x3FFF;
const NAME_TABLE_MIRROR_START: u16 = 0x3000;
const NAME_TABLE_MIRROR_OFFSET: u16 = 0x1000;
const NAME_TABLE_SIZE: u16 = 0x0400;
const NAME_TABLE_MASK: u16 = 0x03FF;
const VRAM_SIZE: usize = 0x0800;
const PALETTE_SIZE: usize = 0x0020;
const PALETTE_MASK: u16 = 0x001F;

/// Where one of the four logical name tables lives.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum NameTableSlot {
    /// Offset into the on-board 2KB VRAM.
    Local(u16),
    /// Backed by the cartridge, reached through the mapper's CHR port.
    Delegated,
}

impl NameTableSlot {
    fn layout(mirror_type: MirrorType) -> [NameTableSlot; 4] {
        use NameTableSlot::{Delegated, Local};
        match mirror_type {
            MirrorType::Horizontal => [Local(0), Local(0), Local(0x400), Local(0x400)],
            MirrorType::Vertical => [Local(0), Local(0x400), Local(0), Local(0x400)],
            MirrorType::OneScreenLower => [Local(0); 4],
            MirrorType::OneScreenHigher => [Local(0x400); 4],
            MirrorType::FourScreen => [Delegated; 4],
        }
    }
}

/**
 * The 14 bit address space the PPU sees.
 *
 * 0x0000 - 0x1FFF pattern tables, owned by the mapper
 * 0x2000 - 0x2FFF four 1KB name tables folded onto 2KB of VRAM per the mirroring mode
 * 0x3000 - 0x3EFF mirror of 0x2000 - 0x2EFF
 * 0x3F00 - 0x3FFF 32 byte palette, mirrored every 0x20
 *
 * See https://www.nesdev.org/wiki/PPU_memory_map
 */
pub struct PictureBus {
    vram: [u8; VRAM_SIZE],
    palettes: [u8; PALETTE_SIZE],
    name_tables: [NameTableSlot; 4],
    mapper: Option<MapperRef>,
}

impl PictureBus {
    pub fn new() -> Self {
        Self {
            vram: [0; VRAM_SIZE],
            palettes: [0; PALETTE_SIZE],
            name_tables: [NameTableSlot::Local(0); 4],
            mapper: None,
        }
    }

    /// Clears VRAM and palettes. The attached mapper and mirroring are kept.
    pub fn reset(&mut self) {
        self.vram = [0; VRAM_SIZE];
        self.palettes = [0; PALETTE_SIZE];
    }

    pub fn read(&self, addr: u16) -> u8 {
        if addr <= PATTERN_TABLES_END {
            self.mapper().borrow().read_chr(addr)
        } else if addr <= NAME_TABLES_END {
            let (slot, normalized) = self.name_table_slot(addr);
            match slot {
                NameTableSlot::Delegated => self.mapper().borrow().read_chr(normalized),
                NameTableSlot::Local(offset) => self.vram[vram_index(offset, addr)],
            }
        } else if addr <= PALETTE_END {
            self.palettes[palette_index(addr)]
        } else {
            0
        }
    }

    pub fn write(&mut self, addr: u16, value: u8) {
        if addr <= PATTERN_TABLES_END {
            self.mapper().borrow_mut().write_chr(addr, value);
        } else if addr <= NAME_TABLES_END {
            let (slot, normalized) = self.name_table_slot(addr);
            match slot {
                NameTableSlot::Delegated => {
                    self.mapper().borrow_mut().write_chr(normalized, value)
                }
                NameTableSlot::Local(offset) => self.vram[vram_index(offset, addr)] = value,
            }
        } else if addr <= PALETTE_END {
            self.palettes[palette_index(addr)] = value;
        }
    }

    /// Attaches the cartridge's mapper and recomputes the name table layout
    /// from its mirroring. `None` is rejected and leaves the bus untouched.
    pub fn attach_mapper(&mut self, mapper: Option<MapperRef>) -> Result<(), PictureBusError> {
        let Some(mapper) = mapper else {
            log::error!("Mapper argument is absent");
            return Err(PictureBusError::MapperRejected);
        };

        self.mapper = Some(mapper);
        self.update_mirroring();
        Ok(())
    }

    /// Must be called again whenever the mapper may have switched mirroring.
    pub fn update_mirroring(&mut self) {
        match &self.mapper {
            Some(mapper) => {
                let mirror_type = mapper.borrow().mirroring();
                self.name_tables = NameTableSlot::layout(mirror_type);
                log::debug!(
                    "Name table mirroring {}: {:?}",
                    mirror_type,
                    self.name_tables
                );
            }
            None => {
                self.name_tables = [NameTableSlot::Local(0); 4];
                log::error!("Can't update name table mirroring without a mapper");
            }
        }
    }

    pub fn scanline_irq(&mut self) {
        self.mapper().borrow_mut().scanline_irq();
    }

    pub fn mirroring(&self) -> Option<MirrorType> {
        self.mapper.as_ref().map(|mapper| mapper.borrow().mirroring())
    }

    pub fn name_table_slots(&self) -> [NameTableSlot; 4] {
        self.name_tables
    }

    pub fn has_mapper(&self) -> bool {
        self.mapper.is_some()
    }

    fn mapper(&self) -> &MapperRef {
        self.mapper
            .as_ref()
            .expect("PPU bus accessed cartridge space before a mapper was attached")
    }

    fn name_table_slot(&self, addr: u16) -> (NameTableSlot, u16) {
        let normalized = if addr >= NAME_TABLE_MIRROR_START {
            addr - NAME_TABLE_MIRROR_OFFSET
        } else {
            addr
        };
        let band = ((normalized - 0x2000) / NAME_TABLE_SIZE) as usize;
        (self.name_tables[band], normalized)
    }
}

impl Default for PictureBus {
    fn default() -> Self {
        Self::new()
    }
}

fn vram_index(offset: u16, addr: u16) -> usize {
    (offset + (addr & NAME_TABLE_MASK)) as usize
}

fn palette_index(addr: u16) -> usize {
    let mut palette_addr = addr & PALETTE_MASK;
    // 0x3F10/0x3F14/0x3F18/0x3F1C are mirrors of 0x3F00/0x3F04/0x3F08/0x3F0C
    if palette_addr >= 0x10 && palette_addr % 4 == 0 {
        palette_addr &= 0x0F;
    }
    palette_addr as usize
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PictureBusError {
    #[error("No mapper was supplied to the PPU bus")]
    MapperRejected,
}
