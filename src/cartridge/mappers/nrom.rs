
use crate::cartridge::{CHR_ROM_PAGE_SIZE, Cartridge, MirrorType};

use super::Mapper;

const FOUR_SCREEN_VRAM_START: u16 = 0x2000;
const FOUR_SCREEN_VRAM_END: u16 = 0x2FFF;
const FOUR_SCREEN_VRAM_SIZE: usize = 0x1000;

/**
 * Mapper 0
 */
pub struct NRom {
    chr: Vec<u8>,
    chr_is_ram: bool,
    // only populated for four screen boards
    vram: Vec<u8>,
    mirror_type: MirrorType,
}

impl NRom {
    pub fn new(cartridge: &Cartridge) -> Self {
        let chr_is_ram = cartridge.has_chr_ram();
        let chr = if chr_is_ram {
            vec![0; CHR_ROM_PAGE_SIZE]
        } else {
            cartridge.chr_rom().to_vec()
        };

        let mirror_type = cartridge.mirroring();
        let vram = if mirror_type == MirrorType::FourScreen {
            vec![0; FOUR_SCREEN_VRAM_SIZE]
        } else {
            Vec::new()
        };

        Self {
            chr,
            chr_is_ram,
            vram,
            mirror_type,
        }
    }
}

impl Mapper for NRom {
    fn read_chr(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x1FFF => self.chr[addr as usize % self.chr.len()],
            FOUR_SCREEN_VRAM_START..=FOUR_SCREEN_VRAM_END if !self.vram.is_empty() => {
                self.vram[(addr - FOUR_SCREEN_VRAM_START) as usize]
            }
            _ => {
                log::debug!("Read from unmapped CHR address {:#06x}", addr);
                0
            }
        }
    }

    fn write_chr(&mut self, addr: u16, value: u8) {
        match addr {
            0x0000..=0x1FFF if self.chr_is_ram => {
                let len = self.chr.len();
                self.chr[addr as usize % len] = value;
            }
            0x0000..=0x1FFF => {
                log::debug!("Ignoring write to CHR-ROM at {:#06x}", addr);
            }
            FOUR_SCREEN_VRAM_START..=FOUR_SCREEN_VRAM_END if !self.vram.is_empty() => {
                self.vram[(addr - FOUR_SCREEN_VRAM_START) as usize] = value;
            }
            _ => {
                log::debug!("Write to unmapped CHR address {:#06x}", addr);
            }
        }
    }

    fn mirroring(&self) -> MirrorType {
        self.mirror_type
    }

    fn scanline_irq(&mut self) {}
}
