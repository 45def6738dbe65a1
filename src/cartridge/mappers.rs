pub mod nrom;

use std::{cell::RefCell, rc::Rc};

use super::{Cartridge, CartridgeError, MirrorType};

use self::nrom::NRom;

/**
 * The cartridge side of the PPU bus. Pattern table accesses (and the extra
 * name tables of four screen boards) are handed to the mapper verbatim.
 */
pub trait Mapper {
    fn read_chr(&self, addr: u16) -> u8;
    fn write_chr(&mut self, addr: u16, value: u8);
    fn mirroring(&self) -> MirrorType;
    /// Called once per rendered scanline; used by boards with a scanline counter.
    fn scanline_irq(&mut self);
}

pub type MapperRef = Rc<RefCell<dyn Mapper>>;

pub fn get_mapper(cartridge: &Cartridge) -> Result<MapperRef, CartridgeError> {
    match cartridge.mapper_number() {
        0 => Ok(Rc::new(RefCell::new(NRom::new(cartridge)))),
        n => {
            log::error!("Mapper {} is not supported", n);
            Err(CartridgeError::UnsupportedMapper(n))
        }
    }
}
