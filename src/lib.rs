pub mod cartridge;
pub mod picture_bus;

pub use cartridge::{Cartridge, CartridgeError, MirrorType};
pub use picture_bus::{NameTableSlot, PictureBus, PictureBusError};
