extern crate bitflags;

use super::{CartridgeError, MirrorType};

pub const HEADER_SIZE: usize = 0x10;

static NES_TAG: [u8; 4] = [b'N', b'E', b'S', 0x1A];

bitflags::bitflags! {
    #[derive(Clone, Copy, PartialEq, Eq, Debug)]
    pub struct Flags6: u8 {
        const VerticalMirroring = 0b00000001;
        const PersistentRam = 0b00000010;
        const Trainer = 0b00000100;
        const FourScreen = 0b00001000;
    }
}

/**
 * Typed view over the 16 byte iNES header.
 * See https://www.nesdev.org/wiki/INES
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NesHeader {
    pub prg_banks: u8,
    pub chr_banks: u8,
    pub flags6: Flags6,
    pub mirror_type: MirrorType,
    pub mapper_number: u8,
    pub extended_ram: bool,
    pub has_battery: bool,
    pub flags10: u8,
}

impl NesHeader {
    pub fn new(header: &[u8; HEADER_SIZE]) -> Result<NesHeader, CartridgeError> {
        if header[0..4] != NES_TAG {
            log::error!(
                "Not a valid iNES image. Magic number: {:02x} {:02x} {:02x} {:02x}, expected 4e 45 53 1a",
                header[0],
                header[1],
                header[2],
                header[3]
            );
            return Err(CartridgeError::InvalidMagic([
                header[0], header[1], header[2], header[3],
            ]));
        }

        let flags6 = Flags6::from_bits_retain(header[6]);

        let mirror_type = if flags6.contains(Flags6::FourScreen) {
            MirrorType::FourScreen
        } else if flags6.contains(Flags6::VerticalMirroring) {
            MirrorType::Vertical
        } else {
            MirrorType::Horizontal
        };
        log::info!("Name table mirroring: {}", mirror_type);

        let mapper_number = (header[6] >> 4) | (header[7] & 0xF0);
        log::info!("Mapper #: {}", mapper_number);

        // both flags come from the same bit of flags6
        let extended_ram = flags6.contains(Flags6::PersistentRam);
        log::info!("Extended (CPU) RAM: {}", extended_ram);
        let has_battery = flags6.contains(Flags6::PersistentRam);
        log::info!("Battery-backed RAM: {}", has_battery);

        Ok(Self {
            prg_banks: header[4],
            chr_banks: header[5],
            flags6,
            mirror_type,
            mapper_number,
            extended_ram,
            has_battery,
            flags10: header[0x0A],
        })
    }

    pub fn has_trainer(&self) -> bool {
        self.flags6.contains(Flags6::Trainer)
    }

    /// PAL and dual region images both count as PAL here.
    pub fn is_pal(&self) -> bool {
        (self.flags10 & 0x03) == 0x02 || (self.flags10 & 0x01) != 0
    }
}
