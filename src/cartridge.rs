mod header;
pub mod mappers;


use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

pub use header::{Flags6, HEADER_SIZE, NesHeader};

#[derive(Debug, PartialEq, Eq, Copy, Clone, Display, EnumIter)]
pub enum MirrorType {
    Horizontal,
    Vertical,
    OneScreenLower,
    OneScreenHigher,
    FourScreen,
}

pub static PRG_ROM_PAGE_SIZE: usize = 0x4000;
pub static CHR_ROM_PAGE_SIZE: usize = 0x2000;

/**
 * An iNES image as read from disk: the header derived metadata plus the
 * program and pattern ROM. An empty pattern ROM means the board carries
 * CHR RAM instead.
 */
#[derive(Debug)]
pub struct Cartridge {
    header: NesHeader,
    prg_rom: Vec<u8>,
    chr_rom: Vec<u8>,
}

impl Cartridge {
    /// Builds a raw image with the given header fields, PRG bytes filled with
    /// 0xEA and CHR bytes with the low byte of their offset.
    #[cfg(test)]
    pub fn test_image(prg_banks: u8, chr_banks: u8, flags6: u8, flags7: u8) -> Vec<u8> {
        let mut image = vec![b'N', b'E', b'S', 0x1A, prg_banks, chr_banks, flags6, flags7];
        image.resize(HEADER_SIZE, 0);
        image.resize(HEADER_SIZE + PRG_ROM_PAGE_SIZE * prg_banks as usize, 0xEA);
        image.extend((0..CHR_ROM_PAGE_SIZE * chr_banks as usize).map(|i| i as u8));
        image
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CartridgeError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            log::error!("Could not open ROM file from path: {}", path.display());
            CartridgeError::Io {
                path: path.display().to_string(),
                source,
            }
        })?;

        log::info!("Reading ROM from path: {}", path.display());
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, CartridgeError> {
        let mut raw_header = [0; HEADER_SIZE];
        reader.read_exact(&mut raw_header).map_err(|e| {
            log::error!("Reading iNES header failed.");
            CartridgeError::HeaderRead(e)
        })?;

        let header = NesHeader::new(&raw_header)?;

        log::info!("16KB PRG-ROM Banks: {}", header.prg_banks);
        if header.prg_banks == 0 {
            log::error!("ROM has no PRG-ROM banks. Loading ROM failed.");
            return Err(CartridgeError::NoProgramData);
        }

        log::info!("8KB CHR-ROM Banks: {}", header.chr_banks);

        if header.has_trainer() {
            log::error!("Trainer is not supported.");
            return Err(CartridgeError::UnsupportedFeature("trainer"));
        }

        if header.is_pal() {
            log::error!("PAL ROM not supported.");
            return Err(CartridgeError::UnsupportedRegion(header.flags10));
        }
        log::info!("ROM is NTSC compatible.");

        let mut prg_rom = vec![0; PRG_ROM_PAGE_SIZE * header.prg_banks as usize];
        reader.read_exact(&mut prg_rom).map_err(|e| {
            log::error!("Reading PRG-ROM from image file failed.");
            CartridgeError::ProgramRead(e)
        })?;

        let chr_rom = if header.chr_banks > 0 {
            let mut chr_rom = vec![0; CHR_ROM_PAGE_SIZE * header.chr_banks as usize];
            reader.read_exact(&mut chr_rom).map_err(|e| {
                log::error!("Reading CHR-ROM from image file failed.");
                CartridgeError::PatternRead(e)
            })?;
            chr_rom
        } else {
            log::info!("Cartridge with CHR-RAM.");
            Vec::new()
        };

        Ok(Self {
            header,
            prg_rom,
            chr_rom,
        })
    }

    pub fn header(&self) -> &NesHeader {
        &self.header
    }

    pub fn prg_rom(&self) -> &[u8] {
        &self.prg_rom
    }

    pub fn chr_rom(&self) -> &[u8] {
        &self.chr_rom
    }

    pub fn mapper_number(&self) -> u8 {
        self.header.mapper_number
    }

    pub fn mirroring(&self) -> MirrorType {
        self.header.mirror_type
    }

    pub fn has_extended_ram(&self) -> bool {
        self.header.extended_ram
    }

    pub fn has_battery(&self) -> bool {
        self.header.has_battery
    }

    pub fn has_chr_ram(&self) -> bool {
        self.chr_rom.is_empty()
    }

    pub fn prg_banks(&self) -> usize {
        self.prg_rom.len() / PRG_ROM_PAGE_SIZE
    }

    pub fn chr_banks(&self) -> usize {
        self.chr_rom.len() / CHR_ROM_PAGE_SIZE
    }
}

#[derive(Error, Debug)]
pub enum CartridgeError {
    #[error("Could not open ROM file {path}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("Reading the iNES header failed")]
    HeaderRead(#[source] io::Error),
    #[error("Not a valid iNES image, magic number was {0:02x?}")]
    InvalidMagic([u8; 4]),
    #[error("The image has no PRG-ROM banks")]
    NoProgramData,
    #[error("The image uses a {0} which isn't supported")]
    UnsupportedFeature(&'static str),
    #[error("The image targets PAL timing (flags10 {0:#04x}) which isn't supported")]
    UnsupportedRegion(u8),
    #[error("Reading PRG-ROM from the image failed")]
    ProgramRead(#[source] io::Error),
    #[error("Reading CHR-ROM from the image failed")]
    PatternRead(#[source] io::Error),
    #[error("The image requires mapper {0} which isn't supported yet")]
    UnsupportedMapper(u8),
}
