use anyhow::{Context, Result};
use clap::Parser;

use nes_ppu_bus::{Cartridge, PictureBus, cartridge::mappers};

#[derive(Parser)]
#[command(name = "nes-ppu-bus")]
#[command(about = "Loads an iNES image and wires its mapper into the PPU address space")]
struct Args {
    /// Path to the NES ROM file
    rom_path: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let cartridge = Cartridge::load(&args.rom_path)
        .with_context(|| format!("failed to load {}", args.rom_path))?;
    let mapper = mappers::get_mapper(&cartridge)?;

    let mut bus = PictureBus::new();
    bus.attach_mapper(Some(mapper))?;

    log::info!(
        "PRG-ROM {:#x} bytes | CHR {} | mapper {} | name tables {:?}",
        cartridge.prg_rom().len(),
        if cartridge.has_chr_ram() {
            "ram".to_string()
        } else {
            format!("rom {:#x} bytes", cartridge.chr_rom().len())
        },
        cartridge.mapper_number(),
        bus.name_table_slots()
    );

    // first tile of the left pattern table
    let tile: Vec<u8> = (0x0000..0x0010).map(|addr| bus.read(addr)).collect();
    log::info!("Pattern table 0, tile 0: {:02x?}", tile);

    Ok(())
}
