use std::path::PathBuf;

use clap::Parser;
use log::info;

use vip8_core::{Quirks, CLOCK_RATE};

mod keymap;
mod run;

/// Runs a CHIP-8 ROM in an SDL2 window
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the ROM file to run
    rom: PathBuf,

    /// Cycles per second; each cycle runs one instruction and ticks the timers once
    #[arg(long, default_value_t = CLOCK_RATE)]
    hz: u32,

    /// Size of each CHIP-8 pixel on screen
    #[arg(long, default_value_t = 10)]
    scale: u32,

    /// Wrap sprites around the screen edges instead of clipping them
    #[arg(long)]
    wrap_sprites: bool,

    /// Make EX9E/EXA1 test the key held in VX rather than key X
    #[arg(long)]
    key_register: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    anyhow::ensure!(args.hz > 0, "--hz must be at least 1");

    let quirks = Quirks {
        sprite_wrap: args.wrap_sprites,
        key_from_register: args.key_register,
    };
    info!("running {} at {} Hz with {:?}", args.rom.display(), args.hz, quirks);

    run::run(&args.rom, args.hz, args.scale, quirks)
}
