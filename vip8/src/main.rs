use std::path::PathBuf;

use clap::Parser;

mod keymap;
mod run;

/// CHIP-8 emulator.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Window size multiplier for the 64x32 display
    scale: u32,
    /// Delay between CPU cycles in milliseconds
    delay: u64,
    /// Path to the ROM file to run
    rom: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    run::run(args.scale, args.delay, &args.rom);
}
