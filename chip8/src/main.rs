//! # Chip-8
//! Runs a Chip-8 program in an SDL2 window.
//!
//! ```text
//! chip8 roms/pong.ch8 --cycles-per-frame 15 --scale 12
//! ```
//!
//! The keypad is mapped onto the 1234/QWER/ASDF/ZXCV block of the keyboard.
//! Hold Space to fast-forward, hold Backspace to rewind and press Escape to quit.
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;

use chip8_core::constants::CYCLES_PER_FRAME;
use chip8_core::{Chip8, Config, Quirks};

mod keymap;
mod run;
mod speaker;

#[doc(hidden)]
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(help = "Path to the ROM file to run")]
    rom: PathBuf,

    #[arg(short, long, default_value_t = CYCLES_PER_FRAME, help = "Instructions executed per 60Hz frame")]
    cycles_per_frame: u32,

    #[arg(short, long, default_value_t = 10, help = "Size of a Chip-8 pixel in screen pixels")]
    scale: u32,

    #[arg(short, long, help = "Log every executed instruction")]
    trace: bool,

    #[arg(short, long, help = "Disable sound")]
    mute: bool,

    #[arg(long, help = "Leave I unchanged after Fx55 and Fx65")]
    no_index_increment: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let core_level = if args.trace {
        LevelFilter::Trace
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(LevelFilter::Warn)
        .filter_module("chip8", LevelFilter::Info)
        .filter_module("chip8_core", core_level)
        .filter_module("display", LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Config {
        quirks: Quirks {
            index_increment: !args.no_index_increment,
        },
        trace: args.trace,
        ..Config::default()
    };
    let mut chip8 = Chip8::with_config(config);

    let file = File::open(&args.rom)
        .with_context(|| format!("unable to open {}", args.rom.display()))?;
    let size = chip8
        .load_rom(&mut BufReader::new(file))
        .with_context(|| format!("unable to load {}", args.rom.display()))?;
    log::info!("loaded {} bytes from {}", size, args.rom.display());

    let name = args
        .rom
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let options = run::Options {
        title: format!("Chip-8 - {}", name),
        cycles_per_frame: args.cycles_per_frame,
        scale: args.scale.max(1),
        mute: args.mute,
    };
    run::run(chip8, options)
}
