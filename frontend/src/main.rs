use std::path::PathBuf;

use anyhow::{Context, Result};
use chip8_core::{Chip8Builder, Chip8Error, RunConfig};
use clap::{builder::BoolishValueParser, ArgAction, Parser};
use env_logger::Env;

mod display;
mod input;
mod speaker;

use display::{open_canvas, DisplaySettings, SdlDisplay};
use input::SdlInput;
use speaker::SdlSpeaker;

/// CHIP-8 Emulator
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Filepath to Chip-8 ROM file that will be executed
    #[clap(index = 1)]
    rom: PathBuf,

    /// Copy VY into VX before shifting (8XY6 and 8XYE) like the COSMAC VIP
    #[clap(index = 2, required = true, action = ArgAction::Set, value_parser = BoolishValueParser::new())]
    original_shift: bool,

    /// Cut sprites off at the screen edges instead of wrapping them [default: false]
    #[clap(index = 3, value_parser = BoolishValueParser::new())]
    clipping: Option<bool>,
}

/// SDL reports errors as strings
pub(crate) fn sdl_error(err: impl ToString) -> Chip8Error {
    Chip8Error::Frontend(err.to_string())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let clipping = args.clipping.unwrap_or(false);

    let rom = chip8_core::read_rom(&args.rom)?;
    let mut chip = Chip8Builder::new()
        .with_rom(rom)
        .with_original_shift(args.original_shift)
        .with_clipping(clipping)
        .build()
        .with_context(|| format!("Failed to load {}", args.rom.display()))?;

    log::info!(
        "Running {} (original shift: {}, clipping: {})",
        args.rom.display(),
        args.original_shift,
        clipping
    );

    let sdl_context = sdl2::init()
        .map_err(sdl_error)
        .context("Failed to initialize SDL")?;
    let settings = DisplaySettings::default();
    let canvas = open_canvas(&sdl_context, &settings).context("Failed to open window")?;
    let texture_creator = canvas.texture_creator();
    let mut display = SdlDisplay::new(canvas, &texture_creator, settings.palette)
        .context("Failed to create display texture")?;
    let mut input = SdlInput::new(&sdl_context).context("Failed to open event pump")?;
    let mut speaker = SdlSpeaker::new(&sdl_context).context("Failed to open audio device")?;

    chip8_core::run(
        &mut chip,
        &RunConfig::default(),
        &mut display,
        &mut input,
        &mut speaker,
    )?;

    Ok(())
}
