//! CHIP-8 virtual machine: interpreter, timers, framebuffer and the run loop
//! that drives them against a host supplied display, keypad and speaker.

mod chip8;
mod color;
mod driver;
mod error;
mod framebuffer;
mod instruction;
mod io;
mod rom;
mod timers;

pub use chip8::{
    Chip8, Chip8Builder, Quirks, DEFAULT_FONT, MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START,
    REDRAW_THRESHOLD,
};
pub use color::{
    pixel_bytes, Chip8Color, Palette, DEFAULT_BACKGROUND_COLOR, DEFAULT_FOREGROUND_COLOR,
};
pub use driver::{run, RunConfig, DEFAULT_CYCLE_HZ, DEFAULT_TIMER_HZ};
pub use error::Chip8Error;
pub use framebuffer::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use instruction::Instruction;
pub use io::{Beeper, InputSource, InputState, Keypad, Renderer};
pub use rom::read_rom;
pub use timers::{TimerHandle, Timers};
