// Contracts for the host side of the emulator: something to draw the screen
// on, something to read the keypad from and something to beep with.

use crate::{error::Chip8Error, framebuffer::Framebuffer};

/// Pressed state of the 16 keys of the hex keypad, indexed by key value
pub type Keypad = [bool; 16];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    /// Stop the emulator
    Quit,
    /// Keys currently held down
    Keys(Keypad),
}

pub trait Renderer {
    fn render(&mut self, framebuffer: &Framebuffer) -> Result<(), Chip8Error>;
}

pub trait InputSource {
    fn poll(&mut self) -> Result<InputState, Chip8Error>;
}

pub trait Beeper {
    /// Called on every cycle while the sound timer is running
    fn beep(&mut self) -> Result<(), Chip8Error>;

    /// Called on every cycle while the sound timer is zero
    fn silence(&mut self) -> Result<(), Chip8Error> {
        Ok(())
    }
}
