use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("a ROM must be provided")]
    MissingRom,

    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("failed to read ROM {}", .path.display())]
    RomRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown instruction {opcode:#06x} at {address:#06x}")]
    UnknownInstruction { opcode: u16, address: u16 },

    /// Render, input or audio collaborator failed
    #[error("frontend error: {0}")]
    Frontend(String),

    #[error("{name} rate must be at least 1Hz")]
    InvalidRate { name: &'static str },

    #[error("failed to spawn timer thread")]
    TimerThread(#[source] io::Error),
}
