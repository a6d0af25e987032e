use std::path::Path;

use crate::error::Chip8Error;

/// Read a whole ROM file into memory
pub fn read_rom<P: AsRef<Path>>(path: P) -> Result<Vec<u8>, Chip8Error> {
    let path = path.as_ref();
    let rom = std::fs::read(path).map_err(|source| Chip8Error::RomRead {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Read {} byte ROM from {}", rom.len(), path.display());
    Ok(rom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rom() {
        let path = std::env::temp_dir().join(format!("chip8-rom-{}.ch8", std::process::id()));
        std::fs::write(&path, [0x00, 0xE0, 0x12, 0x00]).unwrap();

        let rom = read_rom(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(rom, vec![0x00, 0xE0, 0x12, 0x00]);
    }

    #[test]
    fn test_read_missing_rom() {
        let err = read_rom("does/not/exist.ch8").unwrap_err();

        assert!(matches!(err, Chip8Error::RomRead { .. }));
        assert!(err.to_string().contains("does/not/exist.ch8"));
    }
}
