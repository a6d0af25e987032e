use chip8_core::{Chip8Error, InputSource, InputState, Keypad};
use sdl2::{event::Event, keyboard::Scancode, EventPump, Sdl};

use crate::sdl_error;

// Key mappings are as follows
// 1 2 3 C -> 1 2 3 4
// 4 5 6 D -> Q W E R
// 7 8 9 E -> A S D F
// A 0 B F -> Z X C V
const KEYMAP: [(Scancode, usize); 16] = [
    (Scancode::Num1, 0x1),
    (Scancode::Num2, 0x2),
    (Scancode::Num3, 0x3),
    (Scancode::Num4, 0xC),
    (Scancode::Q, 0x4),
    (Scancode::W, 0x5),
    (Scancode::E, 0x6),
    (Scancode::R, 0xD),
    (Scancode::A, 0x7),
    (Scancode::S, 0x8),
    (Scancode::D, 0x9),
    (Scancode::F, 0xE),
    (Scancode::Z, 0xA),
    (Scancode::X, 0x0),
    (Scancode::C, 0xB),
    (Scancode::V, 0xF),
];

fn keypad<F: Fn(Scancode) -> bool>(is_pressed: F) -> Keypad {
    let mut keys = [false; 16];
    for &(scancode, key) in KEYMAP.iter() {
        if is_pressed(scancode) {
            keys[key] = true;
        }
    }
    keys
}

pub struct SdlInput {
    event_pump: EventPump,
}

impl SdlInput {
    pub fn new(sdl_context: &Sdl) -> Result<SdlInput, Chip8Error> {
        let event_pump = sdl_context.event_pump().map_err(sdl_error)?;

        Ok(SdlInput { event_pump })
    }
}

impl InputSource for SdlInput {
    fn poll(&mut self) -> Result<InputState, Chip8Error> {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    scancode: Some(Scancode::Escape),
                    ..
                } => return Ok(InputState::Quit),
                _ => {}
            }
        }

        let state = self.event_pump.keyboard_state();
        Ok(InputState::Keys(keypad(|scancode| {
            state.is_scancode_pressed(scancode)
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keymap_covers_keypad() {
        let mut seen = [false; 16];
        for &(_, key) in KEYMAP.iter() {
            assert!(!seen[key], "key 0x{:x} mapped twice", key);
            seen[key] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_keypad_from_scancodes() {
        let keys = keypad(|scancode| scancode == Scancode::Q || scancode == Scancode::V);

        let pressed: Vec<usize> = (0..16).filter(|&k| keys[k]).collect();
        assert_eq!(pressed, vec![0x4, 0xF]);
    }

    #[test]
    fn test_keypad_nothing_pressed() {
        assert_eq!(keypad(|_| false), [false; 16]);
    }
}
