use chip8_core::{Beeper, Chip8Error};
use sdl2::{
    audio::{AudioCallback, AudioDevice, AudioSpecDesired},
    Sdl,
};

use crate::sdl_error;

const TONE_HZ: f32 = 440.0;
const VOLUME: f32 = 0.25;

/// Square wave tone that plays while the sound timer is running
pub struct SdlSpeaker {
    device: AudioDevice<SquareWave>,
    playing: bool,
}

impl SdlSpeaker {
    pub fn new(sdl_context: &Sdl) -> Result<SdlSpeaker, Chip8Error> {
        let audio_subsystem = sdl_context.audio().map_err(sdl_error)?;

        let spec = AudioSpecDesired {
            freq: Some(44_100),
            channels: Some(1),
            samples: None,
        };

        let device = audio_subsystem
            .open_playback(None, &spec, |spec| SquareWave {
                phase_inc: TONE_HZ / spec.freq as f32,
                phase: 0.0,
                volume: VOLUME,
            })
            .map_err(sdl_error)?;

        Ok(SdlSpeaker {
            device,
            playing: false,
        })
    }
}

impl Beeper for SdlSpeaker {
    fn beep(&mut self) -> Result<(), Chip8Error> {
        if !self.playing {
            self.device.resume();
            self.playing = true;
        }
        Ok(())
    }

    fn silence(&mut self) -> Result<(), Chip8Error> {
        if self.playing {
            self.device.pause();
            self.playing = false;
        }
        Ok(())
    }
}

struct SquareWave {
    phase_inc: f32,
    phase: f32,
    volume: f32,
}

impl AudioCallback for SquareWave {
    type Channel = f32;

    fn callback(&mut self, out: &mut [f32]) {
        for x in out.iter_mut() {
            *x = if self.phase <= 0.5 {
                self.volume
            } else {
                -self.volume
            };
            self.phase = (self.phase + self.phase_inc) % 1.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_wave() {
        let mut wave = SquareWave {
            phase_inc: 0.25,
            phase: 0.0,
            volume: VOLUME,
        };
        let mut out = [0.0f32; 8];

        wave.callback(&mut out);

        // Phases 0, 0.25, 0.5 high, 0.75 low, repeating
        assert_eq!(
            out,
            [VOLUME, VOLUME, VOLUME, -VOLUME, VOLUME, VOLUME, VOLUME, -VOLUME]
        );
    }
}
