// Run loop: one thread ticks the timers at 60Hz while the calling thread
// polls input, executes instructions and presents the screen.

use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use crate::{
    chip8::Chip8,
    error::Chip8Error,
    io::{Beeper, InputSource, InputState, Renderer},
    timers::TimerHandle,
};

pub const DEFAULT_CYCLE_HZ: u32 = 500;
pub const DEFAULT_TIMER_HZ: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Instructions per second
    pub cycle_hz: u32,
    /// Timer decrements per second
    pub timer_hz: u32,
}

impl RunConfig {
    fn validate(&self) -> Result<(), Chip8Error> {
        if self.cycle_hz == 0 {
            return Err(Chip8Error::InvalidRate { name: "cycle" });
        }
        if self.timer_hz == 0 {
            return Err(Chip8Error::InvalidRate { name: "timer" });
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            cycle_hz: DEFAULT_CYCLE_HZ,
            timer_hz: DEFAULT_TIMER_HZ,
        }
    }
}

/// Fixed rate scheduler, sleeps until the next deadline
struct Pacer {
    interval: Duration,
    next: Instant,
}

impl Pacer {
    fn new(hz: u32) -> Pacer {
        assert!(hz > 0, "Frequency must be at least 1Hz");
        let interval = Duration::new(0, 1_000_000_000u32 / hz);
        Pacer {
            interval,
            next: Instant::now() + interval,
        }
    }

    fn wait(&mut self) {
        // Wait until next update
        let now = Instant::now();
        match self.next.checked_duration_since(now) {
            Some(delay) => {
                thread::sleep(delay);
                self.next += self.interval;
            }
            // Running late, don't try to catch up
            None => self.next = now + self.interval,
        }
    }
}

fn spawn_timer_driver(
    timers: TimerHandle,
    hz: u32,
    stop: Arc<AtomicBool>,
) -> Result<JoinHandle<()>, Chip8Error> {
    thread::Builder::new()
        .name("chip8-timers".into())
        .spawn(move || {
            let mut pacer = Pacer::new(hz);
            loop {
                pacer.wait();
                if stop.load(Ordering::Relaxed) {
                    break;
                }
                timers.tick();
            }
            log::debug!("Timer driver stopped");
        })
        .map_err(Chip8Error::TimerThread)
}

/// Run `chip` until the input source asks to quit or an error occurs.
///
/// Timers are ticked on a separate thread at `config.timer_hz`. Everything
/// else happens on the calling thread at `config.cycle_hz`: poll input,
/// execute one instruction, render if the cycle asks for it and beep while
/// the sound timer runs. Rendering blocks the next cycle.
pub fn run<R, I, B>(
    chip: &mut Chip8,
    config: &RunConfig,
    renderer: &mut R,
    input: &mut I,
    beeper: &mut B,
) -> Result<(), Chip8Error>
where
    R: Renderer + ?Sized,
    I: InputSource + ?Sized,
    B: Beeper + ?Sized,
{
    config.validate()?;

    let stop = Arc::new(AtomicBool::new(false));
    let timer_thread = spawn_timer_driver(chip.timer_handle(), config.timer_hz, stop.clone())?;
    log::debug!(
        "Running at {}Hz, timers at {}Hz",
        config.cycle_hz,
        config.timer_hz
    );

    let result = run_cycles(chip, config, renderer, input, beeper);

    stop.store(true, Ordering::Relaxed);
    if timer_thread.join().is_err() {
        log::error!("Timer driver panicked");
    }

    if let Err(err) = &result {
        log::error!("Stopped at 0x{:04x}: {}", chip.pc(), err);
    }
    result
}

fn run_cycles<R, I, B>(
    chip: &mut Chip8,
    config: &RunConfig,
    renderer: &mut R,
    input: &mut I,
    beeper: &mut B,
) -> Result<(), Chip8Error>
where
    R: Renderer + ?Sized,
    I: InputSource + ?Sized,
    B: Beeper + ?Sized,
{
    let mut pacer = Pacer::new(config.cycle_hz);

    loop {
        pacer.wait();

        let keys = match input.poll()? {
            InputState::Quit => {
                log::info!("Quit requested");
                return Ok(());
            }
            InputState::Keys(keys) => keys,
        };

        // Execute one CHIP-8 instruction
        chip.cycle(&keys)?;

        if chip.redraw() {
            renderer.render(chip.framebuffer())?;
        }

        if chip.sound_active() {
            beeper.beep()?;
        } else {
            beeper.silence()?;
        }
    }
}
