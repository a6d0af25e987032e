use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Delay and sound timers, both count down at 60Hz until they reach zero
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn tick(&mut self) {
        if self.delay > 0 {
            self.delay -= 1;
        }

        if self.sound > 0 {
            self.sound -= 1;
        }
    }

    pub fn sound_active(&self) -> bool {
        self.sound > 0
    }
}

/// Shared handle to the timers.
///
/// The timer driver ticks from its own thread while the interpreter reads and
/// writes the same timers on the cycle thread; every access goes through one
/// lock.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle(Arc<Mutex<Timers>>);

impl TimerHandle {
    pub fn new() -> TimerHandle {
        TimerHandle::default()
    }

    fn lock(&self) -> MutexGuard<'_, Timers> {
        // Timers are two plain bytes, a panic mid update can't leave them invalid
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn tick(&self) {
        self.lock().tick();
    }

    pub fn delay(&self) -> u8 {
        self.lock().delay
    }

    pub fn set_delay(&self, value: u8) {
        self.lock().delay = value;
    }

    pub fn sound(&self) -> u8 {
        self.lock().sound
    }

    pub fn set_sound(&self, value: u8) {
        self.lock().sound = value;
    }

    pub fn sound_active(&self) -> bool {
        self.lock().sound_active()
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_tick_decrements() {
        let mut timers = Timers { delay: 10, sound: 18 };

        timers.tick();

        assert_eq!(timers, Timers { delay: 9, sound: 17 });
    }

    #[test]
    fn test_tick_floors_at_zero() {
        let mut timers = Timers { delay: 1, sound: 0 };

        for _ in 0..5 {
            timers.tick();
        }

        assert_eq!(timers, Timers { delay: 0, sound: 0 });
        assert!(!timers.sound_active());
    }

    #[test]
    fn test_handle_clones_share_state() {
        let handle = TimerHandle::new();
        let other = handle.clone();

        handle.set_sound(2);
        other.tick();

        assert_eq!(handle.sound(), 1);
        assert!(handle.sound_active());
    }

    #[test]
    fn test_concurrent_ticks() {
        let handle = TimerHandle::new();
        handle.set_delay(200);
        handle.set_sound(255);

        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        handle.tick();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }

        assert_eq!(handle.delay(), 0);
        assert_eq!(handle.sound(), 55);
    }
}
