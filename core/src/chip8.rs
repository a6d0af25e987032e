// CHIP-8 interpreter
//
// Useful links:
// * [Guide to making a CHIP-8 emulator](https://tobiasvl.github.io/blog/write-a-chip-8-emulator/)
// * [Cowgod's Chip-8 Technical Reference](http://devernay.free.fr/hacks/chip8/C8TECH10.HTM)
// * [Building a CHIP-8 Emulator](https://austinmorlan.com/posts/chip8_emulator/)
//

use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::{
    error::Chip8Error,
    framebuffer::Framebuffer,
    instruction::Instruction,
    io::Keypad,
    timers::TimerHandle,
};

pub const MEMORY_SIZE: usize = 0x1000;
pub const PROGRAM_START: usize = 0x200;
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START;

const FONT_ADDR: usize = 0x000;
const FONT_GLYPH_SIZE: u16 = 5;

/// Cycles without a draw after which a redraw is forced anyway
pub const REDRAW_THRESHOLD: u32 = 100;

pub static DEFAULT_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quirks {
    /// Bitwise shift (8XY6 and 8XYE) quirk: if true VY is copied into VX before shifting (COSMAC VIP)
    pub original_shift: bool,
    /// Sprite draw (DXYN) quirk: if true sprites are cut off at the screen edges instead of wrapping
    pub clipping: bool,
}

/// How the program counter moves after an instruction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PcAction {
    Advance,
    SkipNext,
    JumpTo(u16),
    /// Execute the same instruction again next cycle
    WaitForKey,
}

impl PcAction {
    fn skip_if(condition: bool) -> PcAction {
        if condition {
            PcAction::SkipNext
        } else {
            PcAction::Advance
        }
    }
}

#[derive(Debug, Default)]
pub struct Chip8Builder {
    /// ROM
    rom: Option<Vec<u8>>,
    // PRNG Seed
    rng_seed: Option<u64>,
    /// Quirks
    quirks: Quirks,
}

pub struct Chip8 {
    /// General purpose registers
    regs: [u8; 16],
    /// Index register
    index: u16,
    /// Program counter
    pc: u16,
    /// Call stack
    stack: [u16; 16],
    /// Stack pointer
    sp: u8,
    /// Delay and sound timers, shared with the timer driver
    timers: TimerHandle,
    /// Memory
    memory: Vec<u8>,
    /// Display
    framebuffer: Framebuffer,
    /// Quirks
    quirks: Quirks,
    /// PRNG Generator
    rng: StdRng,
    /// Set when the last cycle wants the screen presented
    redraw: bool,
    /// Cycles since the last redraw
    cycles_since_redraw: u32,
}

impl Chip8Builder {
    pub fn new() -> Chip8Builder {
        Chip8Builder::default()
    }

    pub fn with_rom(mut self, rom: Vec<u8>) -> Self {
        self.rom = Some(rom);
        self
    }

    pub fn with_original_shift(mut self, original_shift: bool) -> Self {
        self.quirks.original_shift = original_shift;
        self
    }

    pub fn with_clipping(mut self, clipping: bool) -> Self {
        self.quirks.clipping = clipping;
        self
    }

    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<Chip8, Chip8Error> {
        let rom = self.rom.ok_or(Chip8Error::MissingRom)?;
        if rom.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            });
        }

        // Create memory
        let mut memory = vec![0u8; MEMORY_SIZE];

        // Copy font to memory
        memory[FONT_ADDR..FONT_ADDR + DEFAULT_FONT.len()].copy_from_slice(&DEFAULT_FONT);

        // Copy rom to memory
        memory[PROGRAM_START..PROGRAM_START + rom.len()].copy_from_slice(&rom);

        // Pseudo random number generator
        let rng = match self.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        log::debug!(
            "Loaded {} byte ROM, quirks: {:?}",
            rom.len(),
            self.quirks
        );

        Ok(Chip8 {
            regs: [0u8; 16],
            index: 0,
            pc: PROGRAM_START as u16,
            stack: [0u16; 16],
            sp: 0,
            timers: TimerHandle::new(),
            memory,
            framebuffer: Framebuffer::new(),
            quirks: self.quirks,
            rng,
            redraw: false,
            cycles_since_redraw: 0,
        })
    }
}

impl Chip8 {
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Whether the framebuffer should be presented after the last cycle
    pub fn redraw(&self) -> bool {
        self.redraw
    }

    pub fn sound_active(&self) -> bool {
        self.timers.sound_active()
    }

    /// Handle for driving the timers from another thread
    pub fn timer_handle(&self) -> TimerHandle {
        self.timers.clone()
    }

    /// Fetch, decode and execute a single instruction with `keys` as the
    /// keypad state seen by that instruction.
    pub fn cycle(&mut self, keys: &Keypad) -> Result<(), Chip8Error> {
        self.redraw = false;

        let opcode = self.read_u16_be(self.pc);
        let inst = Instruction::decode(opcode).ok_or(Chip8Error::UnknownInstruction {
            opcode,
            address: self.pc,
        })?;

        log::trace!("0x{:04x}: 0x{:04x} {}", self.pc, opcode, inst);

        match self.execute(inst, keys) {
            PcAction::Advance => self.pc += 2,
            PcAction::SkipNext => self.pc += 4,
            PcAction::JumpTo(addr) => self.pc = addr,
            PcAction::WaitForKey => {}
        }

        if self.redraw {
            self.cycles_since_redraw = 0;
        } else {
            self.cycles_since_redraw += 1;
            if self.cycles_since_redraw >= REDRAW_THRESHOLD {
                self.redraw = true;
                self.cycles_since_redraw = 0;
            }
        }

        Ok(())
    }

    fn execute(&mut self, inst: Instruction, keys: &Keypad) -> PcAction {
        use Instruction::*;

        match inst {
            Sys { addr } => {
                log::warn!("Ignoring SYS 0x{:03x} at 0x{:04x}", addr, self.pc);
                PcAction::Advance
            }
            Cls => {
                self.framebuffer.clear();
                PcAction::Advance
            }
            Ret => {
                // Pop the address of the CALL and continue after it
                assert!(self.sp > 0, "Return called when stack is empty");
                self.sp -= 1;
                PcAction::JumpTo(self.stack[self.sp as usize] + 2)
            }
            Jump { addr } => PcAction::JumpTo(addr),
            Call { addr } => {
                assert!((self.sp as usize) < self.stack.len(), "Stack overflow");
                self.stack[self.sp as usize] = self.pc;
                self.sp += 1;
                PcAction::JumpTo(addr)
            }
            SkipEqImm { x, kk } => PcAction::skip_if(self.reg(x) == kk),
            SkipNeImm { x, kk } => PcAction::skip_if(self.reg(x) != kk),
            SkipEqReg { x, y } => PcAction::skip_if(self.reg(x) == self.reg(y)),
            LoadImm { x, kk } => {
                self.set_reg(x, kk);
                PcAction::Advance
            }
            AddImm { x, kk } => {
                self.set_reg(x, self.reg(x).wrapping_add(kk));
                PcAction::Advance
            }
            Move { x, y } => {
                self.set_reg(x, self.reg(y));
                PcAction::Advance
            }
            Or { x, y } => {
                self.set_reg(x, self.reg(x) | self.reg(y));
                self.regs[0xF] = 0;
                PcAction::Advance
            }
            And { x, y } => {
                self.set_reg(x, self.reg(x) & self.reg(y));
                self.regs[0xF] = 0;
                PcAction::Advance
            }
            Xor { x, y } => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
                self.regs[0xF] = 0;
                PcAction::Advance
            }
            AddReg { x, y } => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_reg(x, sum);
                self.regs[0xF] = carry as u8;
                PcAction::Advance
            }
            Sub { x, y } => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg(x, vx.wrapping_sub(vy));
                self.regs[0xF] = (vx > vy) as u8;
                PcAction::Advance
            }
            ShiftRight { x, y } => {
                if self.quirks.original_shift {
                    self.set_reg(x, self.reg(y));
                }

                let vx = self.reg(x);
                self.set_reg(x, vx >> 1);
                self.regs[0xF] = vx & 0x01;
                PcAction::Advance
            }
            SubN { x, y } => {
                let (vx, vy) = (self.reg(x), self.reg(y));
                self.set_reg(x, vy.wrapping_sub(vx));
                self.regs[0xF] = (vy > vx) as u8;
                PcAction::Advance
            }
            ShiftLeft { x, y } => {
                if self.quirks.original_shift {
                    self.set_reg(x, self.reg(y));
                }

                let vx = self.reg(x);
                self.set_reg(x, vx << 1);
                self.regs[0xF] = (vx & 0x80) >> 7;
                PcAction::Advance
            }
            SkipNeReg { x, y } => PcAction::skip_if(self.reg(x) != self.reg(y)),
            LoadIndex { addr } => {
                self.index = addr;
                PcAction::Advance
            }
            JumpV0 { addr } => PcAction::JumpTo(addr + self.regs[0] as u16),
            Random { x, kk } => {
                let n = self.rng.next_u32() as u8;
                self.set_reg(x, n & kk);
                PcAction::Advance
            }
            Draw { x, y, n } => {
                let start = self.index as usize;
                let sprite = &self.memory[start..start + n as usize];
                let collision = self.framebuffer.draw_sprite(
                    self.regs[x as usize],
                    self.regs[y as usize],
                    sprite,
                    self.quirks.clipping,
                );

                self.regs[0xF] = collision as u8;
                self.redraw = true;
                PcAction::Advance
            }
            SkipKeyPressed { x } => PcAction::skip_if(keys[self.reg(x) as usize]),
            SkipKeyNotPressed { x } => PcAction::skip_if(!keys[self.reg(x) as usize]),
            LoadDelay { x } => {
                self.set_reg(x, self.timers.delay());
                PcAction::Advance
            }
            WaitKey { x } => match keys.iter().position(|&pressed| pressed) {
                Some(key) => {
                    self.set_reg(x, key as u8);
                    PcAction::Advance
                }
                None => PcAction::WaitForKey,
            },
            SetDelay { x } => {
                self.timers.set_delay(self.reg(x));
                PcAction::Advance
            }
            SetSound { x } => {
                self.timers.set_sound(self.reg(x));
                PcAction::Advance
            }
            AddIndex { x } => {
                self.index = self.index.wrapping_add(self.reg(x) as u16);
                PcAction::Advance
            }
            LoadFont { x } => {
                self.index = FONT_ADDR as u16 + self.reg(x) as u16 * FONT_GLYPH_SIZE;
                PcAction::Advance
            }
            StoreBcd { x } => {
                let value = self.reg(x);
                self.write_u8(self.index, value / 100);
                self.write_u8(self.index.wrapping_add(1), value / 10 % 10);
                self.write_u8(self.index.wrapping_add(2), value % 10);
                PcAction::Advance
            }
            StoreRegs { x } => {
                for i in 0..=x {
                    let addr = self.index.wrapping_add(i as u16);
                    self.write_u8(addr, self.reg(i));
                }

                self.index = self.index.wrapping_add(x as u16 + 1);
                PcAction::Advance
            }
            LoadRegs { x } => {
                for i in 0..=x {
                    let addr = self.index.wrapping_add(i as u16);
                    self.set_reg(i, self.read_u8(addr));
                }

                self.index = self.index.wrapping_add(x as u16 + 1);
                PcAction::Advance
            }
        }
    }

    fn reg(&self, reg: u8) -> u8 {
        self.regs[reg as usize]
    }

    fn set_reg(&mut self, reg: u8, value: u8) {
        self.regs[reg as usize] = value;
    }

    fn read_u8(&self, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn read_u16_be(&self, addr: u16) -> u16 {
        let addr = addr as usize;
        u16::from_be_bytes([self.memory[addr], self.memory[addr + 1]])
    }

    fn write_u8(&mut self, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }
}
