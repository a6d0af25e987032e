// CHIP-8 instruction decoding
//
// Opcodes are 16 bits, split into four nibbles (n1, n2, n3, n4). The first
// nibble selects the family, families 0x0, 0x8, 0xE and 0xF are
// disambiguated further by the low nibble or the low byte.
//
// Operand naming follows Cowgod's technical reference:
// * nnn: 12-bit address
// * kk: 8-bit immediate
// * x, y: register indices
// * n: 4-bit immediate

use std::fmt;

/// A single decoded CHIP-8 instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// 0nnn: Call machine code routine, ignored
    Sys { addr: u16 },
    /// 00E0: Clear screen
    Cls,
    /// 00EE: Return from subroutine
    Ret,
    /// 1nnn: Jump to nnn
    Jump { addr: u16 },
    /// 2nnn: Call subroutine at nnn
    Call { addr: u16 },
    /// 3xkk: Skip next instruction if Vx == kk
    SkipEqImm { x: u8, kk: u8 },
    /// 4xkk: Skip next instruction if Vx != kk
    SkipNeImm { x: u8, kk: u8 },
    /// 5xy0: Skip next instruction if Vx == Vy
    SkipEqReg { x: u8, y: u8 },
    /// 6xkk: Vx = kk
    LoadImm { x: u8, kk: u8 },
    /// 7xkk: Vx = Vx + kk, no carry
    AddImm { x: u8, kk: u8 },
    /// 8xy0: Vx = Vy
    Move { x: u8, y: u8 },
    /// 8xy1: Vx = Vx | Vy
    Or { x: u8, y: u8 },
    /// 8xy2: Vx = Vx & Vy
    And { x: u8, y: u8 },
    /// 8xy3: Vx = Vx ^ Vy
    Xor { x: u8, y: u8 },
    /// 8xy4: Vx = Vx + Vy, VF = carry
    AddReg { x: u8, y: u8 },
    /// 8xy5: Vx = Vx - Vy, VF = NOT borrow
    Sub { x: u8, y: u8 },
    /// 8xy6: Vx = Vx >> 1, VF = shifted out bit
    ShiftRight { x: u8, y: u8 },
    /// 8xy7: Vx = Vy - Vx, VF = NOT borrow
    SubN { x: u8, y: u8 },
    /// 8xyE: Vx = Vx << 1, VF = shifted out bit
    ShiftLeft { x: u8, y: u8 },
    /// 9xy0: Skip next instruction if Vx != Vy
    SkipNeReg { x: u8, y: u8 },
    /// Annn: I = nnn
    LoadIndex { addr: u16 },
    /// Bnnn: Jump to nnn + V0
    JumpV0 { addr: u16 },
    /// Cxkk: Vx = random byte & kk
    Random { x: u8, kk: u8 },
    /// Dxyn: Draw n byte sprite from I at (Vx, Vy), VF = collision
    Draw { x: u8, y: u8, n: u8 },
    /// Ex9E: Skip next instruction if key Vx is pressed
    SkipKeyPressed { x: u8 },
    /// ExA1: Skip next instruction if key Vx is not pressed
    SkipKeyNotPressed { x: u8 },
    /// Fx07: Vx = delay timer
    LoadDelay { x: u8 },
    /// Fx0A: Wait for a key press, Vx = key
    WaitKey { x: u8 },
    /// Fx15: delay timer = Vx
    SetDelay { x: u8 },
    /// Fx18: sound timer = Vx
    SetSound { x: u8 },
    /// Fx1E: I = I + Vx
    AddIndex { x: u8 },
    /// Fx29: I = location of font glyph for digit Vx
    LoadFont { x: u8 },
    /// Fx33: Store BCD of Vx at I, I+1, I+2
    StoreBcd { x: u8 },
    /// Fx55: Store V0..=Vx at I, then I = I + x + 1
    StoreRegs { x: u8 },
    /// Fx65: Load V0..=Vx from I, then I = I + x + 1
    LoadRegs { x: u8 },
}

impl Instruction {
    /// Decode a big endian opcode, returns `None` if no instruction matches
    pub fn decode(opcode: u16) -> Option<Instruction> {
        let [hi, lo] = opcode.to_be_bytes();

        // Instruction split into nibbels(4bits) 1-4
        let n1 = hi >> 4;
        let n2 = hi & 0x0f;
        let n3 = lo >> 4;
        let n4 = lo & 0x0f;

        let addr = opcode & 0x0fff;
        let (x, y, n, kk) = (n2, n3, n4, lo);

        let inst = match (n1, n2, n3, n4) {
            (0x0, 0x0, 0xe, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xe, 0xe) => Instruction::Ret,
            (0x0, _, _, _) => Instruction::Sys { addr },
            (0x1, _, _, _) => Instruction::Jump { addr },
            (0x2, _, _, _) => Instruction::Call { addr },
            (0x3, _, _, _) => Instruction::SkipEqImm { x, kk },
            (0x4, _, _, _) => Instruction::SkipNeImm { x, kk },
            (0x5, _, _, _) => Instruction::SkipEqReg { x, y },
            (0x6, _, _, _) => Instruction::LoadImm { x, kk },
            (0x7, _, _, _) => Instruction::AddImm { x, kk },
            (0x8, _, _, 0x0) => Instruction::Move { x, y },
            (0x8, _, _, 0x1) => Instruction::Or { x, y },
            (0x8, _, _, 0x2) => Instruction::And { x, y },
            (0x8, _, _, 0x3) => Instruction::Xor { x, y },
            (0x8, _, _, 0x4) => Instruction::AddReg { x, y },
            (0x8, _, _, 0x5) => Instruction::Sub { x, y },
            (0x8, _, _, 0x6) => Instruction::ShiftRight { x, y },
            (0x8, _, _, 0x7) => Instruction::SubN { x, y },
            (0x8, _, _, 0xe) => Instruction::ShiftLeft { x, y },
            (0x9, _, _, _) => Instruction::SkipNeReg { x, y },
            (0xa, _, _, _) => Instruction::LoadIndex { addr },
            (0xb, _, _, _) => Instruction::JumpV0 { addr },
            (0xc, _, _, _) => Instruction::Random { x, kk },
            (0xd, _, _, _) => Instruction::Draw { x, y, n },
            (0xe, _, 0x9, 0xe) => Instruction::SkipKeyPressed { x },
            (0xe, _, 0xa, 0x1) => Instruction::SkipKeyNotPressed { x },
            (0xf, _, 0x0, 0x7) => Instruction::LoadDelay { x },
            (0xf, _, 0x0, 0xa) => Instruction::WaitKey { x },
            (0xf, _, 0x1, 0x5) => Instruction::SetDelay { x },
            (0xf, _, 0x1, 0x8) => Instruction::SetSound { x },
            (0xf, _, 0x1, 0xe) => Instruction::AddIndex { x },
            (0xf, _, 0x2, 0x9) => Instruction::LoadFont { x },
            (0xf, _, 0x3, 0x3) => Instruction::StoreBcd { x },
            (0xf, _, 0x5, 0x5) => Instruction::StoreRegs { x },
            (0xf, _, 0x6, 0x5) => Instruction::LoadRegs { x },
            _ => return None,
        };

        Some(inst)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match *self {
            Sys { addr } => write!(f, "SYS 0x{:03x}", addr),
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jump { addr } => write!(f, "JP 0x{:03x}", addr),
            Call { addr } => write!(f, "CALL 0x{:03x}", addr),
            SkipEqImm { x, kk } => write!(f, "SE V{:X}, 0x{:02x}", x, kk),
            SkipNeImm { x, kk } => write!(f, "SNE V{:X}, 0x{:02x}", x, kk),
            SkipEqReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm { x, kk } => write!(f, "LD V{:X}, 0x{:02x}", x, kk),
            AddImm { x, kk } => write!(f, "ADD V{:X}, 0x{:02x}", x, kk),
            Move { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight { x, y } => write!(f, "SHR V{:X}, V{:X}", x, y),
            SubN { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft { x, y } => write!(f, "SHL V{:X}, V{:X}", x, y),
            SkipNeReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex { addr } => write!(f, "LD I, 0x{:03x}", addr),
            JumpV0 { addr } => write!(f, "JP V0, 0x{:03x}", addr),
            Random { x, kk } => write!(f, "RND V{:X}, 0x{:02x}", x, kk),
            Draw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipKeyPressed { x } => write!(f, "SKP V{:X}", x),
            SkipKeyNotPressed { x } => write!(f, "SKNP V{:X}", x),
            LoadDelay { x } => write!(f, "LD V{:X}, DT", x),
            WaitKey { x } => write!(f, "LD V{:X}, K", x),
            SetDelay { x } => write!(f, "LD DT, V{:X}", x),
            SetSound { x } => write!(f, "LD ST, V{:X}", x),
            AddIndex { x } => write!(f, "ADD I, V{:X}", x),
            LoadFont { x } => write!(f, "LD F, V{:X}", x),
            StoreBcd { x } => write!(f, "LD B, V{:X}", x),
            StoreRegs { x } => write!(f, "LD [I], V{:X}", x),
            LoadRegs { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}
