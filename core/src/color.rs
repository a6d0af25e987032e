use bytemuck::{Pod, Zeroable};

use crate::framebuffer::{Framebuffer, SCREEN_HEIGHT, SCREEN_WIDTH};

pub const DEFAULT_BACKGROUND_COLOR: Chip8Color = Chip8Color::new(0, 0, 0);
pub const DEFAULT_FOREGROUND_COLOR: Chip8Color = Chip8Color::new(0, 255, 0);

/// A pixel laid out for an RGBX8888 texture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
#[repr(C, packed)]
pub struct Chip8Color {
    padding: u8,
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Chip8Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Chip8Color {
        Chip8Color { r, g, b, padding: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Color of pixels that are off
    pub background: Chip8Color,
    /// Color of pixels that are on
    pub foreground: Chip8Color,
}

impl Default for Palette {
    fn default() -> Self {
        Palette {
            background: DEFAULT_BACKGROUND_COLOR,
            foreground: DEFAULT_FOREGROUND_COLOR,
        }
    }
}

impl Palette {
    /// Paint the framebuffer row by row into `out`, which must hold 64 * 32 pixels
    pub fn paint(&self, framebuffer: &Framebuffer, out: &mut [Chip8Color]) {
        assert_eq!(
            out.len(),
            SCREEN_WIDTH * SCREEN_HEIGHT,
            "Pixel buffer must hold the whole screen"
        );

        let pixels = framebuffer.rows().iter().flatten();
        for (dst, &pxl) in out.iter_mut().zip(pixels) {
            *dst = if pxl > 0 {
                self.foreground
            } else {
                self.background
            };
        }
    }
}

pub fn pixel_bytes(pixels: &[Chip8Color]) -> &[u8] {
    bytemuck::cast_slice(pixels)
}
