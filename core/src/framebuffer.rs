pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// Display: 64x32 pixels 1 bit monochrome, one byte (0 or 1) per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: [[u8; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Framebuffer::new()
    }
}

impl Framebuffer {
    pub fn new() -> Framebuffer {
        Framebuffer {
            pixels: [[0u8; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.pixels
            .iter_mut()
            .for_each(|row| row.iter_mut().for_each(|p| *p = 0));
    }

    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[y][x]
    }

    pub fn rows(&self) -> &[[u8; SCREEN_WIDTH]; SCREEN_HEIGHT] {
        &self.pixels
    }

    /// XOR an 8 pixel wide sprite onto the screen with its top left corner at
    /// (x mod 64, y mod 32). Rows and columns past the edge are either dropped
    /// (`clip`) or wrapped to the opposite side.
    ///
    /// Returns true if any pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8], clip: bool) -> bool {
        // Origin where we start to draw
        let ox = x as usize % SCREEN_WIDTH;
        let oy = y as usize % SCREEN_HEIGHT;

        let mut collision = false;

        for (row, &data) in sprite.iter().enumerate() {
            let y = oy + row;
            if y >= SCREEN_HEIGHT && clip {
                continue;
            }
            let y = y % SCREEN_HEIGHT;

            for column in 0..8 {
                let x = ox + column;
                if x >= SCREEN_WIDTH && clip {
                    continue;
                }
                let x = x % SCREEN_WIDTH;

                let bit = (data >> (7 - column)) & 1;
                let pxl = &mut self.pixels[y][x];
                if bit == 1 && *pxl == 1 {
                    collision = true;
                }
                *pxl ^= bit;
            }
        }

        collision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_columns(fb: &Framebuffer, y: usize) -> Vec<usize> {
        (0..SCREEN_WIDTH).filter(|&x| fb.pixel(x, y) == 1).collect()
    }

    #[test]
    fn test_new_is_blank() {
        let fb = Framebuffer::new();
        assert!(fb.rows().iter().flatten().all(|&p| p == 0));
    }

    #[test]
    fn test_draw_then_clear() {
        let mut fb = Framebuffer::new();
        fb.draw_sprite(3, 4, &[0xFF, 0xFF], false);
        assert_eq!(lit_columns(&fb, 4), (3..11).collect::<Vec<_>>());

        fb.clear();

        assert_eq!(fb, Framebuffer::new());
    }

    #[test]
    fn test_draw_twice_collides() {
        let mut fb = Framebuffer::new();

        assert!(!fb.draw_sprite(0, 0, &[0xFF], false));
        assert!(fb.draw_sprite(0, 0, &[0xFF], false));
        assert!(lit_columns(&fb, 0).is_empty());
    }

    #[test]
    fn test_overlapping_bits_only_collide() {
        let mut fb = Framebuffer::new();

        assert!(!fb.draw_sprite(0, 0, &[0xF0], false));
        assert!(!fb.draw_sprite(0, 0, &[0x0F], false));
        assert_eq!(lit_columns(&fb, 0), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_clip_right_edge() {
        let mut fb = Framebuffer::new();

        fb.draw_sprite(60, 0, &[0xFF], true);

        assert_eq!(lit_columns(&fb, 0), vec![60, 61, 62, 63]);
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut fb = Framebuffer::new();

        fb.draw_sprite(60, 0, &[0xFF], false);

        assert_eq!(lit_columns(&fb, 0), vec![0, 1, 2, 3, 60, 61, 62, 63]);
    }

    #[test]
    fn test_clip_bottom_edge() {
        let mut fb = Framebuffer::new();

        fb.draw_sprite(0, 30, &[0x80, 0x80, 0x80, 0x80], true);

        assert_eq!(lit_columns(&fb, 30), vec![0]);
        assert_eq!(lit_columns(&fb, 31), vec![0]);
        assert!(lit_columns(&fb, 0).is_empty());
        assert!(lit_columns(&fb, 1).is_empty());
    }

    #[test]
    fn test_wrap_bottom_edge() {
        let mut fb = Framebuffer::new();

        fb.draw_sprite(0, 30, &[0x80, 0x80, 0x80, 0x80], false);

        for y in [30, 31, 0, 1] {
            assert_eq!(lit_columns(&fb, y), vec![0], "row {} should be lit", y);
        }
    }

    #[test]
    fn test_origin_wraps_before_drawing() {
        let mut fb = Framebuffer::new();

        // 70 % 64 = 6, 33 % 32 = 1
        fb.draw_sprite(70, 33, &[0x80], true);

        assert_eq!(lit_columns(&fb, 1), vec![6]);
    }
}
