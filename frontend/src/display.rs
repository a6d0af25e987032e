use chip8_core::{
    pixel_bytes, Chip8Color, Chip8Error, Framebuffer, Palette, Renderer, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};
use sdl2::{
    pixels::{Color, PixelFormatEnum},
    render::{Canvas, Texture, TextureCreator},
    video::{Window, WindowContext},
    Sdl,
};

use crate::sdl_error;

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub title: String,
    /// Display scaling factor
    pub scale: u32,
    pub palette: Palette,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            title: "CHIP-8".to_string(),
            scale: 10,
            palette: Palette::default(),
        }
    }
}

/// Open a window sized for the CHIP-8 screen and clear it to the background color
pub fn open_canvas(sdl_context: &Sdl, settings: &DisplaySettings) -> Result<Canvas<Window>, Chip8Error> {
    let video_subsystem = sdl_context.video().map_err(sdl_error)?;

    let window = video_subsystem
        .window(
            &settings.title,
            SCREEN_WIDTH as u32 * settings.scale,
            SCREEN_HEIGHT as u32 * settings.scale,
        )
        .position_centered()
        .build()
        .map_err(sdl_error)?;

    let mut canvas = window.into_canvas().build().map_err(sdl_error)?;

    let background = settings.palette.background;
    canvas.set_draw_color(Color::RGB(background.r, background.g, background.b));
    canvas.clear();
    canvas.present();

    Ok(canvas)
}

/// Presents the framebuffer in an SDL window through a streaming texture
pub struct SdlDisplay<'a> {
    canvas: Canvas<Window>,
    texture: Texture<'a>,
    palette: Palette,
    pixels: Vec<Chip8Color>,
}

impl<'a> SdlDisplay<'a> {
    /// The texture lives as long as `texture_creator`, which must come from `canvas`
    pub fn new(
        canvas: Canvas<Window>,
        texture_creator: &'a TextureCreator<WindowContext>,
        palette: Palette,
    ) -> Result<SdlDisplay<'a>, Chip8Error> {
        let texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGBX8888,
                SCREEN_WIDTH as u32,
                SCREEN_HEIGHT as u32,
            )
            .map_err(sdl_error)?;

        Ok(SdlDisplay {
            canvas,
            texture,
            palette,
            pixels: vec![palette.background; SCREEN_WIDTH * SCREEN_HEIGHT],
        })
    }
}

impl Renderer for SdlDisplay<'_> {
    fn render(&mut self, framebuffer: &Framebuffer) -> Result<(), Chip8Error> {
        self.palette.paint(framebuffer, &mut self.pixels);

        // Copy CHIP-8 display buffer into GPU texture
        self.texture
            .update(None, pixel_bytes(&self.pixels), SCREEN_WIDTH * 4)
            .map_err(sdl_error)?;

        // Copy texture to Canvas, scaled to the window
        self.canvas
            .copy(&self.texture, None, None)
            .map_err(sdl_error)?;
        self.canvas.present();

        Ok(())
    }
}
