use sdl2::pixels::PixelFormatEnum;

use chip8::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use chip8::FrameBuffer;

/// # Display
/// Renders the 64x32 monochrome framebuffer into an SDL2 window.
///
/// The streaming texture stays at the native 64x32; the canvas blit
/// stretches it to the window, so the scale factor only decides the
/// window size. `render` is only called when the machine reports a
/// changed frame.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

// TODO handle errors better
impl Display {
    /// Opens a window sized to the framebuffer times `scale`.
    ///
    /// # Arguments
    /// * `sdl` an sdl2 context to draw with
    /// * `scale` the window size multiplier for each framebuffer cell
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Self {
        let video_subsystem = sdl.video().unwrap();
        let window = video_subsystem
            .window(
                "VIP-8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .unwrap();
        let canvas = window.into_canvas().build().unwrap();

        Display { canvas }
    }

    /// Converts a framebuffer into an RGB24 pixel array by concatenating
    /// its rows, triplicating each cell into R, G and B components and
    /// stretching the 0/1 cell values to 0/255 intensity.
    fn frame_to_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .flat_map(|row| row.iter())
            .flat_map(|cell| std::iter::repeat(cell).take(3))
            .map(|cell| cell * 255)
            .collect()
    }

    /// Blits `frame` to the window.
    pub fn render(&mut self, frame: &FrameBuffer) {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .unwrap();

        texture
            .with_lock(None, |buffer: &mut [u8], _pitch: usize| {
                buffer.copy_from_slice(&Display::frame_to_texture(frame));
            })
            .unwrap();

        self.canvas.copy(&texture, None, None).unwrap();
        self.canvas.present()
    }
}
