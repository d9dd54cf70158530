use sdl2::pixels::PixelFormatEnum;

use vip8_core::{FrameBuffer, DISPLAY_HEIGHT, DISPLAY_WIDTH};

/// Bytes per pixel in an RGB24 texture
const CHANNELS: usize = 3;

/// # Display
/// An SDL2 window showing the 64x32 monochrome screen, each pixel blown up to a `scale` square.
/// Callers only need to `render` when the machine reports a new frame.
pub struct Display {
    canvas: sdl2::render::WindowCanvas,
}

impl Display {
    /// Opens a centered window sized for the screen at `scale` host pixels per pixel
    pub fn new(sdl: &sdl2::Sdl, scale: u32) -> Result<Self, String> {
        let video_subsystem = sdl.video()?;
        let window = video_subsystem
            .window(
                "vip8",
                DISPLAY_WIDTH as u32 * scale,
                DISPLAY_HEIGHT as u32 * scale,
            )
            .position_centered()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;

        Ok(Display { canvas })
    }

    /// Expands each pixel into three identical RGB bytes, white when set and black when not
    fn frame_to_sdl_texture(frame: &FrameBuffer) -> Vec<u8> {
        frame
            .iter()
            .map(|&on| if on { 0xFF } else { 0x00 })
            .flat_map(|intensity| std::iter::repeat(intensity).take(CHANNELS))
            .collect()
    }

    /// Uploads `frame` as an RGB24 texture stretched over the whole window and presents it
    pub fn render(&mut self, frame: &FrameBuffer) -> Result<(), String> {
        let texture_creator = self.canvas.texture_creator();

        let mut texture = texture_creator
            .create_texture_streaming(
                PixelFormatEnum::RGB24,
                DISPLAY_WIDTH as u32,
                DISPLAY_HEIGHT as u32,
            )
            .map_err(|e| e.to_string())?;

        let pixels = Display::frame_to_sdl_texture(frame);
        texture.with_lock(None, |buffer: &mut [u8], pitch: usize| {
            // rows may be padded out past DISPLAY_WIDTH * CHANNELS
            let row_len = DISPLAY_WIDTH * CHANNELS;
            for (y, row) in pixels.chunks(row_len).enumerate() {
                buffer[y * pitch..y * pitch + row_len].copy_from_slice(row);
            }
        })?;

        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_to_sdl_texture() {
        let mut frame: FrameBuffer = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        frame[1] = true;
        frame[DISPLAY_WIDTH] = true;
        let texture = Display::frame_to_sdl_texture(&frame);

        let mut expected: Vec<u8> = vec![0; 6144];
        expected[0..6].copy_from_slice(&[0, 0, 0, 255, 255, 255]);
        expected[192..198].copy_from_slice(&[255, 255, 255, 0, 0, 0]);

        assert_eq!(texture, expected);
    }

    #[test]
    fn test_blank_frame_is_black() {
        let frame: FrameBuffer = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        let texture = Display::frame_to_sdl_texture(&frame);
        assert_eq!(texture.len(), DISPLAY_WIDTH * DISPLAY_HEIGHT * CHANNELS);
        assert!(texture.iter().all(|&c| c == 0));
    }
}
