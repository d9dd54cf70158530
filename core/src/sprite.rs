use crate::constants::{DISPLAY_HEIGHT, DISPLAY_WIDTH};
use crate::state::State;

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs an 8-pixel-wide, `rows`-tall sprite from memory `i..i+rows` onto the FrameBuffer at
/// (Vx, Vy), most significant bit leftmost.
///
/// Pixels past the right edge and rows past the bottom edge are clipped, unless `wrap` is set,
/// in which case the start position wraps modulo the screen size and so does every pixel.
///
/// Sets VF to 1 if any pixel was erased, otherwise 0. Returns the same.
pub fn draw_sprite(state: &mut State, x: usize, y: usize, rows: u8, wrap: bool) -> bool {
    let (mut origin_x, mut origin_y) = (state.v[x] as usize, state.v[y] as usize);
    if wrap {
        origin_x %= DISPLAY_WIDTH;
        origin_y %= DISPLAY_HEIGHT;
    }

    let mut collided = false;
    for row in 0..rows {
        let mut screen_y = origin_y + row as usize;
        if screen_y >= DISPLAY_HEIGHT {
            if !wrap {
                break;
            }
            screen_y %= DISPLAY_HEIGHT;
        }

        let sprite_row = state.read_indexed(u16::from(row));
        for bit in 0..8 {
            if (sprite_row >> (7 - bit)) & 1 == 0 {
                continue;
            }
            let mut screen_x = origin_x + bit;
            if screen_x >= DISPLAY_WIDTH {
                if !wrap {
                    continue;
                }
                screen_x %= DISPLAY_WIDTH;
            }
            collided |= state.toggle_pixel(screen_x, screen_y);
        }
    }

    state.set_flag(collided);
    collided
}
