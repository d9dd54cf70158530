use std::fs;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use log::{debug, info};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use vip8_core::{Chip8, Keyboard, Quirks};
use vip8_display::Display;

use crate::keymap::keymap;

pub fn run(rom: &Path, hz: u32, scale: u32, quirks: Quirks) -> anyhow::Result<()> {
    let mut chip8 = Chip8::with_quirks(quirks);
    let mut keys = Keyboard::new();

    // Load ROM before touching the window so a bad ROM never opens one
    let program = fs::read(rom).with_context(|| format!("unable to read {}", rom.display()))?;
    chip8
        .load_program(&program)
        .with_context(|| format!("unable to load {}", rom.display()))?;
    info!("loaded {} bytes", program.len());

    // Get SDL2 context
    let sdl = sdl2::init().map_err(|e| anyhow!(e))?;
    let mut display = Display::new(&sdl, scale).map_err(|e| anyhow!(e))?;
    let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;
    display.render(chip8.frame()).map_err(|e| anyhow!(e))?;

    let cycle_time = Duration::from_nanos(1_000_000_000 / u64::from(hz));
    let mut beeping = false;

    'event: loop {
        let cycle_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keys.press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        keys.release(kc);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        if let Err(fault) = chip8.cycle(&keys) {
            return Err(anyhow!(fault).context(format!("{} halted", rom.display())));
        }

        // Render only once the cycle has fully completed
        if let Some(frame) = chip8.get_frame() {
            display.render(frame).map_err(|e| anyhow!(e))?;
        }

        // No audio output; just note when the beeper would change
        if chip8.sound_active() != beeping {
            beeping = !beeping;
            debug!("beeper {}", if beeping { "on" } else { "off" });
        }

        // Handle timing
        let elapsed = cycle_start.elapsed();
        if elapsed < cycle_time {
            thread::sleep(cycle_time - elapsed);
        } else {
            debug!("cycle overran by {:?}", elapsed - cycle_time);
        }
    }

    info!("window closed");
    Ok(())
}
