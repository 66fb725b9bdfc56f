use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

use sdl2::event::Event;
use sdl2::keyboard::Keycode;

use chip8::Chip8;
use display::Display;

use crate::keymap::keymap;

/// Drives the machine against the wall clock until the window closes.
///
/// Each iteration renders a pending frame, feeds key events into the
/// keypad, runs one CPU cycle and then sleeps out the remainder of the
/// configured cycle time.
pub fn run(scale: u32, delay: u64, rom: &Path) {
    let mut chip8: Chip8 = Chip8::new();

    let rom_bytes = fs::read(rom).expect("unable to read ROM file");
    if let Err(e) = chip8.load_rom(&rom_bytes) {
        eprintln!("failed to load ROM: {}", e);
        std::process::exit(1);
    }

    // Get SDL2 context
    let sdl: sdl2::Sdl = sdl2::init().unwrap();
    let mut display: Display = Display::new(&sdl, scale);
    let mut events = sdl.event_pump().unwrap();

    // Set initial timing
    let cycle_time: Duration = Duration::from_millis(delay);
    let mut last_cycle: Instant = Instant::now();

    'event: loop {
        // If a clear or draw ran, repaint the window
        if let Some(frame) = chip8.take_frame() {
            display.render(&frame);
        }

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
                        chip8.key_press(kc);
                    }
                }
                Event::KeyUp {
                    keycode: Some(key), ..
                } => {
                    if let Some(kc) = keymap(key) {
                        chip8.key_release(kc);
                    }
                }
                _ => continue,
            };
        }

        // Update state
        chip8.cycle();

        // Handle timing
        let current_time = Instant::now();
        let elapsed_cycle_time = current_time - last_cycle;
        if cycle_time > elapsed_cycle_time {
            std::thread::sleep(cycle_time - elapsed_cycle_time);
        }
        last_cycle = current_time;
    }
}
