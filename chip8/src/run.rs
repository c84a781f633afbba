use std::time::{Duration, Instant};

use anyhow::Error;
use sdl2::event::Event;

use chip8_core::constants::FRAME_RATE;
use chip8_core::Chip8;
use display::Display;

use crate::keymap::{self, Input};
use crate::speaker::{Mute, Speaker, Tone};

/// How the front end drives the machine.
pub struct Options {
    pub title: String,
    pub cycles_per_frame: u32,
    pub scale: u32,
    pub mute: bool,
}

/// Runs `chip8` in a window until the window is closed or Escape is pressed.
///
/// Each 60Hz frame executes `cycles_per_frame` instructions and then ticks the timers once.
/// A fault halts execution but leaves the window open so the machine can be rewound.
pub fn run(mut chip8: Chip8, options: Options) -> anyhow::Result<()> {
    // Get SDL2 context
    let sdl = sdl2::init().map_err(Error::msg)?;
    let mut display = Display::new(&sdl, &options.title, options.scale).map_err(Error::msg)?;
    let mut events = sdl.event_pump().map_err(Error::msg)?;
    let mut speaker: Box<dyn Speaker> = if options.mute {
        Box::new(Mute)
    } else {
        match Tone::new(&sdl) {
            Ok(tone) => Box::new(tone),
            Err(e) => {
                log::warn!("no audio available ({}), continuing without sound", e);
                Box::new(Mute)
            }
        }
    };

    let frame_time = Duration::from_secs(1) / FRAME_RATE;

    // Whether or not the frame rate should be respected
    let mut fast_forward = false;
    // Whether the game's state should be cycled forwards or backwards
    let mut rewind = false;
    // Set by a fault, cleared by rewinding
    let mut halted = false;

    'event: loop {
        let frame_start = Instant::now();

        // Handle input
        for event in events.poll_iter() {
            match event {
                Event::Quit { .. } => break 'event,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match keymap::map(key) {
                    Some(Input::Key(k)) => chip8.key_press(k),
                    Some(Input::Quit) => break 'event,
                    Some(Input::Rewind) => rewind = true,
                    Some(Input::FastForward) => fast_forward = true,
                    None => continue,
                },
                Event::KeyUp {
                    keycode: Some(key), ..
                } => match keymap::map(key) {
                    Some(Input::Key(k)) => chip8.key_release(k),
                    Some(Input::Rewind) => rewind = false,
                    Some(Input::FastForward) => fast_forward = false,
                    _ => continue,
                },
                _ => continue,
            };
        }

        // Update state
        if rewind {
            for _ in 0..options.cycles_per_frame {
                if !chip8.reverse_cpu() {
                    break;
                }
                halted = false;
            }
        } else if !halted {
            for _ in 0..options.cycles_per_frame {
                if let Err(fault) = chip8.step() {
                    log::error!("{}; halted, hold Backspace to rewind", fault);
                    halted = true;
                    break;
                }
            }
            chip8.advance_timers();
        }
        speaker.set_active(!halted && !rewind && chip8.sound_active());

        if let Some(frame) = chip8.take_frame() {
            display.render(frame).map_err(Error::msg)?;
        }

        // Handle timing
        let elapsed = frame_start.elapsed();
        if !fast_forward && frame_time > elapsed {
            std::thread::sleep(frame_time - elapsed);
        }
    }

    speaker.set_active(false);
    Ok(())
}
