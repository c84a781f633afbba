//! # Chip-8 core
//! The state, instruction set and timers of a Chip-8 virtual machine.
//!
//! Everything that talks to the outside world (windows, keyboards, speakers, files) is left to
//! the caller, which drives a `Chip8` roughly like so:
//! ```no_run
//! use chip8_core::{Chip8, constants::CYCLES_PER_FRAME};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut chip8 = Chip8::new();
//! chip8.load_rom(&mut std::fs::File::open("pong.ch8")?)?;
//! loop {
//!     for _ in 0..CYCLES_PER_FRAME {
//!         chip8.step()?;
//!     }
//!     chip8.advance_timers();
//!     if let Some(_frame) = chip8.take_frame() {
//!         // present the frame
//!     }
//!     // sleep until the next 60Hz frame
//! }
//! # }
//! ```
pub use chip8::Chip8;
pub use config::{Config, Quirks};
pub use error::{Fault, LoadError};

mod chip8;
mod config;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;
