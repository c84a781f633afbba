//! # Display
//! Presents Chip-8 frames in an SDL2 window.
pub use display::Display;

mod display;
