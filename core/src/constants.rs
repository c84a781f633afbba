/// Width of the frame buffer in pixels
pub const DISPLAY_WIDTH: usize = 64;
/// Height of the frame buffer in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Bytes of addressable memory (0x000..=0xFFF)
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded here and the program counter starts here
pub const PROGRAM_START: u16 = 0x200;

/// Everything from PROGRAM_START to the end of memory is available to a ROM
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

/// Keys on the hexadecimal keypad, 0x0..=0xF
pub const KEY_COUNT: usize = 16;

/// Timers tick, and the display is presented, at 60Hz
pub const FRAME_RATE: u32 = 60;

/// Instructions executed per frame by default; roughly 600 instructions per second
pub const CYCLES_PER_FRAME: u32 = 10;

/// Default number of past states kept for rewinding; a couple of seconds at the default speed
pub const MAX_SAVED_STATES: usize = 1200;

/// Bytes per glyph in the SPRITE_SHEET
pub const SPRITE_SIZE: u16 = 5;

/// # Sprite sheet
/// Built-in glyphs for the hex digits 0..F, installed at 0x000 - 0x04F.
///
/// Each glyph is 4 pixels wide and 5 rows tall; only the high nibble of each byte is drawn.
/// ```text
/// 0xF0  ####
/// 0x90  #  #
/// 0x90  #  #
/// 0x90  #  #
/// 0xF0  ####
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];
