use sdl2::keyboard::Keycode;

/// What a key on the host keyboard means to the emulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// A key of the Chip-8 keypad, 0x0..=0xF
    Key(u8),
    Quit,
    Rewind,
    FastForward,
}

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// The keypad layout is mapped onto the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
/// Escape quits, Backspace rewinds and Space fast-forwards while held.
pub fn map(key: Keycode) -> Option<Input> {
    let input = match key {
        Keycode::X => Input::Key(0x0),
        Keycode::Num1 => Input::Key(0x1),
        Keycode::Num2 => Input::Key(0x2),
        Keycode::Num3 => Input::Key(0x3),
        Keycode::Q => Input::Key(0x4),
        Keycode::W => Input::Key(0x5),
        Keycode::E => Input::Key(0x6),
        Keycode::A => Input::Key(0x7),
        Keycode::S => Input::Key(0x8),
        Keycode::D => Input::Key(0x9),
        Keycode::Z => Input::Key(0xA),
        Keycode::C => Input::Key(0xB),
        Keycode::Num4 => Input::Key(0xC),
        Keycode::R => Input::Key(0xD),
        Keycode::F => Input::Key(0xE),
        Keycode::V => Input::Key(0xF),
        Keycode::Escape => Input::Quit,
        Keycode::Backspace => Input::Rewind,
        Keycode::Space => Input::FastForward,
        _ => return None,
    };
    Some(input)
}
