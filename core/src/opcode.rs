/// # Opcodes
///
/// An instruction word is 16 bits, read big-endian from two consecutive bytes of memory.
/// It's classified by its most significant nibble into one of 16 families; the 0x0, 0x5, 0x8,
/// 0x9, 0xE and 0xF families are further split by their low nibble or low byte.
///
/// The remaining nibbles carry the operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` an 8-bit immediate that is assigned to and/or compared with Vx
/// - `[_x__]` the register Vx, or the last register of the range V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a 4-bit immediate; the height of a sprite
pub trait Opcode {
    /// The Opcode as a raw instruction word.
    fn word(&self) -> u16;

    /// Returns the Opcode's component nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x(), self.y(), self.n())
    }

    /// The Opcode's first nibble.
    /// `[f___]`
    fn family(&self) -> u8 {
        (self.word() >> 12) as u8
    }

    /// The Opcode's second nibble.
    /// `[_x__]`
    fn x(&self) -> u8 {
        ((self.word() & 0x0F00) >> 8) as u8
    }

    /// The Opcode's third nibble.
    /// `[__y_]`
    fn y(&self) -> u8 {
        ((self.word() & 0x00F0) >> 4) as u8
    }

    /// The Opcode's fourth nibble.
    /// `[___n]`
    fn n(&self) -> u8 {
        (self.word() & 0x000F) as u8
    }

    /// The Opcode's least significant byte.
    /// `[__kk]`
    fn kk(&self) -> u8 {
        (self.word() & 0x00FF) as u8
    }

    /// The Opcode without its most significant nibble.
    /// `[_nnn]`
    fn addr(&self) -> u16 {
        self.word() & 0x0FFF
    }
}

impl Opcode for u16 {
    fn word(&self) -> u16 {
        *self
    }
}

/// Combines two bytes of memory into an instruction word.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}
