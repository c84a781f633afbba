use crate::constants::MAX_SAVED_STATES;

/// # Quirks
/// Behaviors that differ between interpreters of the instruction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quirks {
    /// Whether `Fx55`/`Fx65` leave I pointing past the last register transferred (I += x + 1).
    pub index_increment: bool,
}

impl Default for Quirks {
    fn default() -> Self {
        Quirks {
            index_increment: true,
        }
    }
}

/// # Config
/// Per-instance settings for a Chip8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    pub quirks: Quirks,
    /// Log every executed instruction at trace level
    pub trace: bool,
    /// How many past states to keep for `reverse_cpu`; 0 disables rewinding
    pub history: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            quirks: Quirks::default(),
            trace: false,
            history: MAX_SAVED_STATES,
        }
    }
}
