use thiserror::Error;

use crate::constants::{MAX_ROM_SIZE, STACK_DEPTH};

/// Errors that can occur while loading a ROM; nothing is executed when one is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("unable to read ROM")]
    Io(#[from] std::io::Error),
}

impl LoadError {
    pub(crate) fn too_large(size: usize) -> Self {
        LoadError::TooLarge {
            size,
            max: MAX_ROM_SIZE,
        }
    }
}

/// # Fault
/// A stack or memory bound violation raised by an instruction.
///
/// The instruction at `pc` has no effect when it faults, so the machine can be inspected or
/// resumed after one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("stack overflow: call at {pc:#05X} nests deeper than {} subroutines", STACK_DEPTH)]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05X} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("memory access out of bounds at {address:#06X} by instruction at {pc:#05X}")]
    MemoryOutOfBounds { pc: u16, address: usize },
}

impl Fault {
    /// Address of the instruction that faulted
    pub fn pc(&self) -> u16 {
        match *self {
            Fault::StackOverflow { pc }
            | Fault::StackUnderflow { pc }
            | Fault::MemoryOutOfBounds { pc, .. } => pc,
        }
    }
}
