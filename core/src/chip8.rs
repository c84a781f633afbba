use std::collections::VecDeque;
use std::io::Read;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::config::Config;
use crate::constants::{MAX_ROM_SIZE, MEMORY_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::instruction::{execute, mnemonic};
use crate::opcode;
use crate::operations::Context;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///  - the loaded `rom` so the machine can be reset
///  - the random number generator used by `Cxkk`
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - advancing its timers
/// - inspecting its frame buffer for rendering by some display
/// - inspecting its sound timer for playing a tone
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
    rom: Vec<u8>,
    config: Config,
    rng: Box<dyn RngCore>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::with_rng(config, Box::new(StdRng::from_entropy()))
    }

    /// Creates a Chip8 whose `Cxkk` instructions draw bytes from `rng`
    pub fn with_rng(config: Config, rng: Box<dyn RngCore>) -> Self {
        Chip8 {
            state: State::new(),
            previous_states: VecDeque::new(),
            rom: Vec::new(),
            config,
            rng,
        }
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a file reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        // Read one byte past the limit so oversized ROMs are rejected rather than truncated
        reader
            .take(MAX_ROM_SIZE as u64 + 1)
            .read_to_end(&mut rom)?;
        self.load_bytes(&rom)
    }

    /// Resets the machine and copies `rom` into memory at 0x200
    ///
    /// Returns the number of bytes loaded.
    pub fn load_bytes(&mut self, rom: &[u8]) -> Result<usize, LoadError> {
        if rom.len() > MAX_ROM_SIZE {
            return Err(LoadError::too_large(rom.len()));
        }
        self.rom = rom.to_vec();
        self.reset();
        debug!("loaded {} byte ROM", rom.len());
        Ok(rom.len())
    }

    /// Restores the machine to its initial state with the current ROM loaded
    pub fn reset(&mut self) {
        let start = PROGRAM_START as usize;
        self.state = State::new();
        self.state.memory[start..start + self.rom.len()].copy_from_slice(&self.rom);
        self.previous_states.clear();
    }

    /// The complete machine state
    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The FrameBuffer as it currently stands
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether the FrameBuffer changed since it was last presented
    pub fn redraw_pending(&self) -> bool {
        self.state.draw_flag
    }

    /// Marks the FrameBuffer as presented
    pub fn clear_redraw(&mut self) {
        self.state.draw_flag = false;
    }

    /// Returns the FrameBuffer if the display should be redrawn, marking it as presented
    pub fn take_frame(&mut self) -> Option<&FrameBuffer> {
        if self.state.draw_flag {
            self.state.draw_flag = false;
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    /// Set the pressed status of key; keys beyond 0xF are ignored
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        match self.state.keypad.get_mut(key as usize) {
            Some(status) => *status = pressed,
            None => warn!("ignoring key {:#X}, the keypad only has keys 0x0..=0xF", key),
        }
    }

    pub fn delay_timer(&self) -> u8 {
        self.state.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.state.sound_timer
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Advances the CPU by a single instruction
    /// - gets and executes the next opcode
    /// - saves the state from before it for rewinding
    ///
    /// A fault leaves the state as it was before the call.
    pub fn step(&mut self) -> Result<(), Fault> {
        let op = self.get_op()?;
        if self.config.trace {
            trace!(
                "{:03X}  {:04X}  {:<16} v{:02X?} i{:03X} sp{}",
                self.state.pc,
                op,
                mnemonic(&op),
                self.state.v,
                self.state.i,
                self.state.sp
            );
        }

        let previous = (self.config.history > 0).then(|| self.state.clone());
        let mut ctx = Context {
            rng: self.rng.as_mut(),
            quirks: self.config.quirks,
        };
        execute(op, &mut self.state, &mut ctx)?;
        if let Some(previous) = previous {
            self.save_state(previous);
        }
        Ok(())
    }

    /// Reverses the CPU by a single instruction if possible
    /// - if there are previous_states, pops the last one and restores it
    ///
    /// The restored frame is always flagged for redrawing. Returns whether a state was restored.
    pub fn reverse_cpu(&mut self) -> bool {
        match self.previous_states.pop_front() {
            Some(state) => {
                self.state = state;
                self.state.draw_flag = true;
                true
            }
            None => false,
        }
    }

    /// Puts a state in previous_states
    /// - if there are already `config.history` saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.config.history == 0 {
            return;
        }
        if self.previous_states.len() == self.config.history {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(state);
    }

    /// Decrements the delay and sound timers towards 0
    ///
    /// Meant to be called at 60Hz regardless of how many instructions ran in between.
    pub fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Fault> {
        let pc = self.state.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Fault::MemoryOutOfBounds {
                pc: self.state.pc,
                address: if pc < MEMORY_SIZE { pc + 1 } else { pc },
            });
        }
        Ok(opcode::from_bytes(
            self.state.memory[pc],
            self.state.memory[pc + 1],
        ))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}
