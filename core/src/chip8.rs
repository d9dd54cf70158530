use std::io::Read;

use log::{debug, error, trace};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::constants::{MAX_PROGRAM_SIZE, PROGRAM_START};
use crate::error::{Fault, LoadError};
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::operations::{execute, Context};
use crate::quirks::Quirks;
use crate::state::{FrameBuffer, StackError, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Owns all of its state exclusively. The outside world gets read-only views between cycles:
/// - the frame buffer, for some display to render
/// - the timers, for some speaker to beep while the sound timer runs
/// - the full `State`, for debugging
///
/// Supplies interfaces for:
/// - loading roms
/// - advancing the machine by one cycle given the current key state
pub struct Chip8 {
    state: State,
    quirks: Quirks,
    rng: Box<dyn RngCore + Send>,
    fault: Option<Fault>,
}

impl Chip8 {
    pub fn new() -> Self {
        Self::with_quirks(Quirks::default())
    }

    pub fn with_quirks(quirks: Quirks) -> Self {
        Chip8 {
            state: State::new(),
            quirks,
            rng: Box::new(StdRng::from_entropy()),
            fault: None,
        }
    }

    /// Replaces the source of `CXNN`'s random bytes
    pub fn with_rng(mut self, rng: impl RngCore + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Load a rom from a source file
    ///
    /// # Arguments
    /// * `reader` a reader that yields the whole ROM image
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, LoadError> {
        let mut program = Vec::with_capacity(MAX_PROGRAM_SIZE);
        reader.read_to_end(&mut program)?;
        self.load_program(&program)?;
        Ok(program.len())
    }

    /// Resets the machine, copies `program` to 0x200 and points the pc at it.
    /// Quirks and the random source survive; everything else, including a halt, does not.
    /// Nothing changes if the program doesn't fit.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::ProgramTooLarge {
                size: program.len(),
            });
        }

        self.state = State::new();
        self.fault = None;
        let start = PROGRAM_START as usize;
        self.state.memory[start..start + program.len()].copy_from_slice(program);
        self.state.pc = PROGRAM_START;
        debug!("loaded {} byte program at {:#05X}", program.len(), PROGRAM_START);
        Ok(())
    }

    /// Advances the machine by a single cycle
    /// - fetches the opcode at the pc and moves the pc past it
    /// - decodes and executes it, consulting `keypad` for key instructions
    /// - counts both timers down
    ///
    /// A fault halts the machine: the pc is left on the faulting instruction and every later
    /// call returns the same fault without doing anything.
    pub fn cycle(&mut self, keypad: &dyn Keypad) -> Result<(), Fault> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let pc = self.state.pc;
        let op = self.state.fetch();
        self.state.advance_pc();

        let instruction = Instruction::decode(op);
        trace!(
            "{:03X}: {:04X} {:?} v{:02X?} i{:04X}",
            pc,
            op,
            instruction,
            self.state.v,
            self.state.i
        );
        if let Instruction::Unknown(_) = instruction {
            debug!("ignoring unknown opcode {:04X} at {:#05X}", op, pc);
        }

        let mut ctx = Context {
            keypad,
            rng: &mut *self.rng,
            quirks: self.quirks,
        };
        if let Err(err) = execute(instruction, &mut self.state, &mut ctx) {
            let fault = match err {
                StackError::Overflow => Fault::StackOverflow { pc, opcode: op },
                StackError::Underflow => Fault::StackUnderflow { pc, opcode: op },
            };
            error!("halting: {}", fault);
            self.state.pc = pc;
            self.fault = Some(fault);
            return Err(fault);
        }

        self.state.decay_timers();
        Ok(())
    }

    /// Returns the FrameBuffer if the display should be redrawn, and marks it as drawn
    pub fn get_frame(&mut self) -> Option<&FrameBuffer> {
        if std::mem::take(&mut self.state.draw_flag) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The FrameBuffer as it stands, whether or not it changed
    pub fn frame(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// Whether a speaker should be sounding right now
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    /// The fault that halted the machine, if any
    pub fn halted(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::mock::StepRng;

    use super::*;
    use crate::keypad::Keyboard;

    fn chip8_with(program: &[u8]) -> Chip8 {
        let mut chip8 = Chip8::new().with_rng(StepRng::new(0, 1));
        chip8.load_program(program).unwrap();
        chip8
    }

    #[test]
    fn test_load_program_sets_pc() {
        let chip8 = chip8_with(&[0x00, 0xE0]);
        assert_eq!(chip8.state.pc, 0x200);
        assert_eq!(chip8.state.memory[0x200..0x202], [0x00, 0xE0]);
    }

    #[test]
    fn test_load_rom_from_reader() {
        let mut chip8 = Chip8::new();
        let mut rom: &[u8] = &[0x12, 0x00, 0xAB];
        assert_eq!(chip8.load_rom(&mut rom).unwrap(), 3);
        assert_eq!(chip8.state.memory[0x200..0x203], [0x12, 0x00, 0xAB]);
    }

    #[test]
    fn test_load_program_fills_memory_exactly() {
        let mut chip8 = Chip8::new();
        let program = vec![0xAA; MAX_PROGRAM_SIZE];
        chip8.load_program(&program).unwrap();
        assert_eq!(chip8.state.memory[0xFFF], 0xAA);
    }

    #[test]
    fn test_load_program_rejects_oversized_program() {
        let mut chip8 = Chip8::new();
        let program = vec![0xAA; MAX_PROGRAM_SIZE + 1];
        match chip8.load_program(&program) {
            Err(LoadError::ProgramTooLarge { size }) => assert_eq!(size, MAX_PROGRAM_SIZE + 1),
            other => panic!("expected ProgramTooLarge, got {:?}", other),
        }
        assert!(chip8.state.memory[0x200..].iter().all(|&b| b == 0));
        assert_eq!(chip8.state.pc, 0);
    }

    #[test]
    fn test_cycle_advances_pc() {
        let mut chip8 = chip8_with(&[0x00, 0xE0]);
        chip8.cycle(&Keyboard::new()).unwrap();
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_cycle_decays_timers_after_executing() {
        // LD V0, 5; LD DT, V0; LD V1, DT
        let mut chip8 = chip8_with(&[0x60, 0x05, 0xF0, 0x15, 0xF1, 0x07]);
        let keys = Keyboard::new();
        chip8.cycle(&keys).unwrap();
        chip8.cycle(&keys).unwrap();
        assert_eq!(chip8.state.delay_timer, 4);
        chip8.cycle(&keys).unwrap();
        assert_eq!(chip8.state.v[0x1], 4);
        assert_eq!(chip8.state.delay_timer, 3);
    }

    #[test]
    fn test_unknown_opcode_only_advances_pc() {
        let mut chip8 = chip8_with(&[0xFF, 0xFF]);
        let mut expected = chip8.state.clone();
        expected.pc = 0x202;
        chip8.cycle(&Keyboard::new()).unwrap();
        assert_eq!(chip8.state, expected);
    }

    #[test]
    fn test_wait_for_key_keeps_timers_running() {
        // LD V0, 3; LD ST, V0; LD V1, K
        let mut chip8 = chip8_with(&[0x60, 0x03, 0xF0, 0x18, 0xF1, 0x0A]);
        let mut keys = Keyboard::new();
        chip8.cycle(&keys).unwrap();
        chip8.cycle(&keys).unwrap();
        assert!(chip8.sound_active());
        for _ in 0..5 {
            chip8.cycle(&keys).unwrap();
            assert_eq!(chip8.state.pc, 0x204);
        }
        assert_eq!(chip8.state.sound_timer, 0);
        assert!(!chip8.sound_active());

        keys.press(0x7);
        chip8.cycle(&keys).unwrap();
        assert_eq!(chip8.state.pc, 0x206);
        assert_eq!(chip8.state.v[0x1], 0x7);
    }

    #[test]
    fn test_stack_underflow_halts() {
        let mut chip8 = chip8_with(&[0x60, 0x09, 0x00, 0xEE]);
        let keys = Keyboard::new();
        chip8.cycle(&keys).unwrap();
        let fault = Fault::StackUnderflow {
            pc: 0x202,
            opcode: 0x00EE,
        };
        assert_eq!(chip8.cycle(&keys), Err(fault));
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.halted(), Some(&fault));

        let halted = chip8.state.clone();
        assert_eq!(chip8.cycle(&keys), Err(fault));
        assert_eq!(chip8.state, halted);
    }

    #[test]
    fn test_reload_after_fault_starts_fresh() {
        let mut chip8 = chip8_with(&[0x00, 0xEE]);
        let keys = Keyboard::new();
        assert!(chip8.cycle(&keys).is_err());

        chip8.load_program(&[0x60, 0x01]).unwrap();
        assert_eq!(chip8.halted(), None);
        chip8.cycle(&keys).unwrap();
        assert_eq!(chip8.state.v[0x0], 0x01);
        assert_eq!(chip8.state.pc, 0x202);
    }

    #[test]
    fn test_reload_clears_previous_program() {
        // LD V3, 0x33; LD I, 0x123; CALL 0x206; 0x206: CLS
        let mut chip8 = chip8_with(&[0x63, 0x33, 0xA1, 0x23, 0x22, 0x06, 0x00, 0xE0]);
        let keys = Keyboard::new();
        for _ in 0..4 {
            chip8.cycle(&keys).unwrap();
        }

        chip8.load_program(&[0x12, 0x00]).unwrap();
        let mut expected = State::new();
        expected.memory[0x200..0x202].copy_from_slice(&[0x12, 0x00]);
        expected.pc = 0x200;
        assert_eq!(chip8.state, expected);
    }

    #[test]
    fn test_stack_overflow_halts() {
        // 0x200: CALL 0x200
        let mut chip8 = chip8_with(&[0x22, 0x00]);
        let keys = Keyboard::new();
        for _ in 0..16 {
            chip8.cycle(&keys).unwrap();
        }
        assert_eq!(
            chip8.cycle(&keys),
            Err(Fault::StackOverflow {
                pc: 0x200,
                opcode: 0x2200
            })
        );
        assert_eq!(chip8.state.call_stack(), &[0x202; 16]);
    }

    #[test]
    fn test_get_frame_only_after_drawing() {
        let mut chip8 = chip8_with(&[0x00, 0xE0, 0x12, 0x02]);
        let keys = Keyboard::new();
        assert!(chip8.get_frame().is_none());
        chip8.cycle(&keys).unwrap();
        assert!(chip8.get_frame().is_some());
        assert!(chip8.get_frame().is_none());
        chip8.cycle(&keys).unwrap();
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_random_uses_injected_rng() {
        // RND V0, 0xFF twice
        let mut chip8 = Chip8::new().with_rng(StepRng::new(0x10, 0x01));
        chip8.load_program(&[0xC0, 0xFF, 0xC1, 0xFF]).unwrap();
        let keys = Keyboard::new();
        chip8.cycle(&keys).unwrap();
        chip8.cycle(&keys).unwrap();
        assert_eq!(chip8.state.v[0x0..0x2], [0x10, 0x11]);
    }
}
