use std::ops::Range;

use crate::constants::{
    ADDRESS_MASK, DISPLAY_HEIGHT, DISPLAY_WIDTH, FLAG_REGISTER, FONT_START, MEMORY_SIZE,
    REGISTER_COUNT, STACK_DEPTH,
};
use crate::font::FONT_SET;

/// Memory holding the font table, read-only once the machine is built
const FONT_RANGE: Range<usize> = FONT_START as usize..FONT_START as usize + FONT_SET.len();

/// The FrameBuffer is row-major; pixel (x, y) lives at `y * DISPLAY_WIDTH + x`
pub type FrameBuffer = [bool; DISPLAY_WIDTH * DISPLAY_HEIGHT];

/// The internal state of the Chip-8
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag and is clobbered by arithmetic and drawing
/// - (i) a 16-bit index register; it is never masked, but every memory access through it is
///
/// Counter
/// - (pc) a 16-bit program counter, always a 12-bit address
///
/// Stack
/// - (stack) 16 return addresses
/// - (sp) the number of addresses currently on the stack
///
/// Timers
/// - 2 8-bit timers (delay & sound) that count down once per cycle and stop at 0
///
/// ## Memory
/// - 4096 bytes of addressable memory
///     - 0x050..0x0A0 holds the font
///     - 0x200.. holds the program
/// - 64x32 frame buffer of on/off pixels
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
}

/// Why a stack operation could not complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    Overflow,
    Underflow,
}

impl State {
    pub fn new() -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + FONT_SET.len()].copy_from_slice(&FONT_SET);

        State {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: 0,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            memory,
            frame_buffer: [false; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
        }
    }

    /// Reads the byte at `addr`, wrapping addresses past the end of memory
    pub fn read_byte(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDRESS_MASK) as usize]
    }

    /// Writes `value` at `addr`, wrapping addresses past the end of memory.
    /// Writes landing in the font table are dropped.
    pub fn write_byte(&mut self, addr: u16, value: u8) {
        let addr = (addr & ADDRESS_MASK) as usize;
        if FONT_RANGE.contains(&addr) {
            return;
        }
        self.memory[addr] = value;
    }

    /// Reads `i + offset`
    pub fn read_indexed(&self, offset: u16) -> u8 {
        self.read_byte(self.i.wrapping_add(offset))
    }

    /// Writes `i + offset`
    pub fn write_indexed(&mut self, offset: u16, value: u8) {
        self.write_byte(self.i.wrapping_add(offset), value);
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub fn fetch(&self) -> u16 {
        let left = u16::from(self.read_byte(self.pc));
        let right = u16::from(self.read_byte(self.pc.wrapping_add(1)));
        left << 8 | right
    }

    /// Moves the pc past the instruction that was just fetched, wrapping to 0 past 4095
    pub fn advance_pc(&mut self) {
        self.pc = self.pc.wrapping_add(2);
        if self.pc > ADDRESS_MASK {
            self.pc = 0;
        }
    }

    /// Skips the next instruction if `cond` holds
    pub fn skip_if(&mut self, cond: bool) {
        if cond {
            self.jump(self.pc.wrapping_add(2));
        }
    }

    pub fn jump(&mut self, addr: u16) {
        self.pc = addr & ADDRESS_MASK;
    }

    /// Pushes a return address onto the stack
    pub fn push(&mut self, addr: u16) -> Result<(), StackError> {
        let slot = self.stack.get_mut(self.sp).ok_or(StackError::Overflow)?;
        *slot = addr;
        self.sp += 1;
        Ok(())
    }

    /// Pops the most recently pushed return address
    pub fn pop(&mut self) -> Result<u16, StackError> {
        if self.sp == 0 {
            return Err(StackError::Underflow);
        }
        self.sp -= 1;
        Ok(self.stack[self.sp])
    }

    /// The return addresses currently on the stack, oldest first
    pub fn call_stack(&self) -> &[u16] {
        &self.stack[..self.sp]
    }

    /// VF = 1 if `set` else 0
    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG_REGISTER] = u8::from(set);
    }

    pub fn pixel(&self, x: usize, y: usize) -> bool {
        self.frame_buffer[y * DISPLAY_WIDTH + x]
    }

    /// Flips the pixel at (x, y), returning true if it was turned off
    pub fn toggle_pixel(&mut self, x: usize, y: usize) -> bool {
        let pixel = &mut self.frame_buffer[y * DISPLAY_WIDTH + x];
        *pixel = !*pixel;
        self.draw_flag = true;
        !*pixel
    }

    pub fn clear_screen(&mut self) {
        self.frame_buffer = [false; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        self.draw_flag = true;
    }

    /// Counts both timers down by one, stopping at 0
    pub fn decay_timers(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
