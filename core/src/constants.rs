/// Bytes of addressable memory
pub const MEMORY_SIZE: usize = 4096;

/// Every address is 12 bits wide
pub const ADDRESS_MASK: u16 = 0x0FFF;

/// Programs are loaded here; everything below is reserved for the interpreter
pub const PROGRAM_START: u16 = 0x200;

/// The largest program image that fits between `PROGRAM_START` and the end of memory
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// The font table lives at 0x050..0x0A0
pub const FONT_START: u16 = 0x50;

/// Each glyph is 5 rows tall
pub const GLYPH_SIZE: u16 = 5;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// V0..VF
pub const REGISTER_COUNT: usize = 16;

/// VF doubles as the carry, borrow and collision flag
pub const FLAG_REGISTER: usize = 0xF;

/// Maximum number of nested subroutine calls
pub const STACK_DEPTH: usize = 16;

/// The number of keys on the hexadecimal keypad
pub const KEY_COUNT: usize = 16;

/// Cycles per second; one instruction and one timer tick per cycle
pub const CLOCK_RATE: u32 = 60;

