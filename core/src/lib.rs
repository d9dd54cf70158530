pub use chip8::Chip8;
pub use constants::{CLOCK_RATE, DISPLAY_HEIGHT, DISPLAY_WIDTH};
pub use error::{Fault, LoadError};
pub use instruction::Instruction;
pub use keypad::{Keyboard, Keypad};
pub use quirks::Quirks;
pub use state::{FrameBuffer, State};

mod chip8;
pub mod constants;
mod error;
pub mod font;
mod instruction;
mod keypad;
mod opcode;
mod operations;
mod quirks;
mod sprite;
pub mod state;
