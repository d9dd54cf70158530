use thiserror::Error;

use crate::constants::MAX_PROGRAM_SIZE;

/// Failures while putting a program into memory. The VM never starts after one of these.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("program is {size} bytes but at most {} fit in memory", MAX_PROGRAM_SIZE)]
    ProgramTooLarge { size: usize },

    #[error("unable to read program: {0}")]
    Io(#[from] std::io::Error),
}

/// Fatal conditions raised while executing an instruction.
///
/// `pc` is the address the faulting instruction was fetched from and `opcode` is the
/// instruction word itself.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    #[error("stack overflow calling a subroutine at {pc:#05X} (opcode {opcode:04X})")]
    StackOverflow { pc: u16, opcode: u16 },

    #[error("stack underflow returning from a subroutine at {pc:#05X} (opcode {opcode:04X})")]
    StackUnderflow { pc: u16, opcode: u16 },
}

impl Fault {
    /// Address of the instruction that faulted
    pub fn pc(&self) -> u16 {
        match *self {
            Fault::StackOverflow { pc, .. } | Fault::StackUnderflow { pc, .. } => pc,
        }
    }

    /// The instruction word that faulted
    pub fn opcode(&self) -> u16 {
        match *self {
            Fault::StackOverflow { opcode, .. } | Fault::StackUnderflow { opcode, .. } => opcode,
        }
    }
}
