use crate::opcode::Opcode;

/// A decoded Chip-8 instruction with its operands pulled out of the opcode.
///
/// `x` and `y` are register numbers, `nn` is an 8-bit immediate, `n` a 4-bit immediate and
/// `addr` a 12-bit address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`
    Clear,
    /// `00EE`
    Return,
    /// `1NNN`
    Jump { addr: u16 },
    /// `2NNN`
    Call { addr: u16 },
    /// `3XNN`
    SkipIfEqual { x: usize, nn: u8 },
    /// `4XNN`
    SkipIfNotEqual { x: usize, nn: u8 },
    /// `5XY0`
    SkipIfRegistersEqual { x: usize, y: usize },
    /// `6XNN`
    Load { x: usize, nn: u8 },
    /// `7XNN`
    Add { x: usize, nn: u8 },
    /// `8XY0`
    Move { x: usize, y: usize },
    /// `8XY1`
    Or { x: usize, y: usize },
    /// `8XY2`
    And { x: usize, y: usize },
    /// `8XY3`
    Xor { x: usize, y: usize },
    /// `8XY4`
    AddRegisters { x: usize, y: usize },
    /// `8XY5`
    Sub { x: usize, y: usize },
    /// `8XY6`
    ShiftRight { x: usize },
    /// `8XY7`
    SubReversed { x: usize, y: usize },
    /// `8XYE`
    ShiftLeft { x: usize },
    /// `9XY0`
    SkipIfRegistersNotEqual { x: usize, y: usize },
    /// `ANNN`
    LoadIndex { addr: u16 },
    /// `BNNN`
    JumpOffset { addr: u16 },
    /// `CXNN`
    Random { x: usize, nn: u8 },
    /// `DXYN`
    Draw { x: usize, y: usize, n: u8 },
    /// `EX9E`
    SkipIfKeyPressed { x: usize },
    /// `EXA1`
    SkipIfKeyNotPressed { x: usize },
    /// `FX07`
    ReadDelay { x: usize },
    /// `FX0A`
    WaitForKey { x: usize },
    /// `FX15`
    SetDelay { x: usize },
    /// `FX18`
    SetSound { x: usize },
    /// `FX1E`
    AddIndex { x: usize },
    /// `FX29`
    LoadGlyph { x: usize },
    /// `FX33`
    StoreBcd { x: usize },
    /// `FX55`
    StoreRegisters { x: usize },
    /// `FX65`
    LoadRegisters { x: usize },
    /// Anything else; executes as a no-op
    Unknown(u16),
}

impl Instruction {
    /// Selects the correct Instruction for a given Opcode
    ///
    /// `00E0` and `00EE` are matched on the whole word; the rest of the table is keyed on the
    /// first nibble and, for the `8`, `9`, `E` and `F` families, the trailing nibble(s).
    pub fn decode(op: u16) -> Self {
        use Instruction::*;

        let (x, y) = (op.x(), op.y());
        match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Clear,
            (0x0, 0x0, 0xE, 0xE) => Return,
            (0x1, ..) => Jump { addr: op.nnn() },
            (0x2, ..) => Call { addr: op.nnn() },
            (0x3, ..) => SkipIfEqual { x, nn: op.nn() },
            (0x4, ..) => SkipIfNotEqual { x, nn: op.nn() },
            (0x5, ..) => SkipIfRegistersEqual { x, y },
            (0x6, ..) => Load { x, nn: op.nn() },
            (0x7, ..) => Add { x, nn: op.nn() },
            (0x8, .., 0x0) => Move { x, y },
            (0x8, .., 0x1) => Or { x, y },
            (0x8, .., 0x2) => And { x, y },
            (0x8, .., 0x3) => Xor { x, y },
            (0x8, .., 0x4) => AddRegisters { x, y },
            (0x8, .., 0x5) => Sub { x, y },
            (0x8, .., 0x6) => ShiftRight { x },
            (0x8, .., 0x7) => SubReversed { x, y },
            (0x8, .., 0xE) => ShiftLeft { x },
            (0x9, .., 0x0) => SkipIfRegistersNotEqual { x, y },
            (0xA, ..) => LoadIndex { addr: op.nnn() },
            (0xB, ..) => JumpOffset { addr: op.nnn() },
            (0xC, ..) => Random { x, nn: op.nn() },
            (0xD, ..) => Draw { x, y, n: op.n() },
            (0xE, _, 0x9, 0xE) => SkipIfKeyPressed { x },
            (0xE, _, 0xA, 0x1) => SkipIfKeyNotPressed { x },
            (0xF, _, 0x0, 0x7) => ReadDelay { x },
            (0xF, _, 0x0, 0xA) => WaitForKey { x },
            (0xF, _, 0x1, 0x5) => SetDelay { x },
            (0xF, _, 0x1, 0x8) => SetSound { x },
            (0xF, _, 0x1, 0xE) => AddIndex { x },
            (0xF, _, 0x2, 0x9) => LoadGlyph { x },
            (0xF, _, 0x3, 0x3) => StoreBcd { x },
            (0xF, _, 0x5, 0x5) => StoreRegisters { x },
            (0xF, _, 0x6, 0x5) => LoadRegisters { x },
            _ => Unknown(op),
        }
    }
}
