/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, fetched big-endian. Their behavior is cased on some combination of:
/// - `(n, n, n, n)` the whole word, for fixed functions that take no operands (`00E0`, `00EE`)
/// - `(n, _, _, _)` broad categorization; applies to all opcodes
/// - `(n, _, _, n)` specific behavior within a category (the `8XYN` arithmetic group)
/// - `(n, _, n, n)` specific behavior keyed on the low byte (the `EX__` and `FX__` groups)
///
/// Nibbles not used to determine the operation carry the operands.
/// - `(_, n, n, n)` a 12-bit address
/// - `(_, _, n, n)` an 8-bit immediate assigned to and/or compared with Vx
/// - `(_, n, _, _)` the register Vx, a range of registers V0..=Vx, or a key
/// - `(_, _, n, _)` the register Vy
/// - `(_, _, _, n)` a 4-bit immediate (sprite height)
pub trait Opcode {
    /// Returns the Opcode's component nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[x___]`
    fn family(&self) -> u8;

    /// `[_x__]`
    fn x(&self) -> usize;

    /// `[__y_]`
    fn y(&self) -> usize;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__nn]`
    fn nn(&self) -> u8;

    /// `[_nnn]`
    fn nnn(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        (self.family(), self.x() as u8, self.y() as u8, self.n())
    }

    fn family(&self) -> u8 {
        (self >> 12) as u8
    }

    fn x(&self) -> usize {
        ((self & 0x0F00) >> 8) as usize
    }

    fn y(&self) -> usize {
        ((self & 0x00F0) >> 4) as usize
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn nn(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn nnn(&self) -> u16 {
        self & 0x0FFF
    }
}
