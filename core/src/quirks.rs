/// # Quirks
/// CHIP-8 interpreters historically disagree on a handful of behaviours.
/// Each field picks one side; `Quirks::default()` is this interpreter's native behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Quirks {
    /// Sprites that run off the right or bottom edge wrap around to the opposite edge
    /// instead of being clipped, and starting coordinates wrap modulo the screen size.
    pub sprite_wrap: bool,

    /// `EX9E`/`EXA1` test the key held in `Vx` instead of the key numbered `x`.
    pub key_from_register: bool,
}
