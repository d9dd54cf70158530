use crate::constants::KEY_COUNT;

/// # Keypad
/// Chip-8 input is generated with a hexadecimal keypad of 16 keys, `0x0..=0xF`.
///
/// The interpreter only ever asks about logical keys; whoever implements this trait owns the
/// mapping from physical input to those keys.
pub trait Keypad {
    /// Whether logical `key` is currently held down
    fn is_pressed(&self, key: u8) -> bool;

    /// The first key held down, scanning the pad row by row, if any
    fn first_pressed(&self) -> Option<u8> {
        SCAN_ORDER.iter().copied().find(|&key| self.is_pressed(key))
    }
}

/// The pad's keys left to right, top to bottom
/// ```text
/// |1|2|3|C|
/// |4|5|6|D|
/// |7|8|9|E|
/// |A|0|B|F|
/// ```
const SCAN_ORDER: [u8; KEY_COUNT] = [
    0x1, 0x2, 0x3, 0xC, 0x4, 0x5, 0x6, 0xD, 0x7, 0x8, 0x9, 0xE, 0xA, 0x0, 0xB, 0xF,
];

/// An in-memory keypad that remembers which keys are pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keyboard {
    pressed: [bool; KEY_COUNT],
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of `key`; keys outside `0x0..=0xF` are ignored
    pub fn press(&mut self, key: u8) {
        if let Some(slot) = self.pressed.get_mut(key as usize) {
            *slot = true;
        }
    }

    /// Unset the pressed status of `key`
    pub fn release(&mut self, key: u8) {
        if let Some(slot) = self.pressed.get_mut(key as usize) {
            *slot = false;
        }
    }

    pub fn clear(&mut self) {
        self.pressed = [false; KEY_COUNT];
    }
}

impl Keypad for Keyboard {
    fn is_pressed(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut keys = Keyboard::new();
        keys.press(0xA);
        assert!(keys.is_pressed(0xA));
        keys.release(0xA);
        assert!(!keys.is_pressed(0xA));
    }

    #[test]
    fn test_out_of_range_keys_are_ignored() {
        let mut keys = Keyboard::new();
        keys.press(0x10);
        assert_eq!(keys, Keyboard::new());
        assert!(!keys.is_pressed(0x10));
    }

    #[test]
    fn test_first_pressed_scans_rows() {
        let mut keys = Keyboard::new();
        assert_eq!(keys.first_pressed(), None);
        keys.press(0x0);
        assert_eq!(keys.first_pressed(), Some(0x0));
        keys.press(0xE);
        assert_eq!(keys.first_pressed(), Some(0xE));
        keys.press(0xC);
        keys.press(0x4);
        assert_eq!(keys.first_pressed(), Some(0xC));
    }

    #[test]
    fn test_scan_order_covers_every_key() {
        let mut order = SCAN_ORDER;
        order.sort_unstable();
        assert_eq!(order, [0x0, 0x1, 0x2, 0x3, 0x4, 0x5, 0x6, 0x7, 0x8, 0x9, 0xA, 0xB, 0xC, 0xD, 0xE, 0xF]);
    }

    #[test]
    fn test_clear() {
        let mut keys = Keyboard::new();
        keys.press(0x1);
        keys.press(0xF);
        keys.clear();
        assert_eq!(keys.first_pressed(), None);
    }
}
