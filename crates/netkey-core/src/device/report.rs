//! Boot-protocol HID report encoding.
//!
//! # Keyboard report layout
//!
//! ```text
//! byte 0    modifier bitmask (bit 0 = Left Ctrl … bit 7 = Right GUI)
//! byte 1    reserved, always 0
//! byte 2-7  up to six pressed (non-modifier) key codes, 0 = empty slot
//! ```
//!
//! Modifiers never occupy a key slot, so a report can hold all eight
//! modifiers plus six ordinary keys. A seventh ordinary key cannot be
//! represented and is rejected with [`ReportError::TooManyKeys`].
//!
//! # Mouse report layout
//!
//! ```text
//! byte 0  button bitmask (bit 0 = left, bit 1 = right, bit 2 = middle)
//! byte 1  relative X movement
//! byte 2  relative Y movement
//! byte 3  wheel
//! ```

use thiserror::Error;

use crate::keymap::hid::HidKeyCode;

/// Number of non-modifier key slots in a boot keyboard report.
pub const MAX_PRESSED_KEYS: usize = 6;

/// Size in bytes of an encoded [`KeyboardReport`].
pub const KEYBOARD_REPORT_LEN: usize = 8;

/// Size in bytes of an encoded [`MouseReport`].
pub const MOUSE_REPORT_LEN: usize = 4;

/// Errors raised while building a report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Trying to press more than {MAX_PRESSED_KEYS} keys at once: {0:?}")]
    TooManyKeys(HidKeyCode),
}

/// In-memory state of the keyboard report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardReport {
    modifiers: u8,
    keys: [u8; MAX_PRESSED_KEYS],
}

impl KeyboardReport {
    /// Creates an empty report (nothing pressed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an 8-byte report. Byte 1 is ignored.
    pub fn from_bytes(bytes: [u8; KEYBOARD_REPORT_LEN]) -> Self {
        let mut keys = [0u8; MAX_PRESSED_KEYS];
        keys.copy_from_slice(&bytes[2..]);
        Self {
            modifiers: bytes[0],
            keys,
        }
    }

    /// Marks `key` as pressed.
    ///
    /// Modifiers set their bit; other keys take the first free slot. Pressing
    /// a key that is already held and pressing [`HidKeyCode::Unknown`] are
    /// both no-ops.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::TooManyKeys`] if all six slots are taken. The
    /// report is left unchanged in that case.
    pub fn press(&mut self, key: HidKeyCode) -> Result<(), ReportError> {
        if let Some(bit) = key.modifier_bit() {
            self.modifiers |= bit;
            return Ok(());
        }
        if key == HidKeyCode::Unknown {
            return Ok(());
        }
        let code = key.as_u16() as u8;
        if self.keys.contains(&code) {
            return Ok(());
        }
        match self.keys.iter_mut().find(|slot| **slot == 0) {
            Some(slot) => {
                *slot = code;
                Ok(())
            }
            None => Err(ReportError::TooManyKeys(key)),
        }
    }

    /// Releases everything.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Returns `true` when no key and no modifier is held.
    pub fn is_empty(&self) -> bool {
        self.modifiers == 0 && self.keys.iter().all(|&k| k == 0)
    }

    /// Returns the modifier bitmask (byte 0).
    pub fn modifiers(&self) -> u8 {
        self.modifiers
    }

    /// Lists held keys: modifiers first (in bit order), then slot keys.
    pub fn pressed(&self) -> Vec<HidKeyCode> {
        let modifiers = (0..8u16)
            .filter(|bit| self.modifiers & (1 << bit) != 0)
            .map(|bit| HidKeyCode::from_u16(0xE0 + bit));
        let keys = self
            .keys
            .iter()
            .filter(|&&k| k != 0)
            .map(|&k| HidKeyCode::from_u16(u16::from(k)));
        modifiers.chain(keys).collect()
    }

    /// Encodes the report as it is sent on the wire.
    pub fn as_bytes(&self) -> [u8; KEYBOARD_REPORT_LEN] {
        let mut out = [0u8; KEYBOARD_REPORT_LEN];
        out[0] = self.modifiers;
        out[2..].copy_from_slice(&self.keys);
        out
    }
}

/// In-memory state of the mouse report.
///
/// Nothing in netkey moves or clicks the mouse. The report exists so that
/// releasing everything also sends an all-zero mouse report, clearing any
/// button a previous process left held on the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseReport {
    buttons: u8,
}

impl MouseReport {
    /// Creates a report with no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.buttons = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.buttons == 0
    }

    pub fn as_bytes(&self) -> [u8; MOUSE_REPORT_LEN] {
        [self.buttons, 0, 0, 0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_empty_and_all_zero() {
        let report = KeyboardReport::new();
        assert!(report.is_empty());
        assert_eq!(report.as_bytes(), [0u8; 8]);
    }

    #[test]
    fn test_modifiers_set_bits_and_do_not_use_slots() {
        // Arrange
        let mut report = KeyboardReport::new();

        // Act
        report.press(HidKeyCode::ControlLeft).unwrap();
        report.press(HidKeyCode::ShiftLeft).unwrap();
        report.press(HidKeyCode::Escape).unwrap();

        // Assert
        assert_eq!(report.as_bytes(), [0x03, 0, 0x29, 0, 0, 0, 0, 0]);
        assert_eq!(
            report.pressed(),
            vec![HidKeyCode::ControlLeft, HidKeyCode::ShiftLeft, HidKeyCode::Escape]
        );
    }

    #[test]
    fn test_six_keys_fit_and_seventh_is_rejected_without_change() {
        // Arrange
        let mut report = KeyboardReport::new();
        let six = [
            HidKeyCode::KeyA,
            HidKeyCode::KeyB,
            HidKeyCode::KeyC,
            HidKeyCode::KeyD,
            HidKeyCode::KeyE,
            HidKeyCode::KeyF,
        ];
        for key in six {
            report.press(key).unwrap();
        }
        let before = report;

        // Act
        let result = report.press(HidKeyCode::KeyG);

        // Assert
        assert_eq!(result, Err(ReportError::TooManyKeys(HidKeyCode::KeyG)));
        assert_eq!(report, before);
    }

    #[test]
    fn test_modifiers_still_fit_when_all_slots_are_full() {
        let mut report = KeyboardReport::new();
        for key in [
            HidKeyCode::KeyA,
            HidKeyCode::KeyB,
            HidKeyCode::KeyC,
            HidKeyCode::KeyD,
            HidKeyCode::KeyE,
            HidKeyCode::KeyF,
        ] {
            report.press(key).unwrap();
        }
        assert!(report.press(HidKeyCode::MetaRight).is_ok());
        assert_eq!(report.modifiers(), 0x80);
    }

    #[test]
    fn test_pressing_a_held_key_twice_uses_one_slot() {
        let mut report = KeyboardReport::new();
        report.press(HidKeyCode::KeyA).unwrap();
        report.press(HidKeyCode::KeyA).unwrap();
        assert_eq!(report.pressed(), vec![HidKeyCode::KeyA]);
    }

    #[test]
    fn test_clear_frees_slots_and_modifier_bits() {
        let mut report = KeyboardReport::new();
        report.press(HidKeyCode::AltRight).unwrap();
        report.press(HidKeyCode::KeyQ).unwrap();

        report.clear();

        assert!(report.is_empty());
        assert_eq!(report.as_bytes(), [0u8; 8]);
    }

    #[test]
    fn test_from_bytes_decodes_what_as_bytes_encodes() {
        let mut report = KeyboardReport::new();
        report.press(HidKeyCode::ShiftRight).unwrap();
        report.press(HidKeyCode::Numpad7).unwrap();

        let decoded = KeyboardReport::from_bytes(report.as_bytes());

        assert_eq!(decoded.pressed(), vec![HidKeyCode::ShiftRight, HidKeyCode::Numpad7]);
    }

    #[test]
    fn test_mouse_report_is_all_zero() {
        let mut report = MouseReport::new();
        report.clear();
        assert!(report.is_empty());
        assert_eq!(report.as_bytes(), [0u8; 4]);
    }
}
