//! Symbolic key names accepted by the `type_keycodes` endpoint.
//!
//! Clients name keys the way the HID keyboard enumeration does (`"CONTROL"`,
//! `"KEYPAD_SEVEN"`, `"F5"`). Lookup is case-insensitive: names are
//! uppercased before they reach the table. Several names are aliases for the
//! same physical key (`CONTROL` and `LEFT_CONTROL`, `ENTER` and `RETURN`).
//!
//! Raw numeric codes are deliberately not accepted; only names in
//! [`KEY_NAMES`] resolve.

use std::collections::HashMap;
use std::sync::OnceLock;

use thiserror::Error;

use super::hid::HidKeyCode;

/// A key name that is not part of the keycode enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown key name: {0}")]
pub struct UnknownKeyName(pub String);

/// Every accepted (uppercase) key name and the key it presses.
pub const KEY_NAMES: &[(&str, HidKeyCode)] = &[
    ("A", HidKeyCode::KeyA),
    ("B", HidKeyCode::KeyB),
    ("C", HidKeyCode::KeyC),
    ("D", HidKeyCode::KeyD),
    ("E", HidKeyCode::KeyE),
    ("F", HidKeyCode::KeyF),
    ("G", HidKeyCode::KeyG),
    ("H", HidKeyCode::KeyH),
    ("I", HidKeyCode::KeyI),
    ("J", HidKeyCode::KeyJ),
    ("K", HidKeyCode::KeyK),
    ("L", HidKeyCode::KeyL),
    ("M", HidKeyCode::KeyM),
    ("N", HidKeyCode::KeyN),
    ("O", HidKeyCode::KeyO),
    ("P", HidKeyCode::KeyP),
    ("Q", HidKeyCode::KeyQ),
    ("R", HidKeyCode::KeyR),
    ("S", HidKeyCode::KeyS),
    ("T", HidKeyCode::KeyT),
    ("U", HidKeyCode::KeyU),
    ("V", HidKeyCode::KeyV),
    ("W", HidKeyCode::KeyW),
    ("X", HidKeyCode::KeyX),
    ("Y", HidKeyCode::KeyY),
    ("Z", HidKeyCode::KeyZ),
    ("ONE", HidKeyCode::Digit1),
    ("TWO", HidKeyCode::Digit2),
    ("THREE", HidKeyCode::Digit3),
    ("FOUR", HidKeyCode::Digit4),
    ("FIVE", HidKeyCode::Digit5),
    ("SIX", HidKeyCode::Digit6),
    ("SEVEN", HidKeyCode::Digit7),
    ("EIGHT", HidKeyCode::Digit8),
    ("NINE", HidKeyCode::Digit9),
    ("ZERO", HidKeyCode::Digit0),
    ("ENTER", HidKeyCode::Enter),
    ("RETURN", HidKeyCode::Enter),
    ("ESCAPE", HidKeyCode::Escape),
    ("BACKSPACE", HidKeyCode::Backspace),
    ("TAB", HidKeyCode::Tab),
    ("SPACEBAR", HidKeyCode::Space),
    ("SPACE", HidKeyCode::Space),
    ("MINUS", HidKeyCode::Minus),
    ("EQUALS", HidKeyCode::Equal),
    ("LEFT_BRACKET", HidKeyCode::BracketLeft),
    ("RIGHT_BRACKET", HidKeyCode::BracketRight),
    ("BACKSLASH", HidKeyCode::Backslash),
    ("POUND", HidKeyCode::NonUsHash),
    ("SEMICOLON", HidKeyCode::Semicolon),
    ("QUOTE", HidKeyCode::Quote),
    ("GRAVE_ACCENT", HidKeyCode::Backquote),
    ("COMMA", HidKeyCode::Comma),
    ("PERIOD", HidKeyCode::Period),
    ("FORWARD_SLASH", HidKeyCode::Slash),
    ("CAPS_LOCK", HidKeyCode::CapsLock),
    ("F1", HidKeyCode::F1),
    ("F2", HidKeyCode::F2),
    ("F3", HidKeyCode::F3),
    ("F4", HidKeyCode::F4),
    ("F5", HidKeyCode::F5),
    ("F6", HidKeyCode::F6),
    ("F7", HidKeyCode::F7),
    ("F8", HidKeyCode::F8),
    ("F9", HidKeyCode::F9),
    ("F10", HidKeyCode::F10),
    ("F11", HidKeyCode::F11),
    ("F12", HidKeyCode::F12),
    ("PRINT_SCREEN", HidKeyCode::PrintScreen),
    ("SCROLL_LOCK", HidKeyCode::ScrollLock),
    ("PAUSE", HidKeyCode::Pause),
    ("INSERT", HidKeyCode::Insert),
    ("HOME", HidKeyCode::Home),
    ("PAGE_UP", HidKeyCode::PageUp),
    ("DELETE", HidKeyCode::Delete),
    ("END", HidKeyCode::End),
    ("PAGE_DOWN", HidKeyCode::PageDown),
    ("RIGHT_ARROW", HidKeyCode::ArrowRight),
    ("LEFT_ARROW", HidKeyCode::ArrowLeft),
    ("DOWN_ARROW", HidKeyCode::ArrowDown),
    ("UP_ARROW", HidKeyCode::ArrowUp),
    ("KEYPAD_NUMLOCK", HidKeyCode::NumLock),
    ("KEYPAD_FORWARD_SLASH", HidKeyCode::NumpadDivide),
    ("KEYPAD_ASTERISK", HidKeyCode::NumpadMultiply),
    ("KEYPAD_MINUS", HidKeyCode::NumpadSubtract),
    ("KEYPAD_PLUS", HidKeyCode::NumpadAdd),
    ("KEYPAD_ENTER", HidKeyCode::NumpadEnter),
    ("KEYPAD_ONE", HidKeyCode::Numpad1),
    ("KEYPAD_TWO", HidKeyCode::Numpad2),
    ("KEYPAD_THREE", HidKeyCode::Numpad3),
    ("KEYPAD_FOUR", HidKeyCode::Numpad4),
    ("KEYPAD_FIVE", HidKeyCode::Numpad5),
    ("KEYPAD_SIX", HidKeyCode::Numpad6),
    ("KEYPAD_SEVEN", HidKeyCode::Numpad7),
    ("KEYPAD_EIGHT", HidKeyCode::Numpad8),
    ("KEYPAD_NINE", HidKeyCode::Numpad9),
    ("KEYPAD_ZERO", HidKeyCode::Numpad0),
    ("KEYPAD_PERIOD", HidKeyCode::NumpadDecimal),
    ("KEYPAD_BACKSLASH", HidKeyCode::NonUsBackslash),
    ("APPLICATION", HidKeyCode::ContextMenu),
    ("POWER", HidKeyCode::Power),
    ("KEYPAD_EQUALS", HidKeyCode::NumpadEqual),
    ("F13", HidKeyCode::F13),
    ("F14", HidKeyCode::F14),
    ("F15", HidKeyCode::F15),
    ("F16", HidKeyCode::F16),
    ("F17", HidKeyCode::F17),
    ("F18", HidKeyCode::F18),
    ("F19", HidKeyCode::F19),
    ("F20", HidKeyCode::F20),
    ("F21", HidKeyCode::F21),
    ("F22", HidKeyCode::F22),
    ("F23", HidKeyCode::F23),
    ("F24", HidKeyCode::F24),
    ("LEFT_CONTROL", HidKeyCode::ControlLeft),
    ("CONTROL", HidKeyCode::ControlLeft),
    ("LEFT_SHIFT", HidKeyCode::ShiftLeft),
    ("SHIFT", HidKeyCode::ShiftLeft),
    ("LEFT_ALT", HidKeyCode::AltLeft),
    ("ALT", HidKeyCode::AltLeft),
    ("OPTION", HidKeyCode::AltLeft),
    ("LEFT_GUI", HidKeyCode::MetaLeft),
    ("GUI", HidKeyCode::MetaLeft),
    ("WINDOWS", HidKeyCode::MetaLeft),
    ("COMMAND", HidKeyCode::MetaLeft),
    ("RIGHT_CONTROL", HidKeyCode::ControlRight),
    ("RIGHT_SHIFT", HidKeyCode::ShiftRight),
    ("RIGHT_ALT", HidKeyCode::AltRight),
    ("RIGHT_GUI", HidKeyCode::MetaRight),
];

fn name_table() -> &'static HashMap<&'static str, HidKeyCode> {
    static TABLE: OnceLock<HashMap<&'static str, HidKeyCode>> = OnceLock::new();
    TABLE.get_or_init(|| KEY_NAMES.iter().copied().collect())
}

/// Resolves a symbolic key name to its key code.
///
/// Matching is case-insensitive: `"escape"`, `"Escape"` and `"ESCAPE"` all
/// resolve to [`HidKeyCode::Escape`]. Surrounding whitespace is not trimmed.
///
/// # Errors
///
/// Returns [`UnknownKeyName`] carrying the name exactly as given when it is
/// not in [`KEY_NAMES`].
pub fn resolve_key_name(name: &str) -> Result<HidKeyCode, UnknownKeyName> {
    name_table()
        .get(name.to_uppercase().as_str())
        .copied()
        .ok_or_else(|| UnknownKeyName(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_is_case_insensitive() {
        // Arrange / Act
        let upper = resolve_key_name("ESCAPE").unwrap();
        let lower = resolve_key_name("escape").unwrap();
        let mixed = resolve_key_name("EsCaPe").unwrap();

        // Assert
        assert_eq!(upper, HidKeyCode::Escape);
        assert_eq!(lower, upper);
        assert_eq!(mixed, upper);
    }

    #[test]
    fn test_resolve_keypad_and_modifier_names() {
        assert_eq!(resolve_key_name("KEYPAD_SEVEN").unwrap(), HidKeyCode::Numpad7);
        assert_eq!(resolve_key_name("CONTROL").unwrap(), HidKeyCode::ControlLeft);
        assert_eq!(resolve_key_name("shift").unwrap(), HidKeyCode::ShiftLeft);
        assert_eq!(resolve_key_name("F5").unwrap(), HidKeyCode::F5);
        assert_eq!(resolve_key_name("c").unwrap(), HidKeyCode::KeyC);
    }

    #[test]
    fn test_aliases_resolve_to_the_same_key() {
        assert_eq!(
            resolve_key_name("CONTROL").unwrap(),
            resolve_key_name("LEFT_CONTROL").unwrap()
        );
        assert_eq!(
            resolve_key_name("RETURN").unwrap(),
            resolve_key_name("ENTER").unwrap()
        );
        assert_eq!(
            resolve_key_name("COMMAND").unwrap(),
            resolve_key_name("WINDOWS").unwrap()
        );
    }

    #[test]
    fn test_unknown_name_is_rejected_with_original_spelling() {
        // Arrange / Act
        let err = resolve_key_name("Hyper").unwrap_err();

        // Assert
        assert_eq!(err, UnknownKeyName("Hyper".to_string()));
        assert_eq!(err.to_string(), "Unknown key name: Hyper");
    }

    #[test]
    fn test_numeric_codes_are_not_accepted() {
        assert!(resolve_key_name("41").is_err());
        assert!(resolve_key_name("0x29").is_err());
        assert!(resolve_key_name("").is_err());
    }

    #[test]
    fn test_every_table_entry_is_uppercase_and_known() {
        for &(name, key) in KEY_NAMES {
            assert_eq!(name, name.to_uppercase(), "{name} must be stored uppercase");
            assert_ne!(key, HidKeyCode::Unknown, "{name} must map to a real key");
        }
    }
}
