//! Keyboard usage codes, the numbers a USB keyboard actually sends.
//!
//! A boot keyboard report carries keys as one-byte usage IDs from the
//! Keyboard/Keypad usage page (0x07). [`HidKeyCode`] names each usage netkey
//! can press. Layouts turn characters into these codes, the key-name resolver
//! turns request names like `ESCAPE` into them, and [`crate::device`] packs
//! them into reports.
//!
//! Values come from the USB HID Usage Tables, Keyboard/Keypad page.
//!
//! # A code is a key cap position (for beginners)
//!
//! The host decides which character a key produces. The device only says
//! "the fourth key of the top letter row went down". Variants are named after
//! the legend that position carries on a US keyboard, so on a French machine
//! pressing [`HidKeyCode::KeyQ`] prints `a`, and the `fr-FR` table in
//! [`crate::layout`] maps `'a'` to `KeyQ`.
//!
//! Two positions exist only on ISO boards: [`HidKeyCode::NonUsHash`] next to
//! Enter and [`HidKeyCode::NonUsBackslash`] next to left Shift. The European
//! layouts need both.

use serde::{Deserialize, Serialize};

/// One key on the Keyboard/Keypad usage page.
///
/// The discriminant is the usage ID written into a report.
/// [`HidKeyCode::Unknown`] stands in for any ID netkey has no name for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum HidKeyCode {
    // Letters
    KeyA = 0x04,
    KeyB = 0x05,
    KeyC = 0x06,
    KeyD = 0x07,
    KeyE = 0x08,
    KeyF = 0x09,
    KeyG = 0x0A,
    KeyH = 0x0B,
    KeyI = 0x0C,
    KeyJ = 0x0D,
    KeyK = 0x0E,
    KeyL = 0x0F,
    KeyM = 0x10,
    KeyN = 0x11,
    KeyO = 0x12,
    KeyP = 0x13,
    KeyQ = 0x14,
    KeyR = 0x15,
    KeyS = 0x16,
    KeyT = 0x17,
    KeyU = 0x18,
    KeyV = 0x19,
    KeyW = 0x1A,
    KeyX = 0x1B,
    KeyY = 0x1C,
    KeyZ = 0x1D,

    // Top row digits, 1 first and 0 last
    Digit1 = 0x1E,
    Digit2 = 0x1F,
    Digit3 = 0x20,
    Digit4 = 0x21,
    Digit5 = 0x22,
    Digit6 = 0x23,
    Digit7 = 0x24,
    Digit8 = 0x25,
    Digit9 = 0x26,
    Digit0 = 0x27,

    // Editing keys and punctuation
    Enter = 0x28,
    Escape = 0x29,
    Backspace = 0x2A,
    Tab = 0x2B,
    Space = 0x2C,
    Minus = 0x2D,
    Equal = 0x2E,
    BracketLeft = 0x2F,
    BracketRight = 0x30,
    Backslash = 0x31,
    NonUsHash = 0x32,
    Semicolon = 0x33,
    Quote = 0x34,
    Backquote = 0x35,
    Comma = 0x36,
    Period = 0x37,
    Slash = 0x38,
    CapsLock = 0x39,

    F1 = 0x3A,
    F2 = 0x3B,
    F3 = 0x3C,
    F4 = 0x3D,
    F5 = 0x3E,
    F6 = 0x3F,
    F7 = 0x40,
    F8 = 0x41,
    F9 = 0x42,
    F10 = 0x43,
    F11 = 0x44,
    F12 = 0x45,

    // Block above and beside the arrows
    PrintScreen = 0x46,
    ScrollLock = 0x47,
    Pause = 0x48,
    Insert = 0x49,
    Home = 0x4A,
    PageUp = 0x4B,
    Delete = 0x4C,
    End = 0x4D,
    PageDown = 0x4E,
    ArrowRight = 0x4F,
    ArrowLeft = 0x50,
    ArrowDown = 0x51,
    ArrowUp = 0x52,

    // Keypad
    NumLock = 0x53,
    NumpadDivide = 0x54,
    NumpadMultiply = 0x55,
    NumpadSubtract = 0x56,
    NumpadAdd = 0x57,
    NumpadEnter = 0x58,
    Numpad1 = 0x59,
    Numpad2 = 0x5A,
    Numpad3 = 0x5B,
    Numpad4 = 0x5C,
    Numpad5 = 0x5D,
    Numpad6 = 0x5E,
    Numpad7 = 0x5F,
    Numpad8 = 0x60,
    Numpad9 = 0x61,
    Numpad0 = 0x62,
    NumpadDecimal = 0x63,

    NonUsBackslash = 0x64,
    ContextMenu = 0x65,
    Power = 0x66,
    NumpadEqual = 0x67,

    F13 = 0x68,
    F14 = 0x69,
    F15 = 0x6A,
    F16 = 0x6B,
    F17 = 0x6C,
    F18 = 0x6D,
    F19 = 0x6E,
    F20 = 0x6F,
    F21 = 0x70,
    F22 = 0x71,
    F23 = 0x72,
    F24 = 0x73,

    // Modifiers. These travel as bits in byte 0, never in a key slot.
    ControlLeft = 0xE0,
    ShiftLeft = 0xE1,
    AltLeft = 0xE2,
    MetaLeft = 0xE3,
    ControlRight = 0xE4,
    ShiftRight = 0xE5,
    AltRight = 0xE6,
    MetaRight = 0xE7,

    Unknown = 0x0000,
}

/// First usage ID of [`ORDINARY_KEYS`].
const FIRST_ORDINARY: u16 = 0x04;

/// First usage ID of [`MODIFIER_KEYS`].
const FIRST_MODIFIER: u16 = 0xE0;

/// Every non-modifier key, indexed by `usage - FIRST_ORDINARY`.
///
/// The named ordinary usages form one unbroken run from 0x04 to 0x73.
#[rustfmt::skip]
const ORDINARY_KEYS: [HidKeyCode; 112] = {
    use HidKeyCode::*;
    [
        KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI, KeyJ, KeyK, KeyL, KeyM,
        KeyN, KeyO, KeyP, KeyQ, KeyR, KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,
        Digit1, Digit2, Digit3, Digit4, Digit5, Digit6, Digit7, Digit8, Digit9, Digit0,
        Enter, Escape, Backspace, Tab, Space, Minus, Equal, BracketLeft, BracketRight,
        Backslash, NonUsHash, Semicolon, Quote, Backquote, Comma, Period, Slash, CapsLock,
        F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
        PrintScreen, ScrollLock, Pause, Insert, Home, PageUp, Delete, End, PageDown,
        ArrowRight, ArrowLeft, ArrowDown, ArrowUp,
        NumLock, NumpadDivide, NumpadMultiply, NumpadSubtract, NumpadAdd, NumpadEnter,
        Numpad1, Numpad2, Numpad3, Numpad4, Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
        Numpad0, NumpadDecimal,
        NonUsBackslash, ContextMenu, Power, NumpadEqual,
        F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24,
    ]
};

/// The eight modifiers, indexed by `usage - FIRST_MODIFIER` (which is also
/// their bit position in byte 0 of a report).
#[rustfmt::skip]
const MODIFIER_KEYS: [HidKeyCode; 8] = {
    use HidKeyCode::*;
    [ControlLeft, ShiftLeft, AltLeft, MetaLeft, ControlRight, ShiftRight, AltRight, MetaRight]
};

impl HidKeyCode {
    /// Looks up the key for a raw usage ID.
    ///
    /// IDs netkey has no variant for (including 0x00, the "empty slot" value
    /// in a report) give [`HidKeyCode::Unknown`]. Report decoding and the
    /// layout tables' letter and digit arithmetic both go through here.
    pub fn from_u16(value: u16) -> Self {
        let lookup = |table: &[HidKeyCode], first: u16| {
            value
                .checked_sub(first)
                .and_then(|index| table.get(usize::from(index)))
                .copied()
        };
        lookup(&ORDINARY_KEYS, FIRST_ORDINARY)
            .or_else(|| lookup(&MODIFIER_KEYS, FIRST_MODIFIER))
            .unwrap_or(HidKeyCode::Unknown)
    }

    /// The usage ID written into a report slot.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn is_modifier(self) -> bool {
        self.modifier_bit().is_some()
    }

    /// The mask this key sets in byte 0 of a keyboard report, or `None` for
    /// keys that go into the six slots instead.
    pub fn modifier_bit(self) -> Option<u8> {
        MODIFIER_KEYS
            .iter()
            .position(|&modifier| modifier == self)
            .map(|bit| 1 << bit)
    }
}
