//! UK English (ISO QWERTY).
//!
//! Differs from US English around the number row and the two extra ISO keys.
//! AltGr produces `€`, `¦` and acute vowels; there are no dead keys.

use super::{altgr, digit_key, plain, qwerty_letter, shift, shift_altgr, CharMapping};
use crate::keymap::hid::HidKeyCode::*;

pub(super) fn map(ch: char) -> Option<CharMapping> {
    if let Some(key) = digit_key(ch) {
        return plain(key);
    }
    match ch {
        'a'..='z' | 'A'..='Z' => qwerty_letter(ch),
        ' ' => plain(Space),
        '!' => shift(Digit1),
        '"' => shift(Digit2),
        '£' => shift(Digit3),
        '$' => shift(Digit4),
        '€' => altgr(Digit4),
        '%' => shift(Digit5),
        '^' => shift(Digit6),
        '&' => shift(Digit7),
        '*' => shift(Digit8),
        '(' => shift(Digit9),
        ')' => shift(Digit0),
        '-' => plain(Minus),
        '_' => shift(Minus),
        '=' => plain(Equal),
        '+' => shift(Equal),
        '[' => plain(BracketLeft),
        '{' => shift(BracketLeft),
        ']' => plain(BracketRight),
        '}' => shift(BracketRight),
        ';' => plain(Semicolon),
        ':' => shift(Semicolon),
        '\'' => plain(Quote),
        '@' => shift(Quote),
        '#' => plain(NonUsHash),
        '~' => shift(NonUsHash),
        '\\' => plain(NonUsBackslash),
        '|' => shift(NonUsBackslash),
        '`' => plain(Backquote),
        '¬' => shift(Backquote),
        '¦' => altgr(Backquote),
        ',' => plain(Comma),
        '<' => shift(Comma),
        '.' => plain(Period),
        '>' => shift(Period),
        '/' => plain(Slash),
        '?' => shift(Slash),
        'á' => altgr(KeyA),
        'é' => altgr(KeyE),
        'í' => altgr(KeyI),
        'ó' => altgr(KeyO),
        'ú' => altgr(KeyU),
        'Á' => shift_altgr(KeyA),
        'É' => shift_altgr(KeyE),
        'Í' => shift_altgr(KeyI),
        'Ó' => shift_altgr(KeyO),
        'Ú' => shift_altgr(KeyU),
        _ => None,
    }
}
