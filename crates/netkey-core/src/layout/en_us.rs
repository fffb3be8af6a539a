//! US English (ANSI QWERTY). No AltGr level, no dead keys.

use super::{digit_key, plain, qwerty_letter, shift, CharMapping};
use crate::keymap::hid::HidKeyCode::*;

pub(super) fn map(ch: char) -> Option<CharMapping> {
    if let Some(key) = digit_key(ch) {
        return plain(key);
    }
    match ch {
        'a'..='z' | 'A'..='Z' => qwerty_letter(ch),
        ' ' => plain(Space),
        '!' => shift(Digit1),
        '@' => shift(Digit2),
        '#' => shift(Digit3),
        '$' => shift(Digit4),
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
        '\\' => plain(Backslash),
        '|' => shift(Backslash),
        ';' => plain(Semicolon),
        ':' => shift(Semicolon),
        '\'' => plain(Quote),
        '"' => shift(Quote),
        '`' => plain(Backquote),
        '~' => shift(Backquote),
        ',' => plain(Comma),
        '<' => shift(Comma),
        '.' => plain(Period),
        '>' => shift(Period),
        '/' => plain(Slash),
        '?' => shift(Slash),
        _ => None,
    }
}
