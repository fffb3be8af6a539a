//! Spanish (ISO QWERTY).
//!
//! `ñ` and `ç` have their own keys. Dead keys: grave and circumflex share the
//! key right of `p`, acute and diaeresis share the key right of `ñ`.

use super::{
    altgr, cased, dead_alone, digit_key, plain, qwerty_letter, shift, Accent, CharMapping,
    KeyStroke,
};
use crate::keymap::hid::HidKeyCode::*;

const GRAVE: KeyStroke = KeyStroke::plain(BracketLeft);
const CIRCUMFLEX: KeyStroke = KeyStroke::shift(BracketLeft);
const ACUTE: KeyStroke = KeyStroke::plain(Quote);
const DIAERESIS: KeyStroke = KeyStroke::shift(Quote);

pub(super) fn map(ch: char) -> Option<CharMapping> {
    if let Some(key) = digit_key(ch) {
        return plain(key);
    }
    match ch {
        'a'..='z' | 'A'..='Z' => qwerty_letter(ch),
        ' ' => plain(Space),
        'º' => plain(Backquote),
        'ª' => shift(Backquote),
        '\\' => altgr(Backquote),
        '!' => shift(Digit1),
        '|' => altgr(Digit1),
        '"' => shift(Digit2),
        '@' => altgr(Digit2),
        '·' => shift(Digit3),
        '#' => altgr(Digit3),
        '$' => shift(Digit4),
        '~' => altgr(Digit4),
        '%' => shift(Digit5),
        '€' => altgr(Digit5),
        '&' => shift(Digit6),
        '¬' => altgr(Digit6),
        '/' => shift(Digit7),
        '(' => shift(Digit8),
        ')' => shift(Digit9),
        '=' => shift(Digit0),
        '\'' => plain(Minus),
        '?' => shift(Minus),
        '¡' => plain(Equal),
        '¿' => shift(Equal),
        '`' => dead_alone(GRAVE),
        '^' => dead_alone(CIRCUMFLEX),
        '[' => altgr(BracketLeft),
        '+' => plain(BracketRight),
        '*' => shift(BracketRight),
        ']' => altgr(BracketRight),
        'ñ' | 'Ñ' => cased(ch, Semicolon),
        '´' => dead_alone(ACUTE),
        '¨' => dead_alone(DIAERESIS),
        '{' => altgr(Quote),
        'ç' | 'Ç' => cased(ch, NonUsHash),
        '}' => altgr(NonUsHash),
        '<' => plain(NonUsBackslash),
        '>' => shift(NonUsBackslash),
        ',' => plain(Comma),
        ';' => shift(Comma),
        '.' => plain(Period),
        ':' => shift(Period),
        '-' => plain(Slash),
        '_' => shift(Slash),
        _ => None,
    }
}

pub(super) fn dead_key(accent: Accent) -> Option<KeyStroke> {
    match accent {
        Accent::Grave => Some(GRAVE),
        Accent::Circumflex => Some(CIRCUMFLEX),
        Accent::Acute => Some(ACUTE),
        Accent::Diaeresis => Some(DIAERESIS),
        _ => None,
    }
}
