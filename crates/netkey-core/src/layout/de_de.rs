//! German (ISO QWERTZ).
//!
//! `y` and `z` trade places, umlauts have their own keys, and three dead
//! keys cover circumflex, acute and grave.

use super::{
    altgr, cased, dead_alone, digit_key, plain, qwerty_letter, shift, Accent, CharMapping,
    KeyStroke,
};
use crate::keymap::hid::HidKeyCode::*;

const CIRCUMFLEX: KeyStroke = KeyStroke::plain(Backquote);
const ACUTE: KeyStroke = KeyStroke::plain(Equal);
const GRAVE: KeyStroke = KeyStroke::shift(Equal);

pub(super) fn map(ch: char) -> Option<CharMapping> {
    if let Some(key) = digit_key(ch) {
        return plain(key);
    }
    match ch {
        'y' | 'Y' => cased(ch, KeyZ),
        'z' | 'Z' => cased(ch, KeyY),
        'a'..='z' | 'A'..='Z' => qwerty_letter(ch),
        ' ' => plain(Space),
        '^' => dead_alone(CIRCUMFLEX),
        '°' => shift(Backquote),
        '!' => shift(Digit1),
        '"' => shift(Digit2),
        '²' => altgr(Digit2),
        '§' => shift(Digit3),
        '³' => altgr(Digit3),
        '$' => shift(Digit4),
        '%' => shift(Digit5),
        '&' => shift(Digit6),
        '/' => shift(Digit7),
        '{' => altgr(Digit7),
        '(' => shift(Digit8),
        '[' => altgr(Digit8),
        ')' => shift(Digit9),
        ']' => altgr(Digit9),
        '=' => shift(Digit0),
        '}' => altgr(Digit0),
        'ß' => plain(Minus),
        '?' => shift(Minus),
        '\\' => altgr(Minus),
        '´' => dead_alone(ACUTE),
        '`' => dead_alone(GRAVE),
        'ü' | 'Ü' => cased(ch, BracketLeft),
        '+' => plain(BracketRight),
        '*' => shift(BracketRight),
        '~' => altgr(BracketRight),
        'ö' | 'Ö' => cased(ch, Semicolon),
        'ä' | 'Ä' => cased(ch, Quote),
        '#' => plain(NonUsHash),
        '\'' => shift(NonUsHash),
        '<' => plain(NonUsBackslash),
        '>' => shift(NonUsBackslash),
        '|' => altgr(NonUsBackslash),
        ',' => plain(Comma),
        ';' => shift(Comma),
        '.' => plain(Period),
        ':' => shift(Period),
        '-' => plain(Slash),
        '_' => shift(Slash),
        '@' => altgr(KeyQ),
        '€' => altgr(KeyE),
        'µ' => altgr(KeyM),
        _ => None,
    }
}

pub(super) fn dead_key(accent: Accent) -> Option<KeyStroke> {
    match accent {
        Accent::Circumflex => Some(CIRCUMFLEX),
        Accent::Acute => Some(ACUTE),
        Accent::Grave => Some(GRAVE),
        _ => None,
    }
}
