//! Canadian French (ISO QWERTY).

use super::{
    altgr, cased, dead_alone, digit_key, plain, qwerty_letter, shift, Accent, CharMapping,
    KeyStroke,
};
use crate::keymap::hid::HidKeyCode::*;

const CIRCUMFLEX: KeyStroke = KeyStroke::plain(BracketLeft);
const CEDILLA: KeyStroke = KeyStroke::plain(BracketRight);
const DIAERESIS: KeyStroke = KeyStroke::shift(BracketRight);
const GRAVE: KeyStroke = KeyStroke::plain(Quote);
const ACUTE: KeyStroke = KeyStroke::altgr(Slash);

pub(super) fn map(ch: char) -> Option<CharMapping> {
    if let Some(key) = digit_key(ch) {
        return plain(key);
    }
    match ch {
        'a'..='z' | 'A'..='Z' => qwerty_letter(ch),
        ' ' => plain(Space),
        '#' => plain(Backquote),
        '|' => shift(Backquote),
        '\\' => altgr(Backquote),
        '!' => shift(Digit1),
        '±' => altgr(Digit1),
        '"' => shift(Digit2),
        '@' => altgr(Digit2),
        '/' => shift(Digit3),
        '£' => altgr(Digit3),
        '$' => shift(Digit4),
        '¢' => altgr(Digit4),
        '%' => shift(Digit5),
        '¤' => altgr(Digit5),
        '?' => shift(Digit6),
        '¬' => altgr(Digit6),
        '&' => shift(Digit7),
        '¦' => altgr(Digit7),
        '*' => shift(Digit8),
        '²' => altgr(Digit8),
        '(' => shift(Digit9),
        '³' => altgr(Digit9),
        ')' => shift(Digit0),
        '¼' => altgr(Digit0),
        '-' => plain(Minus),
        '_' => shift(Minus),
        '½' => altgr(Minus),
        '=' => plain(Equal),
        '+' => shift(Equal),
        '¾' => altgr(Equal),
        '^' => dead_alone(CIRCUMFLEX),
        '[' => altgr(BracketLeft),
        '¸' => dead_alone(CEDILLA),
        '¨' => dead_alone(DIAERESIS),
        ']' => altgr(BracketRight),
        '<' => plain(Backslash),
        '>' => shift(Backslash),
        '}' => altgr(Backslash),
        ';' => plain(Semicolon),
        ':' => shift(Semicolon),
        '~' => altgr(Semicolon),
        '`' => dead_alone(GRAVE),
        '{' => altgr(Quote),
        '«' => plain(NonUsBackslash),
        '»' => shift(NonUsBackslash),
        '°' => altgr(NonUsBackslash),
        ',' => plain(Comma),
        '\'' => shift(Comma),
        '.' => plain(Period),
        'é' | 'É' => cased(ch, Slash),
        '´' => dead_alone(ACUTE),
        'µ' => altgr(KeyM),
        '§' => altgr(KeyO),
        '¶' => altgr(KeyP),
        _ => None,
    }
}

pub(super) fn dead_key(accent: Accent) -> Option<KeyStroke> {
    match accent {
        Accent::Circumflex => Some(CIRCUMFLEX),
        Accent::Cedilla => Some(CEDILLA),
        Accent::Diaeresis => Some(DIAERESIS),
        Accent::Grave => Some(GRAVE),
        Accent::Acute => Some(ACUTE),
        Accent::Tilde => None,
    }
}
