//! French (ISO AZERTY).
//!
//! Digits need Shift; the unshifted number row carries accented letters and
//! punctuation. `a`/`q` and `z`/`w` trade places and `m` sits right of `l`.

use super::{
    altgr, cased, dead_alone, digit_key, plain, qwerty_letter, shift, Accent, CharMapping,
    KeyStroke,
};
use crate::keymap::hid::HidKeyCode::*;

const CIRCUMFLEX: KeyStroke = KeyStroke::plain(BracketLeft);
const DIAERESIS: KeyStroke = KeyStroke::shift(BracketLeft);
const GRAVE: KeyStroke = KeyStroke::altgr(Digit7);
const TILDE: KeyStroke = KeyStroke::altgr(Digit2);

pub(super) fn map(ch: char) -> Option<CharMapping> {
    if let Some(key) = digit_key(ch) {
        return shift(key);
    }
    match ch {
        'a' | 'A' => cased(ch, KeyQ),
        'q' | 'Q' => cased(ch, KeyA),
        'z' | 'Z' => cased(ch, KeyW),
        'w' | 'W' => cased(ch, KeyZ),
        'm' | 'M' => cased(ch, Semicolon),
        'a'..='z' | 'A'..='Z' => qwerty_letter(ch),
        ' ' => plain(Space),
        '²' => plain(Backquote),
        '&' => plain(Digit1),
        'é' => plain(Digit2),
        '~' => dead_alone(TILDE),
        '"' => plain(Digit3),
        '#' => altgr(Digit3),
        '\'' => plain(Digit4),
        '{' => altgr(Digit4),
        '(' => plain(Digit5),
        '[' => altgr(Digit5),
        '-' => plain(Digit6),
        '|' => altgr(Digit6),
        'è' => plain(Digit7),
        '`' => dead_alone(GRAVE),
        '_' => plain(Digit8),
        '\\' => altgr(Digit8),
        'ç' => plain(Digit9),
        '^' => altgr(Digit9),
        'à' => plain(Digit0),
        '@' => altgr(Digit0),
        ')' => plain(Minus),
        '°' => shift(Minus),
        ']' => altgr(Minus),
        '=' => plain(Equal),
        '+' => shift(Equal),
        '}' => altgr(Equal),
        '¨' => dead_alone(DIAERESIS),
        '$' => plain(BracketRight),
        '£' => shift(BracketRight),
        '¤' => altgr(BracketRight),
        'ù' => plain(Quote),
        '%' => shift(Quote),
        '*' => plain(NonUsHash),
        'µ' => shift(NonUsHash),
        '<' => plain(NonUsBackslash),
        '>' => shift(NonUsBackslash),
        ',' => plain(KeyM),
        '?' => shift(KeyM),
        ';' => plain(Comma),
        '.' => shift(Comma),
        ':' => plain(Period),
        '/' => shift(Period),
        '!' => plain(Slash),
        '§' => shift(Slash),
        '€' => altgr(KeyE),
        _ => None,
    }
}

pub(super) fn dead_key(accent: Accent) -> Option<KeyStroke> {
    match accent {
        Accent::Circumflex => Some(CIRCUMFLEX),
        Accent::Diaeresis => Some(DIAERESIS),
        Accent::Grave => Some(GRAVE),
        Accent::Tilde => Some(TILDE),
        _ => None,
    }
}
