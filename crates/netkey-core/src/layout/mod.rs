//! Keyboard layouts: turning characters into physical key presses.
//!
//! The host interprets key codes through its own configured keyboard layout.
//! To make the host see the character `"z"`, a German host needs the key that
//! sits where a US keyboard has `Y`. A [`LayoutId`] therefore names the
//! layout the *host* is configured with, and translates each character into
//! the key strokes that produce it there.
//!
//! # How characters map (for beginners)
//!
//! Every character resolves to a [`CharMapping`]:
//!
//! - [`CharMapping::Stroke`] – one key, possibly with Shift and/or AltGr held
//!   (AltGr is the right Alt key, [`HidKeyCode::AltRight`]).
//! - [`CharMapping::Dead`] – an accent key that produces nothing on its own
//!   (a "dead key"), followed by the base letter. On a French keyboard `ê` is
//!   `^` then `e`.
//!
//! Each stroke is sent as one report holding the modifiers and the key, then
//! everything is released before the next stroke.
//!
//! Lookup order for a character:
//!
//! 1. Control characters shared by every layout (`\n`, `\t`, …).
//! 2. The locale's own table.
//! 3. For accented letters the table does not list, the locale's dead key for
//!    that accent combined with the base letter.

mod de_de;
mod en_gb;
mod en_us;
mod es_es;
mod fr_ca;
mod fr_fr;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::device::{HidError, Keyboard};
use crate::keymap::hid::HidKeyCode;

// ── Errors ───────────────────────────────────────────────────────────────────

/// Errors raised while selecting or writing with a layout.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Unsupported keyboard layout: {requested}. Available layouts: ({})", supported_list())]
    Unsupported { requested: String },

    #[error("Character {ch:?} (U+{:04X}) cannot be typed with keyboard layout {layout}", code_point(.ch))]
    UnmappableCharacter { ch: char, layout: LayoutId },

    #[error(transparent)]
    Hid(#[from] HidError),
}

fn code_point(ch: &char) -> u32 {
    u32::from(*ch)
}

fn supported_list() -> String {
    LayoutId::ALL
        .iter()
        .map(|id| id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Key strokes ──────────────────────────────────────────────────────────────

/// One physical key, pressed together with optional modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStroke {
    pub key: HidKeyCode,
    pub shift: bool,
    pub altgr: bool,
}

impl KeyStroke {
    pub const fn plain(key: HidKeyCode) -> Self {
        Self {
            key,
            shift: false,
            altgr: false,
        }
    }

    pub const fn shift(key: HidKeyCode) -> Self {
        Self {
            key,
            shift: true,
            altgr: false,
        }
    }

    pub const fn altgr(key: HidKeyCode) -> Self {
        Self {
            key,
            shift: false,
            altgr: true,
        }
    }

    pub const fn shift_altgr(key: HidKeyCode) -> Self {
        Self {
            key,
            shift: true,
            altgr: true,
        }
    }

    /// Keys to hold for this stroke: modifiers first, then the key itself.
    pub fn keys(&self) -> Vec<HidKeyCode> {
        let mut keys = Vec::with_capacity(3);
        if self.shift {
            keys.push(HidKeyCode::ShiftLeft);
        }
        if self.altgr {
            keys.push(HidKeyCode::AltRight);
        }
        keys.push(self.key);
        keys
    }
}

/// How one character is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharMapping {
    Stroke(KeyStroke),
    Dead { accent: KeyStroke, base: KeyStroke },
}

impl CharMapping {
    /// The strokes to send, in order.
    pub fn strokes(self) -> impl Iterator<Item = KeyStroke> {
        let pair = match self {
            CharMapping::Stroke(stroke) => [Some(stroke), None],
            CharMapping::Dead { accent, base } => [Some(accent), Some(base)],
        };
        pair.into_iter().flatten()
    }
}

/// Accents that layouts may type with a dead key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Accent {
    Grave,
    Acute,
    Circumflex,
    Diaeresis,
    Tilde,
    Cedilla,
}

/// Splits a precomposed Latin letter into accent and base letter.
fn decompose(ch: char) -> Option<(Accent, char)> {
    use Accent::*;
    let pair = match ch {
        'à' => (Grave, 'a'),
        'è' => (Grave, 'e'),
        'ì' => (Grave, 'i'),
        'ò' => (Grave, 'o'),
        'ù' => (Grave, 'u'),
        'À' => (Grave, 'A'),
        'È' => (Grave, 'E'),
        'Ì' => (Grave, 'I'),
        'Ò' => (Grave, 'O'),
        'Ù' => (Grave, 'U'),
        'á' => (Acute, 'a'),
        'é' => (Acute, 'e'),
        'í' => (Acute, 'i'),
        'ó' => (Acute, 'o'),
        'ú' => (Acute, 'u'),
        'ý' => (Acute, 'y'),
        'Á' => (Acute, 'A'),
        'É' => (Acute, 'E'),
        'Í' => (Acute, 'I'),
        'Ó' => (Acute, 'O'),
        'Ú' => (Acute, 'U'),
        'Ý' => (Acute, 'Y'),
        'â' => (Circumflex, 'a'),
        'ê' => (Circumflex, 'e'),
        'î' => (Circumflex, 'i'),
        'ô' => (Circumflex, 'o'),
        'û' => (Circumflex, 'u'),
        'Â' => (Circumflex, 'A'),
        'Ê' => (Circumflex, 'E'),
        'Î' => (Circumflex, 'I'),
        'Ô' => (Circumflex, 'O'),
        'Û' => (Circumflex, 'U'),
        'ä' => (Diaeresis, 'a'),
        'ë' => (Diaeresis, 'e'),
        'ï' => (Diaeresis, 'i'),
        'ö' => (Diaeresis, 'o'),
        'ü' => (Diaeresis, 'u'),
        'ÿ' => (Diaeresis, 'y'),
        'Ä' => (Diaeresis, 'A'),
        'Ë' => (Diaeresis, 'E'),
        'Ï' => (Diaeresis, 'I'),
        'Ö' => (Diaeresis, 'O'),
        'Ü' => (Diaeresis, 'U'),
        'ã' => (Tilde, 'a'),
        'õ' => (Tilde, 'o'),
        'ñ' => (Tilde, 'n'),
        'Ã' => (Tilde, 'A'),
        'Õ' => (Tilde, 'O'),
        'Ñ' => (Tilde, 'N'),
        'ç' => (Cedilla, 'c'),
        'Ç' => (Cedilla, 'C'),
        _ => return None,
    };
    Some(pair)
}

// ── Table helpers shared by the locale modules ───────────────────────────────

pub(crate) const fn plain(key: HidKeyCode) -> Option<CharMapping> {
    Some(CharMapping::Stroke(KeyStroke::plain(key)))
}

pub(crate) const fn shift(key: HidKeyCode) -> Option<CharMapping> {
    Some(CharMapping::Stroke(KeyStroke::shift(key)))
}

pub(crate) const fn altgr(key: HidKeyCode) -> Option<CharMapping> {
    Some(CharMapping::Stroke(KeyStroke::altgr(key)))
}

pub(crate) const fn shift_altgr(key: HidKeyCode) -> Option<CharMapping> {
    Some(CharMapping::Stroke(KeyStroke::shift_altgr(key)))
}

/// A spacing accent: the dead key followed by Space.
pub(crate) const fn dead_alone(accent: KeyStroke) -> Option<CharMapping> {
    Some(CharMapping::Dead {
        accent,
        base: KeyStroke::plain(HidKeyCode::Space),
    })
}

/// Letter on its US position; uppercase adds Shift.
pub(crate) fn qwerty_letter(ch: char) -> Option<CharMapping> {
    if !ch.is_ascii_alphabetic() {
        return None;
    }
    let offset = u16::from(ch.to_ascii_lowercase() as u8 - b'a');
    cased(ch, HidKeyCode::from_u16(HidKeyCode::KeyA.as_u16() + offset))
}

/// `key` unshifted for lowercase `ch`, shifted for uppercase.
pub(crate) fn cased(ch: char, key: HidKeyCode) -> Option<CharMapping> {
    if ch.is_uppercase() {
        shift(key)
    } else {
        plain(key)
    }
}

/// Key of the digit `ch` on the top row.
pub(crate) fn digit_key(ch: char) -> Option<HidKeyCode> {
    match ch {
        '0' => Some(HidKeyCode::Digit0),
        '1'..='9' => {
            let offset = u16::from(ch as u8 - b'1');
            Some(HidKeyCode::from_u16(HidKeyCode::Digit1.as_u16() + offset))
        }
        _ => None,
    }
}

fn control_char(ch: char) -> Option<CharMapping> {
    match ch {
        '\n' => plain(HidKeyCode::Enter),
        '\t' => plain(HidKeyCode::Tab),
        '\u{8}' => plain(HidKeyCode::Backspace),
        '\u{1b}' => plain(HidKeyCode::Escape),
        '\u{7f}' => plain(HidKeyCode::Delete),
        _ => None,
    }
}

// ── Layout identifiers ───────────────────────────────────────────────────────

/// The closed set of supported host keyboard layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LayoutId {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "fr-CA")]
    FrCa,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "es-ES")]
    EsEs,
    #[serde(rename = "de-DE")]
    DeDe,
}

impl LayoutId {
    /// Every supported layout, in the order they are listed to clients.
    pub const ALL: [LayoutId; 6] = [
        LayoutId::EnUs,
        LayoutId::EnGb,
        LayoutId::FrCa,
        LayoutId::FrFr,
        LayoutId::EsEs,
        LayoutId::DeDe,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutId::EnUs => "en-US",
            LayoutId::EnGb => "en-GB",
            LayoutId::FrCa => "fr-CA",
            LayoutId::FrFr => "fr-FR",
            LayoutId::EsEs => "es-ES",
            LayoutId::DeDe => "de-DE",
        }
    }

    /// Looks up how `ch` is typed on this layout.
    pub fn char_mapping(self, ch: char) -> Option<CharMapping> {
        if let Some(mapping) = control_char(ch) {
            return Some(mapping);
        }
        if let Some(mapping) = self.table(ch) {
            return Some(mapping);
        }
        let (accent, base) = decompose(ch)?;
        let accent = self.dead_key(accent)?;
        match self.table(base)? {
            CharMapping::Stroke(base) => Some(CharMapping::Dead { accent, base }),
            CharMapping::Dead { .. } => None,
        }
    }

    /// Types a single character: each stroke is pressed, then everything is
    /// released.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnmappableCharacter`] before anything is sent if the
    /// layout has no way to produce `ch`; [`LayoutError::Hid`] if the keyboard
    /// fails part-way. Keys may still be held in the latter case.
    pub fn write_char(self, keyboard: &mut Keyboard, ch: char) -> Result<(), LayoutError> {
        let mapping = self
            .char_mapping(ch)
            .ok_or(LayoutError::UnmappableCharacter { ch, layout: self })?;
        for stroke in mapping.strokes() {
            keyboard.press(&stroke.keys())?;
            keyboard.release_all()?;
        }
        Ok(())
    }

    /// Types `text` character by character, stopping at the first error.
    pub fn write(self, keyboard: &mut Keyboard, text: &str) -> Result<(), LayoutError> {
        text.chars().try_for_each(|ch| self.write_char(keyboard, ch))
    }

    fn table(self, ch: char) -> Option<CharMapping> {
        match self {
            LayoutId::EnUs => en_us::map(ch),
            LayoutId::EnGb => en_gb::map(ch),
            LayoutId::FrCa => fr_ca::map(ch),
            LayoutId::FrFr => fr_fr::map(ch),
            LayoutId::EsEs => es_es::map(ch),
            LayoutId::DeDe => de_de::map(ch),
        }
    }

    fn dead_key(self, accent: Accent) -> Option<KeyStroke> {
        match self {
            LayoutId::EnUs | LayoutId::EnGb => None,
            LayoutId::FrCa => fr_ca::dead_key(accent),
            LayoutId::FrFr => fr_fr::dead_key(accent),
            LayoutId::EsEs => es_es::dead_key(accent),
            LayoutId::DeDe => de_de::dead_key(accent),
        }
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutId {
    type Err = LayoutError;

    /// Identifiers are matched exactly (`"en-US"`, not `"en-us"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LayoutId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| LayoutError::Unsupported {
                requested: s.to_string(),
            })
    }
}

/// Selects a layout by identifier, defaulting to en-US when none is given.
pub fn resolve_layout(id: Option<&str>) -> Result<LayoutId, LayoutError> {
    match id {
        None => Ok(LayoutId::default()),
        Some(id) => id.parse(),
    }
}
