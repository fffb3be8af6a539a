//! Key codes and symbolic key names.
//!
//! The canonical representation is USB HID Usage IDs (page 0x07, Keyboard/Keypad).
//! Clients never send raw codes: they either send text, which a
//! [`crate::layout::LayoutId`] translates, or key names, which
//! [`resolve_key_name`] translates.

pub mod hid;
pub mod names;

pub use hid::HidKeyCode;
pub use names::{resolve_key_name, UnknownKeyName};
