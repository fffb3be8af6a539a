//! # netkey-core
//!
//! Shared library for netkey containing USB HID key codes, symbolic key-name
//! resolution, host keyboard layouts, boot-protocol report encoding and the
//! stateful keyboard/mouse handles.
//!
//! It has no network, async runtime or OS dependencies. The server crate
//! supplies the actual HID endpoint through the [`device::HidDevice`] trait.
//!
//! # Architecture overview (for beginners)
//!
//! netkey turns a small Linux board into a USB keyboard that can be driven
//! over HTTP. The board is plugged into a target computer (the "host"), which
//! sees an ordinary keyboard. This crate contains everything needed to decide
//! *which* reports to send:
//!
//! - **`keymap`** – USB HID Usage IDs ([`HidKeyCode`]) and the table of
//!   symbolic names (`"CONTROL"`, `"KEYPAD_SEVEN"`) clients may use.
//!
//! - **`layout`** – Per-locale tables that turn a character into the key
//!   strokes that produce it on a host configured for that locale.
//!
//! - **`device`** – The 8-byte keyboard and 4-byte mouse reports, the
//!   [`HidDevice`] seam, and the [`Keyboard`]/[`Mouse`] handles that remember
//!   what is currently held down.

pub mod device;
pub mod keymap;
pub mod layout;

pub use device::{
    DeviceError, HidDevice, HidError, Keyboard, KeyboardReport, Mouse, MouseReport,
};
pub use keymap::hid::HidKeyCode;
pub use keymap::names::{resolve_key_name, UnknownKeyName};
pub use layout::{resolve_layout, CharMapping, KeyStroke, LayoutError, LayoutId};
