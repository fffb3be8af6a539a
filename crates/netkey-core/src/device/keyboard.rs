//! Stateful keyboard handle.

use std::sync::Arc;

use tracing::trace;

use super::{HidDevice, HidError, KeyboardReport};
use crate::keymap::hid::HidKeyCode;

/// The emulated keyboard.
///
/// Holds the report that was last handed to the device. A key counts as
/// pressed from the moment it is added to the report, even if delivering the
/// report then fails: the host may or may not have seen it, so the only safe
/// assumption is that it is latched until [`Keyboard::release_all`] runs.
pub struct Keyboard {
    device: Arc<dyn HidDevice>,
    report: KeyboardReport,
}

impl Keyboard {
    pub fn new(device: Arc<dyn HidDevice>) -> Self {
        Self {
            device,
            report: KeyboardReport::new(),
        }
    }

    /// Presses all `keys` together and sends them as a single report.
    ///
    /// Keys already held stay held.
    ///
    /// # Errors
    ///
    /// [`HidError::Report`] if the keys do not fit in one report (nothing is
    /// sent and the held set is unchanged), or [`HidError::Device`] if the
    /// device rejects the report.
    pub fn press(&mut self, keys: &[HidKeyCode]) -> Result<(), HidError> {
        let mut next = self.report;
        for &key in keys {
            next.press(key)?;
        }
        self.report = next;
        trace!(?keys, bytes = ?self.report.as_bytes(), "keyboard press");
        self.device.send_keyboard_report(&self.report)?;
        Ok(())
    }

    /// Releases every held key and modifier.
    ///
    /// The local state is cleared before the empty report is sent, so
    /// [`Keyboard::is_idle`] holds afterwards even when the send fails.
    ///
    /// # Errors
    ///
    /// [`HidError::Device`] if the empty report could not be delivered.
    pub fn release_all(&mut self) -> Result<(), HidError> {
        self.report.clear();
        trace!("keyboard release_all");
        self.device.send_keyboard_report(&self.report)?;
        Ok(())
    }

    /// Keys currently held (modifiers first).
    pub fn pressed(&self) -> Vec<HidKeyCode> {
        self.report.pressed()
    }

    /// Returns `true` if nothing is held.
    pub fn is_idle(&self) -> bool {
        self.report.is_empty()
    }
}
