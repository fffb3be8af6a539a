//! In-memory [`HidDevice`] that records every report.
//!
//! Used by tests throughout the workspace and by the server's `loopback`
//! board, which runs the full HTTP stack without USB gadget hardware.
//! Failure injection lets tests check that cleanup still happens when the
//! device stops accepting reports part-way through a command.

use std::sync::Mutex;

use tracing::debug;

use super::{DeviceError, HidDevice, KeyboardReport, MouseReport};
use crate::keymap::hid::HidKeyCode;

/// One report as it was handed to the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedReport {
    Keyboard([u8; 8]),
    Mouse([u8; 4]),
}

#[derive(Default)]
struct State {
    reports: Vec<RecordedReport>,
    /// Number of further sends to accept before failing. `None` = never fail.
    fail_after: Option<usize>,
}

/// Records reports instead of sending them anywhere.
#[derive(Default)]
pub struct RecordingDevice {
    state: Mutex<State>,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts `n` more reports, then fails every send after that.
    ///
    /// Failed sends are not recorded.
    pub fn fail_after(&self, n: usize) {
        self.lock().fail_after = Some(n);
    }

    /// All reports delivered so far, in order.
    pub fn reports(&self) -> Vec<RecordedReport> {
        self.lock().reports.clone()
    }

    /// Only the keyboard reports, decoded.
    pub fn keyboard_reports(&self) -> Vec<KeyboardReport> {
        self.lock()
            .reports
            .iter()
            .filter_map(|r| match r {
                RecordedReport::Keyboard(bytes) => Some(KeyboardReport::from_bytes(*bytes)),
                RecordedReport::Mouse(_) => None,
            })
            .collect()
    }

    /// Keyboard reports as lists of held keys, modifiers first.
    ///
    /// Handy for asserting on sequences: an empty list is a release.
    pub fn keyboard_presses(&self) -> Vec<Vec<HidKeyCode>> {
        self.keyboard_reports().iter().map(KeyboardReport::pressed).collect()
    }

    /// The last keyboard report, if any was sent.
    pub fn last_keyboard_report(&self) -> Option<KeyboardReport> {
        self.keyboard_reports().last().copied()
    }

    pub fn clear(&self) {
        self.lock().reports.clear();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        // A panic while holding this lock can only come from a test thread;
        // the recorded data is still usable.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record(&self, report: RecordedReport) -> Result<(), DeviceError> {
        let mut state = self.lock();
        match state.fail_after {
            Some(0) => {
                return Err(DeviceError::Platform(
                    "recording device: injected failure".to_string(),
                ))
            }
            Some(ref mut remaining) => *remaining -= 1,
            None => {}
        }
        debug!(?report, "recorded report");
        state.reports.push(report);
        Ok(())
    }
}

impl HidDevice for RecordingDevice {
    fn send_keyboard_report(&self, report: &KeyboardReport) -> Result<(), DeviceError> {
        self.record(RecordedReport::Keyboard(report.as_bytes()))
    }

    fn send_mouse_report(&self, report: &MouseReport) -> Result<(), DeviceError> {
        self.record(RecordedReport::Mouse(report.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let device = RecordingDevice::new();
        let mut report = KeyboardReport::new();
        report.press(HidKeyCode::KeyA).unwrap();

        device.send_keyboard_report(&report).unwrap();
        device.send_keyboard_report(&KeyboardReport::new()).unwrap();

        assert_eq!(
            device.keyboard_presses(),
            vec![vec![HidKeyCode::KeyA], vec![]]
        );
    }

    #[test]
    fn test_fail_after_accepts_n_then_fails() {
        // Arrange
        let device = RecordingDevice::new();
        device.fail_after(1);
        let empty = KeyboardReport::new();

        // Act
        let first = device.send_keyboard_report(&empty);
        let second = device.send_keyboard_report(&empty);

        // Assert
        assert!(first.is_ok());
        assert!(second.is_err());
        assert_eq!(device.reports().len(), 1);
    }
}
