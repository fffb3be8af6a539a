//! Linux USB gadget HID backend.
//!
//! # What is a HID gadget? (for beginners)
//!
//! Boards with a USB device controller (Raspberry Pi Zero, many SBCs) can
//! present themselves to a host computer as a USB keyboard. The kernel's
//! gadget framework exposes each HID function as a character device:
//! `/dev/hidg0` for the keyboard, `/dev/hidg1` for the mouse. Writing an
//! 8-byte report to `/dev/hidg0` is exactly what a real keyboard sends over
//! the wire, so the host sees a key go down.
//!
//! The endpoint is opened for every report. Reports are tiny and rare
//! (a few per typed character), and reopening survives the host
//! re-enumerating the gadget between requests.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::trace;

use netkey_core::{DeviceError, HidDevice, KeyboardReport, MouseReport};

/// Writes boot-protocol reports to the gadget character devices.
#[derive(Debug, Clone)]
pub struct GadgetDevice {
    keyboard_path: PathBuf,
    mouse_path: PathBuf,
}

impl GadgetDevice {
    pub fn new(keyboard_path: impl Into<PathBuf>, mouse_path: impl Into<PathBuf>) -> Self {
        Self {
            keyboard_path: keyboard_path.into(),
            mouse_path: mouse_path.into(),
        }
    }

    pub fn keyboard_path(&self) -> &Path {
        &self.keyboard_path
    }

    pub fn mouse_path(&self) -> &Path {
        &self.mouse_path
    }
}

fn write_report(path: &Path, bytes: &[u8]) -> Result<(), DeviceError> {
    let io_error = |source| DeviceError::Io {
        endpoint: path.display().to_string(),
        source,
    };
    let mut endpoint = OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(io_error)?;
    endpoint.write_all(bytes).map_err(io_error)?;
    endpoint.flush().map_err(io_error)?;
    trace!(endpoint = %path.display(), ?bytes, "report written");
    Ok(())
}

impl HidDevice for GadgetDevice {
    fn send_keyboard_report(&self, report: &KeyboardReport) -> Result<(), DeviceError> {
        write_report(&self.keyboard_path, &report.as_bytes())
    }

    fn send_mouse_report(&self, report: &MouseReport) -> Result<(), DeviceError> {
        write_report(&self.mouse_path, &report.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use netkey_core::HidKeyCode;
    use tempfile::TempDir;

    /// Creates empty files standing in for `/dev/hidg0` and `/dev/hidg1`.
    fn fake_gadget() -> (TempDir, GadgetDevice) {
        let dir = TempDir::new().unwrap();
        let kbd = dir.path().join("hidg0");
        let mouse = dir.path().join("hidg1");
        std::fs::write(&kbd, b"").unwrap();
        std::fs::write(&mouse, b"").unwrap();
        (dir, GadgetDevice::new(kbd, mouse))
    }

    #[test]
    fn test_keyboard_reports_are_written_in_order() {
        // Arrange
        let (_dir, device) = fake_gadget();
        let mut report = KeyboardReport::new();
        report.press(HidKeyCode::ShiftLeft).unwrap();
        report.press(HidKeyCode::KeyA).unwrap();

        // Act
        device.send_keyboard_report(&report).unwrap();
        device.send_keyboard_report(&KeyboardReport::new()).unwrap();

        // Assert
        let written = std::fs::read(device.keyboard_path()).unwrap();
        assert_eq!(
            written,
            vec![0x02, 0, 0x04, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_mouse_reports_go_to_the_mouse_endpoint() {
        let (_dir, device) = fake_gadget();

        device.send_mouse_report(&MouseReport::new()).unwrap();

        assert_eq!(std::fs::read(device.mouse_path()).unwrap(), vec![0, 0, 0, 0]);
        assert!(std::fs::read(device.keyboard_path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_endpoint_is_an_io_error_naming_the_path() {
        let dir = TempDir::new().unwrap();
        let device = GadgetDevice::new(dir.path().join("hidg0"), dir.path().join("hidg1"));

        let err = device
            .send_keyboard_report(&KeyboardReport::new())
            .unwrap_err();

        match err {
            DeviceError::Io { endpoint, .. } => assert!(endpoint.ends_with("hidg0")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
