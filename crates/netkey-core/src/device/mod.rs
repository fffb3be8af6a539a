//! HID device abstraction and the stateful keyboard/mouse handles.
//!
//! [`HidDevice`] is the seam between this crate and whatever actually
//! delivers reports to the USB host: a Linux gadget character device in
//! production, a [`recording::RecordingDevice`] in tests and on the
//! `loopback` board. [`Keyboard`] and [`Mouse`] sit on top of it and track
//! which keys and buttons are currently held.

pub mod keyboard;
pub mod mouse;
pub mod recording;
pub mod report;

use thiserror::Error;

pub use keyboard::Keyboard;
pub use mouse::Mouse;
pub use report::{KeyboardReport, MouseReport, ReportError, MAX_PRESSED_KEYS};

/// Failure reported by a [`HidDevice`] implementation.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Writing a report to the endpoint failed.
    #[error("HID write to {endpoint} failed: {source}")]
    Io {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },

    /// Any other device-level failure.
    #[error("HID device error: {0}")]
    Platform(String),
}

/// Errors from the [`Keyboard`] and [`Mouse`] handles.
#[derive(Debug, Error)]
pub enum HidError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// A USB HID endpoint that accepts boot-protocol reports.
///
/// Implementations must be cheap to share behind an `Arc`; the handles call
/// these methods with `&self`.
pub trait HidDevice: Send + Sync {
    /// Delivers one keyboard report to the host.
    fn send_keyboard_report(&self, report: &KeyboardReport) -> Result<(), DeviceError>;

    /// Delivers one mouse report to the host.
    fn send_mouse_report(&self, report: &MouseReport) -> Result<(), DeviceError>;
}
