//! Stateful mouse handle.
//!
//! netkey never moves or clicks the mouse; the handle exists so that
//! "release everything" covers the mouse endpoint as well as the keyboard.

use std::sync::Arc;

use tracing::trace;

use super::{HidDevice, HidError, MouseReport};

/// The emulated mouse. Only button state is tracked.
pub struct Mouse {
    device: Arc<dyn HidDevice>,
    report: MouseReport,
}

impl Mouse {
    pub fn new(device: Arc<dyn HidDevice>) -> Self {
        Self {
            device,
            report: MouseReport::new(),
        }
    }

    /// Releases every button. Local state is cleared even if the send fails.
    pub fn release_all(&mut self) -> Result<(), HidError> {
        self.report.clear();
        trace!("mouse release_all");
        self.device.send_mouse_report(&self.report)?;
        Ok(())
    }

    pub fn is_idle(&self) -> bool {
        self.report.is_empty()
    }
}
