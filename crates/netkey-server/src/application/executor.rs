//! HID command executor: the sole owner of the keyboard and mouse.
//!
//! # Why a lock around the whole command? (for beginners)
//!
//! There is one physical USB keyboard. If two HTTP requests typed at the same
//! time their key presses would interleave and the host would see garbage.
//! The executor therefore holds a `tokio::sync::Mutex` for the full duration
//! of a command, including pauses between keys and the final release. A
//! second request simply waits its turn.
//!
//! # Why spawn each command?
//!
//! axum drops a handler's future when the client disconnects. Dropping a
//! command half-way could leave a key held down on the host. Each command
//! therefore runs in its own Tokio task, which completes (and releases every
//! key) no matter what happens to the request that started it.
//!
//! # Cleanup guarantee
//!
//! Every command ends with all keys released. When a command fails the
//! executor still attempts a release; if that also fails, the release error
//! is logged and the original error is returned.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use netkey_core::{
    HidDevice, HidError, HidKeyCode, Keyboard, LayoutError, LayoutId, Mouse, UnknownKeyName,
};

// ── Error type ────────────────────────────────────────────────────────────────

/// Why a command did not complete.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The request asked for something that cannot be typed or pressed.
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    UnknownKey(#[from] UnknownKeyName),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Hid(#[from] HidError),

    /// The task running the command panicked or was cancelled.
    #[error("HID command did not complete: {0}")]
    Aborted(String),
}

impl CommandError {
    /// `true` for problems with the request itself (answered with 400),
    /// `false` for failures while executing it (answered with 500).
    pub fn is_client_error(&self) -> bool {
        match self {
            CommandError::InvalidRequest(_) | CommandError::UnknownKey(_) => true,
            CommandError::Layout(LayoutError::Hid(_)) => false,
            CommandError::Layout(_) => true,
            CommandError::Hid(_) | CommandError::Aborted(_) => false,
        }
    }
}

// ── Executor ──────────────────────────────────────────────────────────────────

struct Devices {
    keyboard: Keyboard,
    mouse: Mouse,
}

impl Devices {
    /// Best-effort keyboard release after a failure. Errors are logged only.
    fn cleanup(&mut self) {
        if let Err(e) = self.keyboard.release_all() {
            error!("release after failed command also failed: {e}");
        }
    }

    /// Presses `keys` as one report, then releases everything regardless of
    /// whether the press succeeded.
    fn press_and_release(&mut self, keys: &[HidKeyCode]) -> Result<(), CommandError> {
        let pressed = self.keyboard.press(keys);
        let released = self.keyboard.release_all();
        match (pressed, released) {
            (Ok(()), Ok(())) => Ok(()),
            (Ok(()), Err(e)) => Err(e.into()),
            (Err(e), Ok(())) => Err(e.into()),
            (Err(e), Err(cleanup)) => {
                error!("release after failed press also failed: {cleanup}");
                Err(e.into())
            }
        }
    }
}

/// Serializes all HID commands onto the single keyboard/mouse pair.
///
/// Cheap to share: clone the `Arc` it lives in.
pub struct HidCommandExecutor {
    devices: Arc<Mutex<Devices>>,
}

impl HidCommandExecutor {
    /// Builds the keyboard and mouse handles over `device`.
    pub fn new(device: Arc<dyn HidDevice>) -> Self {
        let devices = Devices {
            keyboard: Keyboard::new(Arc::clone(&device)),
            mouse: Mouse::new(device),
        };
        Self {
            devices: Arc::new(Mutex::new(devices)),
        }
    }

    /// Types `text` one character at a time, pausing `delay` after each.
    ///
    /// # Errors
    ///
    /// [`CommandError::Layout`] for an unmappable character or a device
    /// failure. Characters before the failing one have been typed and all
    /// keys have been released.
    pub async fn type_text(
        &self,
        layout: LayoutId,
        text: String,
        delay: Option<Duration>,
    ) -> Result<(), CommandError> {
        debug!(%layout, chars = text.chars().count(), ?delay, "type_text");
        let devices = Arc::clone(&self.devices);
        let task = tokio::spawn(async move {
            let mut devices = devices.lock_owned().await;
            for ch in text.chars() {
                if let Err(e) = layout.write_char(&mut devices.keyboard, ch) {
                    devices.cleanup();
                    return Err(CommandError::from(e));
                }
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
            }
            Ok(())
        });
        finish("type_text", task).await
    }

    /// Presses `keys` together, releases them, then pauses `delay`.
    ///
    /// The release always runs, even when the press fails (for example with
    /// more than six non-modifier keys).
    pub async fn press_combo(
        &self,
        keys: Vec<HidKeyCode>,
        delay: Option<Duration>,
    ) -> Result<(), CommandError> {
        self.press_sequence(vec![keys], delay).await
    }

    /// Presses each combo in turn under a single lock. Combo N+1 starts only
    /// after combo N has been released and `delay` has elapsed. Stops at the
    /// first failure.
    pub async fn press_sequence(
        &self,
        combos: Vec<Vec<HidKeyCode>>,
        delay: Option<Duration>,
    ) -> Result<(), CommandError> {
        debug!(?combos, ?delay, "press_sequence");
        let devices = Arc::clone(&self.devices);
        let task = tokio::spawn(async move {
            let mut devices = devices.lock_owned().await;
            for keys in &combos {
                devices.press_and_release(keys)?;
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
            }
            Ok::<_, CommandError>(())
        });
        finish("press_sequence", task).await
    }

    /// Releases every key and mouse button. Both are attempted; the first
    /// error is returned.
    pub async fn release_all(&self) -> Result<(), CommandError> {
        debug!("release_all");
        let devices = Arc::clone(&self.devices);
        let task = tokio::spawn(async move {
            let mut devices = devices.lock_owned().await;
            let keyboard = devices.keyboard.release_all();
            let mouse = devices.mouse.release_all();
            keyboard?;
            mouse?;
            Ok::<_, CommandError>(())
        });
        finish("release_all", task).await
    }

    /// Keys the executor believes are held. Waits for any running command.
    pub async fn pressed_keys(&self) -> Vec<HidKeyCode> {
        self.devices.lock().await.keyboard.pressed()
    }
}

async fn finish(
    command: &'static str,
    task: JoinHandle<Result<(), CommandError>>,
) -> Result<(), CommandError> {
    let result = task
        .await
        .unwrap_or_else(|e| Err(CommandError::Aborted(e.to_string())));
    if let Err(e) = &result {
        warn!("{command} failed: {e}");
    }
    result
}

// ── Tests ─────────────────────────────────────────────────────────────────────
