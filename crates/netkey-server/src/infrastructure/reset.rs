//! Hard-reset admin action.
//!
//! A hard reset does not reboot the board. It asks the server to stop
//! accepting requests and exit with [`HARD_RESET_EXIT_CODE`]; the process
//! supervisor (systemd `Restart=always` or similar) then starts a fresh
//! process, which re-opens the gadget endpoints and sends an empty report.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::warn;

use crate::application::AdminAction;

/// Exit status that tells the supervisor a restart was requested.
pub const HARD_RESET_EXIT_CODE: i32 = 3;

/// Builds the hard-reset action.
///
/// Calling it marks `reset_requested` and clears `running`, which makes the
/// HTTP server finish in-flight requests and return. `main` then releases
/// all keys and exits with [`HARD_RESET_EXIT_CODE`].
pub fn hard_reset_action(running: Arc<AtomicBool>, reset_requested: Arc<AtomicBool>) -> AdminAction {
    Arc::new(move || {
        warn!("hard reset requested; shutting down for restart");
        reset_requested.store(true, Ordering::SeqCst);
        running.store(false, Ordering::SeqCst);
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_reset_stops_server_and_flags_restart() {
        // Arrange
        let running = Arc::new(AtomicBool::new(true));
        let reset = Arc::new(AtomicBool::new(false));
        let action = hard_reset_action(Arc::clone(&running), Arc::clone(&reset));

        // Act
        action().unwrap();

        // Assert
        assert!(!running.load(Ordering::SeqCst));
        assert!(reset.load(Ordering::SeqCst));
    }

    #[test]
    fn test_action_is_idempotent() {
        let running = Arc::new(AtomicBool::new(true));
        let reset = Arc::new(AtomicBool::new(false));
        let action = hard_reset_action(Arc::clone(&running), Arc::clone(&reset));

        action().unwrap();
        action().unwrap();

        assert!(!running.load(Ordering::SeqCst));
        assert!(reset.load(Ordering::SeqCst));
    }
}
