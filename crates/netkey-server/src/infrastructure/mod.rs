//! Infrastructure layer for netkey-server.
//!
//! The infrastructure layer handles all I/O: serving HTTP, reading the config
//! file, writing HID reports to the USB gadget and touching the boot-keyboard
//! marker.
//!
//! # Responsibilities
//!
//! - Binding the listener and routing requests to the application layer
//! - Loading `config/netkey.json`
//! - Implementing `HidDevice` for `/dev/hidgN`
//! - The two administrative actions
//! - Stopping gracefully when the `running` flag is cleared
//!
//! # What does NOT belong here?
//!
//! - Request validation or key-name resolution (that is the application layer)
//! - Config and request types (that is the domain layer)

pub mod boot_keyboard;
pub mod config_file;
pub mod gadget;
pub mod http;
pub mod reset;

// Re-export the primary entry points so `main.rs` can call them concisely.
pub use boot_keyboard::BootKeyboard;
pub use config_file::{load_config, DEFAULT_CONFIG_PATH};
pub use gadget::GadgetDevice;
pub use http::{create_router, run_server, AppState};
pub use reset::{hard_reset_action, HARD_RESET_EXIT_CODE};
