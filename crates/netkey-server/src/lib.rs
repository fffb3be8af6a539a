//! netkey-server library crate.
//!
//! An HTTP JSON API that makes a small Linux board look like a USB keyboard
//! to whatever computer it is plugged into. Clients post text (typed through
//! a host keyboard layout) or named key combinations, and the server writes
//! the matching HID reports to the USB gadget endpoints.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! HTTP client (JSON)
//!         ↕
//! [netkey-server]
//!   ├── domain/           Pure types: AppConfig, request bodies, ApiReply
//!   ├── application/      Validation, request handling, the HID executor
//!   └── infrastructure/
//!         ├── http/           axum router and serve loop
//!         ├── config_file/    JSON config loading
//!         ├── gadget/         /dev/hidgN writer (HidDevice impl)
//!         ├── boot_keyboard/  boot-protocol marker file
//!         └── reset/          hard-reset admin action
//! ```
//!
//! # Layer rules
//!
//! - `domain` has no I/O and no async.
//! - `application` depends on `domain` and `netkey-core`; it sees the device
//!   only as `Arc<dyn HidDevice>`.
//! - `infrastructure` depends on everything plus `axum` and the file system.
//!
//! # For beginners: why this structure?
//!
//! Everything that decides what a request means lives in `application`, so it
//! can be tested with an in-memory device and no network. The HTTP layer is a
//! thin shell that forwards bodies and converts replies to status codes.

/// Domain layer: configuration and request/response types (no I/O).
pub mod domain;

/// Application layer: validation, handlers and the HID command executor.
pub mod application;

/// Infrastructure layer: HTTP server, config file, HID gadget and admin actions.
pub mod infrastructure;
