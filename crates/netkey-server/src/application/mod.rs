//! Application layer for netkey-server.
//!
//! The application layer knows *what* a request means: it validates bodies,
//! resolves layouts and key names, and drives the keyboard through the
//! executor. It never touches sockets or HTTP status codes.
//!
//! # Responsibilities
//!
//! - Checking request bodies field-by-field ([`validator`])
//! - Serializing HID commands and guaranteeing key release ([`executor`])
//! - Turning a request body into an [`crate::domain::ApiReply`] ([`handlers`])
//!
//! # What does NOT belong here?
//!
//! - Binding a listener or routing URLs (that is infrastructure)
//! - Opening `/dev/hidgN` (the device arrives as an `Arc<dyn HidDevice>`)

pub mod executor;
pub mod handlers;
pub mod validator;

pub use executor::{CommandError, HidCommandExecutor};
pub use handlers::{handle_admin, AdminAction, RequestHandler};
pub use validator::{validate, Schema, ValidationErrors, ValueKind};
