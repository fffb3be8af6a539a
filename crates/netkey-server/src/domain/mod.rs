//! Domain layer for netkey-server.
//!
//! Pure types with no I/O: the configuration schema, the request bodies and
//! the framework-free reply. Nothing here touches tokio, axum or the HID
//! device.

pub mod config;
pub mod requests;
pub mod response;

pub use config::{AppConfig, Board, ConfigError};
pub use requests::{KeycodeEntry, KeycodeRequest, TypeRequest};
pub use response::{ApiReply, ReplyStatus};
