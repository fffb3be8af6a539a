//! Server configuration types.
//!
//! [`AppConfig`] is the single source of truth for runtime settings. It is
//! read once at startup from a JSON file (see
//! [`crate::infrastructure::config_file`]) and then optionally patched by CLI
//! flags.
//!
//! # Serde default values
//!
//! Every field carries a `#[serde(default = "...")]` so a partial file, or no
//! file at all, still yields a complete configuration. Example:
//!
//! ```json
//! {
//!   "board": "gadget",
//!   "network": { "bind_address": "0.0.0.0", "port": 80 },
//!   "api_endpoints": { "type": "/type" }
//! }
//! ```

use std::collections::HashSet;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Route reserved for the liveness check.
pub const HEALTH_PATH: &str = "/health";

/// Error type for loading and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON content could not be parsed.
    #[error("failed to parse config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The content parsed but is not usable.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ── Board ────────────────────────────────────────────────────────────────────

/// Which HID backend the server drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    /// Linux USB gadget: reports are written to `/dev/hidgN`.
    Gadget,
    /// No hardware: reports are kept in memory. For development.
    Loopback,
}

impl FromStr for Board {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gadget" => Ok(Board::Gadget),
            "loopback" => Ok(Board::Loopback),
            other => Err(ConfigError::Invalid(format!("Board {other} is not supported."))),
        }
    }
}

// ── Config schema types ──────────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// `"gadget"` or `"loopback"`. Kept as text so an unsupported name is
    /// reported with the server's own message rather than a serde error.
    #[serde(default = "default_board")]
    pub board: String,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub api_endpoints: EndpointConfig,
    #[serde(default)]
    pub device: DeviceConfig,
    /// `tracing` level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Listening socket.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NetworkConfig {
    /// IP address to bind. `"0.0.0.0"` binds all interfaces.
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// URL paths of the four API routes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointConfig {
    #[serde(rename = "type", default = "default_type_path")]
    pub type_text: String,
    #[serde(default = "default_type_keycodes_path")]
    pub type_keycodes: String,
    #[serde(default = "default_disable_boot_keyboard_path")]
    pub disable_boot_keyboard: String,
    #[serde(default = "default_hard_reset_path")]
    pub hard_reset: String,
}

/// Where the HID endpoints and the boot-keyboard marker live.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeviceConfig {
    #[serde(default = "default_keyboard_path")]
    pub keyboard_path: PathBuf,
    #[serde(default = "default_mouse_path")]
    pub mouse_path: PathBuf,
    /// Directory holding the boot-keyboard `enable` marker file.
    #[serde(default = "default_boot_keyboard_dir")]
    pub boot_keyboard_dir: PathBuf,
}

// ── Default helpers ──────────────────────────────────────────────────────────

fn default_board() -> String {
    "gadget".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    80
}
fn default_type_path() -> String {
    "/type".to_string()
}
fn default_type_keycodes_path() -> String {
    "/type_keycodes".to_string()
}
fn default_disable_boot_keyboard_path() -> String {
    "/disable_boot_keyboard".to_string()
}
fn default_hard_reset_path() -> String {
    "/hard_reset".to_string()
}
fn default_keyboard_path() -> PathBuf {
    PathBuf::from("/dev/hidg0")
}
fn default_mouse_path() -> PathBuf {
    PathBuf::from("/dev/hidg1")
}
fn default_boot_keyboard_dir() -> PathBuf {
    PathBuf::from("boot_kbd")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            board: default_board(),
            network: NetworkConfig::default(),
            api_endpoints: EndpointConfig::default(),
            device: DeviceConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            type_text: default_type_path(),
            type_keycodes: default_type_keycodes_path(),
            disable_boot_keyboard: default_disable_boot_keyboard_path(),
            hard_reset: default_hard_reset_path(),
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            keyboard_path: default_keyboard_path(),
            mouse_path: default_mouse_path(),
            boot_keyboard_dir: default_boot_keyboard_dir(),
        }
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

impl AppConfig {
    /// Parses the `board` field.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Invalid`] with `"Board {name} is not supported."`.
    pub fn board(&self) -> Result<Board, ConfigError> {
        self.board.parse()
    }

    /// Combines `bind_address` and `port` into a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.network.bind_address.parse().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid bind address: '{}'",
                self.network.bind_address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.network.port))
    }

    /// Checks everything serde cannot: the board name, the bind address and
    /// the endpoint paths.
    ///
    /// Endpoint paths must start with `/`, must differ from each other and
    /// must not shadow [`HEALTH_PATH`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.board()?;
        self.socket_addr()?;

        let endpoints = self.api_endpoints.named_paths();
        let mut seen = HashSet::new();
        for (name, path) in endpoints {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid(format!(
                    "endpoint {name} must start with '/': '{path}'"
                )));
            }
            if path == HEALTH_PATH {
                return Err(ConfigError::Invalid(format!(
                    "endpoint {name} conflicts with {HEALTH_PATH}"
                )));
            }
            if !seen.insert(path) {
                return Err(ConfigError::Invalid(format!(
                    "endpoint {name} reuses path '{path}'"
                )));
            }
        }
        Ok(())
    }
}

impl EndpointConfig {
    fn named_paths(&self) -> [(&'static str, &str); 4] {
        [
            ("type", self.type_text.as_str()),
            ("type_keycodes", self.type_keycodes.as_str()),
            ("disable_boot_keyboard", self.disable_boot_keyboard.as_str()),
            ("hard_reset", self.hard_reset.as_str()),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
