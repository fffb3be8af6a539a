//! JSON configuration file loading.
//!
//! The file is read once at startup. A missing file is not an error: the
//! server runs with [`AppConfig::default`], which matches a stock USB gadget
//! setup (`/dev/hidg0`, `/dev/hidg1`, port 80).

use std::path::Path;

use crate::domain::{AppConfig, ConfigError};

/// Default location, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/netkey.json";

/// Loads configuration from `path`.
///
/// Returns [`AppConfig::default()`] if the file does not exist. The result is
/// not validated; call [`AppConfig::validate`] after applying CLI overrides.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] if the file exists but cannot be read, or
/// [`ConfigError::Parse`] if its content is not valid JSON for [`AppConfig`].
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = serde_json::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
