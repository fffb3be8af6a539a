//! Boot-keyboard mode marker.
//!
//! During early boot (BIOS setup, bootloaders) hosts only understand the
//! plain boot-protocol keyboard. The board's startup scripts decide which
//! USB descriptor to present by looking for a marker file whose name
//! contains `enable` inside a configured directory. Removing that file
//! switches the next boot back to the normal descriptor.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

const ENABLE_MARKER: &str = "enable";

/// Handle on the directory that holds the enable marker.
#[derive(Debug, Clone)]
pub struct BootKeyboard {
    dir: PathBuf,
}

impl BootKeyboard {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Finds the enable marker. A missing directory counts as "no marker".
    pub fn enable_file(&self) -> io::Result<Option<PathBuf>> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e),
        };
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_lowercase();
            if name.contains(ENABLE_MARKER) {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }

    pub fn is_enabled(&self) -> io::Result<bool> {
        Ok(self.enable_file()?.is_some())
    }

    /// Removes the enable marker. Already disabled is success.
    pub fn disable(&self) -> anyhow::Result<()> {
        let marker = self
            .enable_file()
            .with_context(|| format!("cannot read {}", self.dir.display()))?;
        let Some(path) = marker else {
            debug!(dir = %self.dir.display(), "boot keyboard already disabled");
            return Ok(());
        };
        match std::fs::remove_file(&path) {
            Ok(()) => {}
            // Lost a race with another remover
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(e).with_context(|| format!("cannot remove {}", path.display()));
            }
        }
        info!(marker = %path.display(), "boot keyboard disabled");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_disable_removes_enable_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("enable");
        std::fs::write(&marker, b"").unwrap();
        let boot = BootKeyboard::new(dir.path());
        assert!(boot.is_enabled().unwrap());

        // Act
        boot.disable().unwrap();

        // Assert
        assert!(!marker.exists());
        assert!(!boot.is_enabled().unwrap());
    }

    #[test]
    fn test_marker_match_is_case_insensitive_substring() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("README"), b"").unwrap();
        std::fs::write(dir.path().join("Boot_ENABLED.flag"), b"").unwrap();
        let boot = BootKeyboard::new(dir.path());

        let found = boot.enable_file().unwrap().unwrap();

        assert!(found.ends_with("Boot_ENABLED.flag"));
        boot.disable().unwrap();
        assert!(dir.path().join("README").exists());
    }

    #[test]
    fn test_disable_without_marker_is_ok() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("disabled_by_admin"), b"").unwrap();
        let boot = BootKeyboard::new(dir.path());

        assert!(!boot.is_enabled().unwrap());
        assert!(boot.disable().is_ok());
    }

    #[test]
    fn test_missing_directory_is_disabled() {
        let dir = TempDir::new().unwrap();
        let boot = BootKeyboard::new(dir.path().join("boot_kbd"));

        assert!(!boot.is_enabled().unwrap());
        assert!(boot.disable().is_ok());
    }

    #[test]
    fn test_unreadable_directory_is_an_error() {
        // A regular file where the directory should be
        let dir = TempDir::new().unwrap();
        let not_a_dir = dir.path().join("boot_kbd");
        std::fs::write(&not_a_dir, b"").unwrap();
        let boot = BootKeyboard::new(&not_a_dir);

        let err = boot.disable().unwrap_err();

        assert!(err.to_string().contains("cannot read"));
    }
}
