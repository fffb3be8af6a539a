//! netkey HTTP keyboard server: entry point.
//!
//! This binary runs on a board wired to a host computer as a USB gadget. It
//! serves a small JSON API and turns each request into HID keyboard reports,
//! so the host sees someone typing.
//!
//! # Usage
//!
//! ```text
//! netkey-server [OPTIONS]
//!
//! Options:
//!   --config <PATH>   JSON config file [default: config/netkey.json]
//!   --port   <PORT>   Override network.port from the config file
//!   --board  <BOARD>  Override board ("gadget" or "loopback")
//! ```
//!
//! # Environment variable overrides
//!
//! CLI args take precedence when both are present.
//!
//! | Variable          | Description                          |
//! |-------------------|--------------------------------------|
//! | `NETKEY_CONFIG`   | Config file path                     |
//! | `NETKEY_PORT`     | Listening port                       |
//! | `NETKEY_BOARD`    | HID backend                          |
//! | `RUST_LOG`        | Log filter; wins over `log_level`    |
//!
//! # Exit status
//!
//! `0` after Ctrl+C, `3` after a hard reset (the supervisor should restart
//! the service), `1` on startup errors.

use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use netkey_core::device::recording::RecordingDevice;
use netkey_core::HidDevice;
use netkey_server::application::{AdminAction, HidCommandExecutor, RequestHandler};
use netkey_server::domain::{AppConfig, Board};
use netkey_server::infrastructure::{
    create_router, hard_reset_action, load_config, run_server, AppState, BootKeyboard,
    GadgetDevice, DEFAULT_CONFIG_PATH, HARD_RESET_EXIT_CODE,
};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// HTTP JSON API that types on a host computer through a USB HID gadget.
#[derive(Debug, Parser)]
#[command(
    name = "netkey-server",
    about = "HTTP JSON API that emulates a USB keyboard",
    version
)]
struct Cli {
    /// Path to the JSON configuration file.
    ///
    /// A missing file is not an error: built-in defaults are used.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH, env = "NETKEY_CONFIG")]
    config: PathBuf,

    /// TCP port to listen on, overriding `network.port`.
    #[arg(long, env = "NETKEY_PORT")]
    port: Option<u16>,

    /// HID backend, overriding `board`.
    ///
    /// `gadget` writes to `/dev/hidgN`; `loopback` keeps reports in memory.
    #[arg(long, env = "NETKEY_BOARD")]
    board: Option<String>,
}

impl Cli {
    /// Loads the config file and applies the CLI overrides on top.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting configuration fails [`AppConfig::validate`].
    fn into_app_config(self) -> anyhow::Result<AppConfig> {
        let mut config = load_config(&self.config)
            .with_context(|| format!("failed to load {}", self.config.display()))?;
        if let Some(port) = self.port {
            config.network.port = port;
        }
        if let Some(board) = self.board {
            config.board = board;
        }
        config.validate()?;
        Ok(config)
    }
}

/// `RUST_LOG` wins; otherwise the configured level; otherwise `info`.
fn log_filter(config_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config_level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Opens the HID backend selected by `board`.
fn open_device(board: Board, config: &AppConfig) -> Arc<dyn HidDevice> {
    match board {
        Board::Gadget => {
            info!(
                keyboard = %config.device.keyboard_path.display(),
                mouse = %config.device.mouse_path.display(),
                "using USB gadget HID endpoints"
            );
            Arc::new(GadgetDevice::new(
                &config.device.keyboard_path,
                &config.device.mouse_path,
            ))
        }
        Board::Loopback => {
            warn!("loopback board: reports are kept in memory and never reach a host");
            Arc::new(RecordingDevice::new())
        }
    }
}

fn disable_boot_keyboard_action(boot: BootKeyboard) -> AdminAction {
    Arc::new(move || boot.disable())
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// # What happens at startup
///
/// 1. CLI arguments are parsed and the config file is loaded and validated.
/// 2. Logging is initialised from `RUST_LOG` or the config `log_level`.
/// 3. The HID backend is opened and an empty report is sent, so no key is
///    left held from a previous run.
/// 4. A Ctrl+C handler is spawned; it clears the shared `running` flag.
/// 5. [`run_server`] serves requests until `running` is cleared, either by
///    Ctrl+C or by the hard-reset route.
/// 6. All keys are released; a hard reset exits with status 3.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.into_app_config()?;

    // ── Logging setup ─────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(&config.log_level))
        .init();

    let board = config.board()?;
    let addr = config.socket_addr()?;
    info!("netkey starting: board={}, addr={addr}", config.board);

    // ── HID backend and executor ──────────────────────────────────────────────
    let executor = Arc::new(HidCommandExecutor::new(open_device(board, &config)));
    if let Err(e) = executor.release_all().await {
        warn!("initial key release failed (is the gadget configured?): {e}");
    }

    let boot = BootKeyboard::new(&config.device.boot_keyboard_dir);
    match boot.is_enabled() {
        Ok(enabled) => info!(dir = %boot.dir().display(), enabled, "boot keyboard mode"),
        Err(e) => warn!("cannot read {}: {e}", boot.dir().display()),
    }

    // ── Graceful shutdown flag ─────────────────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    let reset_requested = Arc::new(AtomicBool::new(false));
    let running_clone = Arc::clone(&running);

    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, initiating graceful shutdown");
                running_clone.store(false, Ordering::Relaxed);
            }
            Err(e) => {
                tracing::error!("failed to listen for Ctrl+C signal: {e}");
            }
        }
    });

    // ── HTTP server ────────────────────────────────────────────────────────────
    let state = AppState::new(
        RequestHandler::new(Arc::clone(&executor)),
        disable_boot_keyboard_action(boot),
        hard_reset_action(Arc::clone(&running), Arc::clone(&reset_requested)),
    );
    let app = create_router(&config, state);
    run_server(addr, app, running).await?;

    if let Err(e) = executor.release_all().await {
        warn!("key release on shutdown failed: {e}");
    }

    if reset_requested.load(Ordering::SeqCst) {
        info!("exiting with status {HARD_RESET_EXIT_CODE} for restart");
        std::process::exit(HARD_RESET_EXIT_CODE);
    }

    info!("netkey stopped");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_defaults() {
        // Arrange: parse with no arguments (all defaults apply)
        let cli = Cli::parse_from(["netkey-server"]);

        // Assert
        assert_eq!(cli.config, PathBuf::from("config/netkey.json"));
        assert_eq!(cli.port, None);
        assert_eq!(cli.board, None);
    }

    #[test]
    fn test_cli_overrides_parse() {
        let cli = Cli::parse_from([
            "netkey-server",
            "--config",
            "/etc/netkey.json",
            "--port",
            "8080",
            "--board",
            "loopback",
        ]);

        assert_eq!(cli.config, PathBuf::from("/etc/netkey.json"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.board.as_deref(), Some("loopback"));
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        // Arrange
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            config: dir.path().join("netkey.json"),
            port: None,
            board: None,
        };

        // Act
        let config = cli.into_app_config().unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_cli_overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("netkey.json");
        std::fs::write(&path, r#"{ "board": "gadget", "network": { "port": 81 } }"#).unwrap();
        let cli = Cli {
            config: path,
            port: Some(8080),
            board: Some("loopback".to_string()),
        };

        let config = cli.into_app_config().unwrap();

        assert_eq!(config.network.port, 8080);
        assert_eq!(config.board().unwrap(), Board::Loopback);
    }

    #[test]
    fn test_unsupported_board_is_rejected() {
        let dir = TempDir::new().unwrap();
        let cli = Cli {
            config: dir.path().join("netkey.json"),
            port: None,
            board: Some("wiznet5k".to_string()),
        };

        let err = cli.into_app_config().unwrap_err();

        assert!(format!("{err:#}").contains("Board wiznet5k is not supported."));
    }

    #[test]
    fn test_loopback_device_accepts_reports() {
        let config = AppConfig::default();
        let device = open_device(Board::Loopback, &config);

        assert!(device
            .send_keyboard_report(&netkey_core::KeyboardReport::new())
            .is_ok());
    }
}
