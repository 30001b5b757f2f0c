//! Logging setup: a plain-text log under the XDG state dir, or stderr.
//!
//! `RUST_LOG` overrides the default filter either way.

use anyhow::{Context, Result};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,kfetch=debug,kfetch_core=debug";
const LOG_FILE_NAME: &str = "kfetch.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// `$XDG_STATE_HOME/kfetch/kfetch.log`, with the directory created.
pub fn log_path() -> Result<PathBuf> {
    let dirs = xdg::BaseDirectories::with_prefix("kfetch")?;
    let path = dirs
        .place_state_file(LOG_FILE_NAME)
        .context("failed to create kfetch state directory")?;
    Ok(path)
}

fn open_append(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))
}

/// Installs the global subscriber writing to the state log file.
/// Fails if the file cannot be opened or a subscriber is already set; the
/// caller then falls back to `init_logging_stderr`.
pub fn init_logging() -> Result<()> {
    let path = log_path()?;
    let file = open_append(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    tracing::info!("kfetch logging to {}", path.display());
    Ok(())
}

/// Installs a stderr subscriber. A subscriber that is already set is left alone.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
