// src/util/log.rs

//! File-backed tracing setup. Stdout belongs to the terminal UI, so log
//! output goes to `./logs` instead.
use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock};

use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::Level;

pub const LOG_DIR: &str = "./logs";
pub const LOG_FILE: &str = "culture-explorer.log";

pub static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// `DEBUG=true` turns on debug-level output.
pub fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| {
        std::env::var("DEBUG").unwrap_or_default() == "true"
    })
}

/// Installs the global subscriber writing to `<log_dir>/culture-explorer.log`.
/// The file is truncated on every start. Returns the log file path.
pub fn init(log_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let log_dir = log_dir.as_ref();
    create_dir_all(log_dir)?;

    let path = log_dir.join(LOG_FILE);
    let file = File::create(&path)?;

    let level = if debug_enabled() { Level::DEBUG } else { Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_max_level(level)
        .try_init()
        .map_err(|e| eyre!("failed to install log subscriber: {}", e))?;

    Ok(path)
}
