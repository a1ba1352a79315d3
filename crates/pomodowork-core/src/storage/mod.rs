//! Persistent storage.
//!
//! A SQLite-backed key-value store holds every persisted blob as JSON: the
//! profile list, the active profile id, the user settings, the accumulated
//! statistics and the session snapshot. Missing keys mean defaults.

mod database;
mod profiles;
mod stats_ledger;

pub use database::{keys, Database};
pub use profiles::ProfileBook;
pub use stats_ledger::StatsLedger;

use std::path::PathBuf;

use crate::error::Result;

/// Returns the data directory, `~/.config/pomodowork/` by default.
///
/// Set POMODOWORK_DATA_DIR to an absolute path to relocate it (tests, dev).
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("POMODOWORK_DATA_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("pomodowork"),
    };
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
