//! SQLite-backed key-value storage.
//!
//! Every persisted value is a JSON blob in a single `kv` table, so the
//! storage contract stays "get/set by fixed string key" and values
//! round-trip exactly.

use std::path::Path;

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::data_dir;
use crate::error::{Result, StorageError};
use crate::profile::Profile;
use crate::settings::Settings;
use crate::stats::WorkStats;
use crate::timer::Session;

/// Fixed keys for the persisted blobs.
pub mod keys {
    pub const PROFILES: &str = "profiles";
    pub const ACTIVE_PROFILE: &str = "active_profile";
    pub const SETTINGS: &str = "settings";
    pub const STATS: &str = "stats";
    pub const SESSION: &str = "session";
}

pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `<data dir>/pomodowork.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("pomodowork.db");
        Self::open_at(&path)
    }

    /// Open the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (tests, throwaway state).
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Get a raw value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(StorageError::from)?;
        match stmt.query_row(params![key], |row| row.get::<_, String>(0)) {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Remove a key. Missing keys are fine.
    pub fn kv_remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(StorageError::from)?;
        Ok(())
    }

    /// Get a JSON blob, `None` when the key is missing.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.kv_get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Store a value as a JSON blob.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.kv_set(key, &raw)
    }

    // ── Typed accessors ──────────────────────────────────────────────

    pub fn settings(&self) -> Result<Settings> {
        Ok(self.get_json(keys::SETTINGS)?.unwrap_or_default())
    }

    pub fn set_settings(&self, settings: &Settings) -> Result<()> {
        self.set_json(keys::SETTINGS, settings)
    }

    pub fn stats(&self) -> Result<WorkStats> {
        Ok(self.get_json(keys::STATS)?.unwrap_or_default())
    }

    pub fn set_stats(&self, stats: &WorkStats) -> Result<()> {
        self.set_json(keys::STATS, stats)
    }

    /// The persisted session snapshot; a missing key is the idle session.
    pub fn session(&self) -> Result<Session> {
        Ok(self.get_json(keys::SESSION)?.unwrap_or_default())
    }

    pub fn set_session(&self, session: &Session) -> Result<()> {
        self.set_json(keys::SESSION, session)
    }

    pub fn profiles(&self) -> Result<Option<Vec<Profile>>> {
        self.get_json(keys::PROFILES)
    }

    pub fn set_profiles(&self, profiles: &[Profile]) -> Result<()> {
        self.set_json(keys::PROFILES, &profiles)
    }

    pub fn active_profile_id(&self) -> Result<Option<String>> {
        self.get_json(keys::ACTIVE_PROFILE)
    }

    pub fn set_active_profile_id(&self, id: &str) -> Result<()> {
        self.set_json(keys::ACTIVE_PROFILE, &id)
    }
}
