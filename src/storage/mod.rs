// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Durable key-value storage.
//!
//! The player persists exactly two independent entries: the serialized
//! playlist and the theme preference. Both live in a single SQLite table
//! keyed by name.
//!
//! # Tables
//!
//! * `settings` - One row per stored entry, `key` is the primary key.

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};

use crate::error::PlayerResult;

pub(crate) const PLAYLIST_KEY: &str = "playlist";
pub(crate) const THEME_KEY: &str = "theme";

/// A string-to-string store that survives restarts.
///
/// Writes replace the previous value wholesale; there is no partial update.
pub(crate) trait KeyValueStore {
    fn get(&self, key: &str) -> PlayerResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> PlayerResult<()>;
}

pub(crate) struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens (creating if needed) the settings database at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened, WAL mode cannot be
    /// enabled or the schema cannot be created.
    pub(crate) fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;

        let journal_mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |r| r.get(0))?;
        if journal_mode != "wal" {
            anyhow::bail!(
                "Failed to switch to WAL mode. Current mode: {}",
                journal_mode
            );
        }

        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;

        Self::from_connection(conn).context("Failed to create schema")
    }

    pub(crate) fn from_connection(conn: Connection) -> PlayerResult<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            );",
        )?;

        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> PlayerResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT value FROM settings WHERE key = ?1")?;
        let value = stmt.query_row(params![key], |row| row.get(0)).optional()?;

        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> PlayerResult<()> {
        let mut stmt = self.conn.prepare_cached(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT (key) DO UPDATE SET value = excluded.value",
        )?;
        stmt.execute(params![key, value])?;

        Ok(())
    }
}

/// In-memory store used by tests. Clones share the same entries so a test
/// can keep a handle after giving one away.
#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct MemoryStore {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
    writes: std::rc::Rc<std::cell::Cell<usize>>,
}

#[cfg(test)]
impl MemoryStore {
    pub(crate) fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.borrow_mut().insert(key.to_string(), value.to_string());
        store
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.get()
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PlayerResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PlayerResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Store whose disk is always full. Every read and write fails.
#[cfg(test)]
#[derive(Clone, Copy, Default)]
pub(crate) struct FailingStore;

#[cfg(test)]
impl FailingStore {
    fn error() -> crate::error::PlayerError {
        rusqlite::Error::SqliteFailure(rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_FULL), None).into()
    }
}

#[cfg(test)]
impl KeyValueStore for FailingStore {
    fn get(&self, _key: &str) -> PlayerResult<Option<String>> {
        Err(Self::error())
    }

    fn set(&self, _key: &str, _value: &str) -> PlayerResult<()> {
        Err(Self::error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_memory() -> SqliteStore {
        SqliteStore::from_connection(Connection::open_in_memory().unwrap()).unwrap()
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = in_memory();
        assert_eq!(store.get(PLAYLIST_KEY).unwrap(), None);
    }

    #[test]
    fn set_replaces_previous_value() {
        let store = in_memory();
        store.set(THEME_KEY, "dark").unwrap();
        store.set(THEME_KEY, "light").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn keys_are_independent() {
        let store = in_memory();
        store.set(THEME_KEY, "light").unwrap();
        store.set(PLAYLIST_KEY, "[]").unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(store.get(PLAYLIST_KEY).unwrap().as_deref(), Some("[]"));
    }
}
