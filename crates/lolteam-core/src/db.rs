// SQLite persistence for the working session and the export log.

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use crate::team::roster::Roster;

/// SQLite-backed store for the in-progress roster (key-value) and a log of
/// written exports.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Key under which the roster and its turn cursor are stored.
    const SESSION_KEY: &'static str = "session";

    /// Open (or create) a SQLite database at `path` and ensure all tables
    /// exist. Pass `":memory:"` for an ephemeral database.
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("failed to open database at {path}"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )
        .context("failed to set database pragmas")?;

        conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS session_state (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS exports (
                id           INTEGER PRIMARY KEY AUTOINCREMENT,
                path         TEXT NOT NULL,
                member_count INTEGER NOT NULL,
                written_at   TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
            );
            ",
        )
        .context("failed to create database schema")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the connection. A poisoned lock still holds a usable
    /// connection, since every write is a single statement or transaction.
    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Persist an arbitrary JSON value under `key`, replacing any previous
    /// value.
    pub fn save_state(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let conn = self.conn();
        let json_str =
            serde_json::to_string(value).context("failed to serialize state value")?;
        conn.execute(
            "INSERT OR REPLACE INTO session_state (key, value) VALUES (?1, ?2)",
            params![key, json_str],
        )
        .context("failed to save state")?;
        Ok(())
    }

    /// Load a previously saved JSON value by `key`.
    pub fn load_state(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT value FROM session_state WHERE key = ?1")
            .context("failed to prepare load_state query")?;

        let mut rows = stmt
            .query_map(params![key], |row| row.get::<_, String>(0))
            .context("failed to query session state")?;

        match rows.next() {
            Some(row_result) => {
                let json_str = row_result.context("failed to read state row")?;
                let value: serde_json::Value = serde_json::from_str(&json_str)
                    .context("failed to deserialize state value")?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// Save the roster (members plus turn cursor) as the current session.
    pub fn save_session(&self, roster: &Roster) -> Result<()> {
        let value = serde_json::to_value(roster).context("failed to serialize roster")?;
        self.save_state(Self::SESSION_KEY, &value)
    }

    /// Load the saved roster, if any. The roster is returned as stored; the
    /// caller decides whether to trust it.
    pub fn load_session(&self) -> Result<Option<Roster>> {
        let Some(value) = self.load_state(Self::SESSION_KEY)? else {
            return Ok(None);
        };
        let roster = serde_json::from_value(value).context("failed to decode saved roster")?;
        Ok(Some(roster))
    }

    /// Drop all session state. The export log is kept.
    pub fn clear_session(&self) -> Result<()> {
        let mut conn = self.conn();
        let tx = conn.transaction().context("failed to begin transaction")?;
        tx.execute("DELETE FROM session_state", [])
            .context("failed to delete session state")?;
        tx.commit().context("failed to commit clear_session")?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Export log
    // ------------------------------------------------------------------

    /// Record that an export file was written.
    pub fn record_export(&self, path: &str, member_count: usize) -> Result<()> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO exports (path, member_count) VALUES (?1, ?2)",
            params![path, member_count as i64],
        )
        .context("failed to record export")?;
        Ok(())
    }

    /// Paths of written exports, most recent first.
    pub fn recent_exports(&self, limit: usize) -> Result<Vec<String>> {
        let conn = self.conn();
        let mut stmt = conn
            .prepare("SELECT path FROM exports ORDER BY id DESC LIMIT ?1")
            .context("failed to prepare recent_exports query")?;
        let paths = stmt
            .query_map(params![limit as i64], |row| row.get::<_, String>(0))
            .context("failed to query exports")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .context("failed to map export rows")?;
        Ok(paths)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
