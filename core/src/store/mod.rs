//! SQLite persistence layer.
//!
//! RULE: Only the store talks to the database.
//! Subsystems and action handlers call store methods — they never
//! execute SQL directly.

use crate::{error::SimResult, event::EventLogEntry, types::Day};
use rusqlite::{params, Connection, OptionalExtension};

mod notice;
mod state_doc;

pub use notice::Notice;

pub struct GameStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl GameStore {
    pub fn open(path: &str) -> SimResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> SimResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database (isolated).
    /// For file-based databases, this opens the same file.
    pub fn reopen(&self) -> SimResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> SimResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    // ── Run ────────────────────────────────────────────────────

    pub fn insert_run(&self, run_id: &str, seed: u64, version: &str) -> SimResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO run (run_id, seed, version, started_at, last_played_at)
             VALUES (?1, ?2, ?3, ?4, ?4)",
            params![run_id, seed as i64, version, now],
        )?;
        Ok(())
    }

    pub fn run_exists(&self, run_id: &str) -> SimResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT run_id FROM run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn run_seed(&self, run_id: &str) -> SimResult<u64> {
        let seed: Option<i64> = self
            .conn
            .query_row(
                "SELECT seed FROM run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        seed.map(|s| s as u64)
            .ok_or(crate::error::SimError::RunNotInitialized)
    }

    /// Stamp the run as played right now.
    pub fn touch_run(&self, run_id: &str) -> SimResult<()> {
        let now = chrono::Utc::now().to_rfc3339();
        self.conn.execute(
            "UPDATE run SET last_played_at = ?1 WHERE run_id = ?2",
            params![now, run_id],
        )?;
        Ok(())
    }

    pub fn last_played_at(&self, run_id: &str) -> SimResult<Option<chrono::DateTime<chrono::Utc>>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT last_played_at FROM run WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(raw
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&chrono::Utc)))
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> SimResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (run_id, day_count, subsystem, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.run_id,
                entry.day_count as i64,
                entry.subsystem,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    pub fn events_for_day(&self, run_id: &str, day_count: Day) -> SimResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, run_id, day_count, subsystem, event_type, payload
             FROM event_log WHERE run_id = ?1 AND day_count = ?2
             ORDER BY id ASC",
        )?;
        let entries = stmt
            .query_map(params![run_id, day_count as i64], |row| {
                Ok(EventLogEntry {
                    id: Some(row.get(0)?),
                    run_id: row.get(1)?,
                    day_count: row.get::<_, i64>(2)? as u64,
                    subsystem: row.get(3)?,
                    event_type: row.get(4)?,
                    payload: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, run_id: &str) -> SimResult<u64> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
