//! The persisted notification feed.
//!
//! Notices are the player-facing trace of a run: every one survives in
//! the database and can be replayed in order at any time.

use super::GameStore;
use crate::{error::SimResult, types::Day};
use rusqlite::params;

#[derive(Debug, Clone)]
pub struct Notice {
    pub id: i64,
    pub day_count: Day,
    pub message: String,
}

impl GameStore {
    pub fn append_notice(&self, run_id: &str, day_count: Day, message: &str) -> SimResult<()> {
        self.conn().execute(
            "INSERT INTO notice (run_id, day_count, message) VALUES (?1, ?2, ?3)",
            params![run_id, day_count as i64, message],
        )?;
        Ok(())
    }

    pub fn notices_for_run(&self, run_id: &str) -> SimResult<Vec<Notice>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, day_count, message FROM notice
             WHERE run_id = ?1 ORDER BY id ASC",
        )?;
        let notices = stmt
            .query_map(params![run_id], |row| {
                Ok(Notice {
                    id: row.get(0)?,
                    day_count: row.get::<_, i64>(1)? as u64,
                    message: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notices)
    }

    pub fn notice_count(&self, run_id: &str) -> SimResult<u64> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM notice WHERE run_id = ?1",
            params![run_id],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}
