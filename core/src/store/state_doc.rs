//! Persistence for the game state document.
//!
//! One row per run. Saving replaces the previous document whole; there
//! is no partial write and no history (the event log is the history).

use super::GameStore;
use crate::{error::SimResult, state::GameState, types::Day};
use rusqlite::{params, OptionalExtension};

impl GameStore {
    pub fn save_state(&self, run_id: &str, day_count: Day, state: &GameState) -> SimResult<()> {
        let state_json = serde_json::to_string(state)?;
        let now = chrono::Utc::now().to_rfc3339();
        self.conn().execute(
            "INSERT INTO game_state (run_id, day_count, state_json, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(run_id) DO UPDATE SET
                 day_count = excluded.day_count,
                 state_json = excluded.state_json,
                 updated_at = excluded.updated_at",
            params![run_id, day_count as i64, state_json, now],
        )?;
        Ok(())
    }

    /// Load the document for `run_id`. A missing row or an unparsable
    /// document yields a fresh default state rather than an error, so a
    /// damaged save never bricks the run.
    pub fn load_state(&self, run_id: &str) -> SimResult<GameState> {
        let raw: Option<String> = self
            .conn()
            .query_row(
                "SELECT state_json FROM game_state WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(json) => match serde_json::from_str(&json) {
                Ok(state) => Ok(state),
                Err(err) => {
                    log::warn!("state document for {run_id} is unparsable ({err}), starting fresh");
                    Ok(GameState::new_run())
                }
            },
            None => Ok(GameState::new_run()),
        }
    }

    pub fn has_state(&self, run_id: &str) -> SimResult<bool> {
        let found: Option<i64> = self
            .conn()
            .query_row(
                "SELECT day_count FROM game_state WHERE run_id = ?1",
                params![run_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}
