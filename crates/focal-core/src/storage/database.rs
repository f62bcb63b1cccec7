//! SQLite-based session storage.
//!
//! Provides persistent storage for:
//! - Finished sessions (completed, cancelled, or skipped)
//! - Session statistics (daily and all-time)
//! - Key-value store for application state between invocations

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, DatabaseError};
use crate::timer::Phase;

use super::data_dir;

/// How a recorded session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionOutcome {
    Completed,
    Cancelled,
    Skipped,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionOutcome::Completed => "completed",
            SessionOutcome::Cancelled => "cancelled",
            SessionOutcome::Skipped => "skipped",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub session_id: String,
    pub phase: String,
    pub outcome: String,
    pub initial_secs: u64,
    pub accepted_recommendation: bool,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub total_sessions: u64,
    pub completed_sessions: u64,
    pub cancelled_sessions: u64,
    pub skipped_sessions: u64,
    pub total_focus_min: u64,
    pub total_break_min: u64,
    pub accepted_recommendations: u64,
    pub today_sessions: u64,
    pub today_focus_min: u64,
}

/// SQLite database for session storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/focal/focal.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("focal.db");
        Ok(Self::open_at(&path)?)
    }

    /// Open a database at an explicit path.
    pub fn open_at(path: &std::path::Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    session_id  TEXT NOT NULL,
                    phase       TEXT NOT NULL,
                    outcome     TEXT NOT NULL,
                    initial_secs INTEGER NOT NULL,
                    accepted_recommendation INTEGER NOT NULL DEFAULT 0,
                    started_at  TEXT NOT NULL,
                    ended_at    TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_sessions_ended_at ON sessions(ended_at);
                CREATE INDEX IF NOT EXISTS idx_sessions_phase ON sessions(phase);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Record a finished session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    #[allow(clippy::too_many_arguments)]
    pub fn record_session(
        &self,
        session_id: &str,
        phase: Phase,
        outcome: SessionOutcome,
        initial_secs: u64,
        accepted_recommendation: bool,
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> Result<i64, DatabaseError> {
        self.conn.execute(
            "INSERT INTO sessions
                (session_id, phase, outcome, initial_secs, accepted_recommendation, started_at, ended_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                session_id,
                phase.name(),
                outcome.as_str(),
                initial_secs,
                accepted_recommendation,
                started_at.to_rfc3339(),
                ended_at.to_rfc3339(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recently finished sessions, newest first.
    pub fn list_recent(&self, limit: u32) -> Result<Vec<SessionRecord>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, phase, outcome, initial_secs, accepted_recommendation,
                    started_at, ended_at
             FROM sessions
             ORDER BY ended_at DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit], |row| {
            Ok(SessionRecord {
                id: row.get(0)?,
                session_id: row.get(1)?,
                phase: row.get(2)?,
                outcome: row.get(3)?,
                initial_secs: row.get(4)?,
                accepted_recommendation: row.get(5)?,
                started_at: parse_rfc3339(row.get::<_, String>(6)?, 6)?,
                ended_at: parse_rfc3339(row.get::<_, String>(7)?, 7)?,
            })
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn stats_today(&self) -> Result<Stats, DatabaseError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.stats_where("ended_at >= ?1", params![format!("{today}T00:00:00+00:00")])
    }

    pub fn stats_all(&self) -> Result<Stats, DatabaseError> {
        let mut stats = self.stats_where("1=1", params![])?;

        // Today's completed focus work, reported alongside the totals.
        let today = Utc::now().format("%Y-%m-%d").to_string();
        let row = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(initial_secs), 0)
             FROM sessions
             WHERE phase = 'focus' AND outcome = 'completed' AND ended_at >= ?1",
            params![format!("{today}T00:00:00+00:00")],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
        )?;
        stats.today_sessions = row.0;
        stats.today_focus_min = row.1 / 60;

        Ok(stats)
    }

    fn stats_where(
        &self,
        clause: &str,
        args: impl rusqlite::Params,
    ) -> Result<Stats, DatabaseError> {
        let sql = format!(
            "SELECT phase, outcome, COUNT(*), COALESCE(SUM(initial_secs), 0),
                    COALESCE(SUM(accepted_recommendation), 0)
             FROM sessions
             WHERE {clause}
             GROUP BY phase, outcome"
        );
        let mut stmt = self.conn.prepare(&sql)?;

        let mut stats = Stats::default();
        let rows = stmt.query_map(args, |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, u64>(2)?,
                row.get::<_, u64>(3)?,
                row.get::<_, u64>(4)?,
            ))
        })?;

        for row in rows {
            let (phase, outcome, count, secs, accepted) = row?;
            stats.total_sessions += count;
            stats.accepted_recommendations += accepted;
            match outcome.as_str() {
                "completed" => {
                    stats.completed_sessions += count;
                    match phase.as_str() {
                        "focus" => {
                            stats.total_focus_min += secs / 60;
                            stats.today_sessions += count;
                            stats.today_focus_min += secs / 60;
                        }
                        "break" => stats.total_break_min += secs / 60,
                        _ => {}
                    }
                }
                "cancelled" => stats.cancelled_sessions += count,
                "skipped" => stats.skipped_sessions += count,
                _ => {}
            }
        }
        Ok(stats)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, DatabaseError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Delete a value from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

fn parse_rfc3339(raw: String, column: usize) -> Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn records_and_lists_sessions() {
        let db = Database::open_memory().unwrap();
        let started = Utc::now();

        db.record_session(
            "s-1",
            Phase::Focus,
            SessionOutcome::Completed,
            1500,
            true,
            started,
            started + Duration::seconds(1500),
        )
        .unwrap();

        let records = db.list_recent(10).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].session_id, "s-1");
        assert_eq!(records[0].phase, "focus");
        assert_eq!(records[0].outcome, "completed");
        assert!(records[0].accepted_recommendation);
        assert_eq!(records[0].started_at, started);
    }

    #[test]
    fn stats_aggregate_by_phase_and_outcome() {
        let db = Database::open_memory().unwrap();
        let t = Utc::now();

        db.record_session("s-1", Phase::Focus, SessionOutcome::Completed, 1500, false, t, t)
            .unwrap();
        db.record_session("s-2", Phase::Break, SessionOutcome::Completed, 300, false, t, t)
            .unwrap();
        db.record_session("s-3", Phase::Focus, SessionOutcome::Cancelled, 1500, false, t, t)
            .unwrap();
        db.record_session("s-4", Phase::Focus, SessionOutcome::Skipped, 900, true, t, t)
            .unwrap();

        let stats = db.stats_all().unwrap();
        assert_eq!(stats.total_sessions, 4);
        assert_eq!(stats.completed_sessions, 2);
        assert_eq!(stats.cancelled_sessions, 1);
        assert_eq!(stats.skipped_sessions, 1);
        assert_eq!(stats.total_focus_min, 25);
        assert_eq!(stats.total_break_min, 5);
        assert_eq!(stats.accepted_recommendations, 1);
        assert_eq!(stats.today_sessions, 1);
        assert_eq!(stats.today_focus_min, 25);
    }

    #[test]
    fn reopening_a_file_backed_database_keeps_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("focal.db");
        let t = Utc::now();

        {
            let db = Database::open_at(&path).unwrap();
            db.record_session("s-1", Phase::Focus, SessionOutcome::Completed, 1500, false, t, t)
                .unwrap();
            db.kv_set("focus_store", "{}").unwrap();
        }

        let db = Database::open_at(&path).unwrap();
        assert_eq!(db.list_recent(5).unwrap().len(), 1);
        assert_eq!(db.kv_get("focus_store").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);

        db.kv_set("store", "{}").unwrap();
        assert_eq!(db.kv_get("store").unwrap().as_deref(), Some("{}"));

        db.kv_set("store", "{\"v\":2}").unwrap();
        assert_eq!(db.kv_get("store").unwrap().as_deref(), Some("{\"v\":2}"));

        db.kv_delete("store").unwrap();
        assert_eq!(db.kv_get("store").unwrap(), None);
    }
}
