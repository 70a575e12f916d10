//! SQLite-backed persistence.
//!
//! Two shapes of state:
//! - opaque key-value blobs, one key per collection (backlog, templates,
//!   schedule, settings, horizons) — the core never defines a binary
//!   format for these, they only need to round-trip unchanged;
//! - an append-only `history` table, one row per completed non-break
//!   task, backing the analytics queries.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{DatabaseError, Result};
use crate::horizons::HorizonBoard;
use crate::model::{HistoryRecord, Settings, TaskRecord, Template};
use crate::plan::{Allocation, PlanBoard};

pub const KEY_TASKS: &str = "tasks";
pub const KEY_TEMPLATES: &str = "templates";
pub const KEY_SCHEDULE: &str = "schedule";
pub const KEY_SETTINGS: &str = "settings";
pub const KEY_HORIZONS: &str = "horizons";

/// The slot map and target hours, persisted as one blob.
#[derive(Serialize, Deserialize, Default)]
struct ScheduleBlob {
    slots: BTreeMap<usize, Vec<Allocation>>,
    target_hours: u64,
}

/// SQLite database at `~/.config/sessionflow/sessionflow.db`.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the default database, creating file and schema if needed.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self> {
        let path = data_dir()?.join("sessionflow.db");
        Self::open_at(&path)
    }

    /// Open a database at an explicit path (used by tests).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
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
                );

                CREATE TABLE IF NOT EXISTS history (
                    id           INTEGER PRIMARY KEY AUTOINCREMENT,
                    title        TEXT NOT NULL,
                    duration_min INTEGER NOT NULL,
                    color        TEXT NOT NULL DEFAULT '',
                    completed_at TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_history_completed_at ON history(completed_at);",
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    // ── History ──────────────────────────────────────────────────────

    /// Append one completed-task record. Never mutated or deleted.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn append_history(&self, record: &HistoryRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO history (title, duration_min, color, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                record.title,
                record.duration_min,
                record.color,
                record.completed_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// All history records, oldest first.
    pub fn history(&self) -> Result<Vec<HistoryRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, duration_min, color, completed_at
             FROM history ORDER BY completed_at, id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, u64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            let (title, duration_min, color, completed_at) = row?;
            let completed_at = completed_at
                .parse::<DateTime<Utc>>()
                .unwrap_or_else(|_| Utc::now());
            records.push(HistoryRecord {
                title,
                duration_min,
                color,
                completed_at,
            });
        }
        Ok(records)
    }

    // ── Key-value blobs ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    fn load_blob<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.kv_get(key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(T::default()),
        }
    }

    fn save_blob<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        self.kv_set(key, &serde_json::to_string(value)?)
    }

    // ── Typed collections ────────────────────────────────────────────

    pub fn load_plan(&self) -> Result<PlanBoard> {
        let backlog: Vec<TaskRecord> = self.load_blob(KEY_TASKS)?;
        let templates: Vec<Template> = self.load_blob(KEY_TEMPLATES)?;
        let schedule: Option<ScheduleBlob> = match self.kv_get(KEY_SCHEDULE)? {
            Some(json) => Some(serde_json::from_str(&json)?),
            None => None,
        };

        let mut board = PlanBoard::new();
        board.backlog = backlog;
        board.templates = templates;
        if let Some(schedule) = schedule {
            board.slots = schedule.slots;
            board.set_target_hours(schedule.target_hours);
        }
        Ok(board)
    }

    pub fn save_plan(&self, board: &PlanBoard) -> Result<()> {
        self.save_blob(KEY_TASKS, &board.backlog)?;
        self.save_blob(KEY_TEMPLATES, &board.templates)?;
        self.save_blob(
            KEY_SCHEDULE,
            &ScheduleBlob {
                slots: board.slots.clone(),
                target_hours: board.target_hours,
            },
        )
    }

    pub fn load_settings(&self) -> Result<Settings> {
        self.load_blob(KEY_SETTINGS)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save_blob(KEY_SETTINGS, settings)
    }

    pub fn load_horizons(&self) -> Result<HorizonBoard> {
        self.load_blob(KEY_HORIZONS)
    }

    pub fn save_horizons(&self, horizons: &HorizonBoard) -> Result<()> {
        self.save_blob(KEY_HORIZONS, horizons)
    }
}
