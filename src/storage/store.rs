use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult, Row};
use thiserror::Error;

use crate::calendar::{format_timestamp, parse_timestamp, Event, EventId, NewEvent, TimestampError};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
    #[error("Failed to prepare database location: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Corrupt timestamp in database: {0}")]
    TimestampError(#[from] TimestampError),
    #[error("Database connection lock poisoned")]
    LockPoisoned,
}

const EVENT_COLUMNS: &str =
    "id, title, description, start_at, end_at, all_day, color, location, recurrence_rule";

/// SQLite-backed event table. The connection sits behind a mutex so the
/// store can be shared between request handlers.
pub struct EventStore {
    conn: Mutex<Connection>,
}

struct EventRow {
    id: EventId,
    title: String,
    description: Option<String>,
    start: String,
    end: String,
    all_day: bool,
    color: String,
    location: Option<String>,
    recurrence_rule: Option<String>,
}

impl EventRow {
    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            start: row.get(3)?,
            end: row.get(4)?,
            all_day: row.get(5)?,
            color: row.get(6)?,
            location: row.get(7)?,
            recurrence_rule: row.get(8)?,
        })
    }

    fn into_event(self) -> Result<Event, StoreError> {
        Ok(Event {
            id: self.id,
            title: self.title,
            description: self.description,
            start: parse_timestamp(&self.start)?,
            end: parse_timestamp(&self.end)?,
            all_day: self.all_day,
            color: self.color,
            location: self.location,
            recurrence_rule: self.recurrence_rule,
        })
    }
}

impl EventStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn: Mutex::new(conn) }
    }

    /// Opens (creating if needed) the database file and its schema.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let store = Self::new(Connection::open(path)?);
        store.initialize()?;
        tracing::info!("Opened event database at {}", path.display());
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self::new(Connection::open_in_memory()?);
        store.initialize()?;
        Ok(store)
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    pub fn initialize(&self) -> Result<(), StoreError> {
        self.connection()?.execute(
            "CREATE TABLE IF NOT EXISTS events (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                description TEXT,
                start_at TEXT NOT NULL,
                end_at TEXT NOT NULL,
                all_day INTEGER NOT NULL DEFAULT 0,
                color TEXT NOT NULL DEFAULT '#4285f4',
                location TEXT,
                recurrence_rule TEXT
            )",
            [],
        )?;
        Ok(())
    }

    pub fn insert_event(&self, new_event: NewEvent) -> Result<Event, StoreError> {
        let conn = self.connection()?;
        conn.execute(
            "INSERT INTO events (title, description, start_at, end_at, all_day, color, location, recurrence_rule)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                &new_event.title,
                &new_event.description,
                format_timestamp(&new_event.start),
                format_timestamp(&new_event.end),
                new_event.all_day,
                &new_event.color,
                &new_event.location,
                &new_event.recurrence_rule,
            ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(new_event.into_event(id))
    }

    pub fn load_event(&self, id: EventId) -> Result<Option<Event>, StoreError> {
        let conn = self.connection()?;
        let row = conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?1"),
                [id],
                EventRow::from_row,
            )
            .optional()?;
        row.map(EventRow::into_event).transpose()
    }

    pub fn find_by_title(&self, title: &str) -> Result<Option<Event>, StoreError> {
        let conn = self.connection()?;
        let row = conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE title = ?1 ORDER BY id LIMIT 1"),
                [title],
                EventRow::from_row,
            )
            .optional()?;
        row.map(EventRow::into_event).transpose()
    }

    /// Every stored event in insertion order.
    pub fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(&format!("SELECT {EVENT_COLUMNS} FROM events ORDER BY id"))?;
        let rows = stmt.query_map([], EventRow::from_row)?;

        let mut events = Vec::new();
        for row in rows {
            events.push(row?.into_event()?);
        }
        Ok(events)
    }

    /// Overwrites the stored row for `event.id`. Returns false when no such row exists.
    pub fn save_event(&self, event: &Event) -> Result<bool, StoreError> {
        let changed = self.connection()?.execute(
            "UPDATE events
             SET title = ?2, description = ?3, start_at = ?4, end_at = ?5,
                 all_day = ?6, color = ?7, location = ?8, recurrence_rule = ?9
             WHERE id = ?1",
            params![
                event.id,
                &event.title,
                &event.description,
                format_timestamp(&event.start),
                format_timestamp(&event.end),
                event.all_day,
                &event.color,
                &event.location,
                &event.recurrence_rule,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn delete_event(&self, id: EventId) -> Result<bool, StoreError> {
        let deleted = self.connection()?.execute("DELETE FROM events WHERE id = ?1", [id])?;
        Ok(deleted > 0)
    }

    pub fn count_events(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .connection()?
            .query_row("SELECT COUNT(*) FROM events", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn table_exists(&self, table_name: &str) -> bool {
        let Ok(conn) = self.connection() else {
            return false;
        };
        let result: SqliteResult<i32> = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1",
            [table_name],
            |row| row.get(0),
        );
        result.unwrap_or(0) > 0
    }
}
