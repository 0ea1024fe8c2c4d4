//! SQLite storage for chapters, the change journal, the audit log and
//! per-user settings.

use crate::models::{BookChapterData, SafetyParams};
use crate::safety::{AuditLog, ChangeLog, ChangeRecord, ChapterStore, UserSettings};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use serde::Serialize;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid setting {key} for {user}: {value}")]
    InvalidSetting {
        user: String,
        key: String,
        value: String,
    },
}

/// Setting keys for the allowed differences.
pub const ALLOWED_DIFFERENCE_CHAPTER: &str = "allowed-difference-chapter";
pub const ALLOWED_DIFFERENCE_VERSE: &str = "allowed-difference-verse";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS chapters (
    bible TEXT NOT NULL,
    book INTEGER NOT NULL,
    chapter INTEGER NOT NULL,
    usfm TEXT NOT NULL,
    PRIMARY KEY (bible, book, chapter)
);
CREATE TABLE IF NOT EXISTS changes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp INTEGER NOT NULL,
    bible TEXT NOT NULL,
    book INTEGER NOT NULL,
    chapter INTEGER NOT NULL,
    user TEXT NOT NULL,
    summary TEXT NOT NULL,
    old_usfm TEXT NOT NULL,
    new_usfm TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS logs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    timestamp INTEGER NOT NULL,
    entry TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS settings (
    user TEXT NOT NULL,
    key TEXT NOT NULL,
    value TEXT NOT NULL,
    PRIMARY KEY (user, key)
);
";

/// A journal entry as read back from the `changes` table.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeEntry {
    pub timestamp: i64,
    pub bible: String,
    pub book: u32,
    pub chapter: u32,
    pub user: String,
    pub summary: String,
    pub old_usfm: String,
    pub new_usfm: String,
}

/// Bibles stored in one SQLite database.
pub struct SqliteBible {
    conn: Connection,
}

impl SqliteBible {
    /// Open or create the database file.
    pub fn open(db_path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        Self::init(Connection::open(db_path)?)
    }

    pub fn open_in_memory() -> Result<Self, DbError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, DbError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Store imported chapters in one transaction, replacing what was there.
    pub fn store_import(&self, bible: &str, chapters: &[BookChapterData]) -> Result<usize, DbError> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO chapters (bible, book, chapter, usfm) VALUES (?1, ?2, ?3, ?4)",
            )?;
            for data in chapters {
                stmt.execute(params![bible, data.book, data.chapter, data.data])?;
            }
        }
        tx.commit()?;
        debug!("Stored {} chapters in {}", chapters.len(), bible);
        Ok(chapters.len())
    }

    /// Chapter numbers stored for a book, in order.
    pub fn chapters(&self, bible: &str, book: u32) -> Result<Vec<u32>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT chapter FROM chapters WHERE bible = ?1 AND book = ?2 ORDER BY chapter")?;
        let rows = stmt.query_map(params![bible, book], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<u32>, _>>()?)
    }

    /// Books stored for a bible, in order.
    pub fn books(&self, bible: &str) -> Result<Vec<u32>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT DISTINCT book FROM chapters WHERE bible = ?1 ORDER BY book")?;
        let rows = stmt.query_map(params![bible], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<u32>, _>>()?)
    }

    /// Audit log entries, oldest first.
    pub fn audit_entries(&self) -> Result<Vec<String>, DbError> {
        let mut stmt = self.conn.prepare("SELECT entry FROM logs ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        Ok(rows.collect::<Result<Vec<String>, _>>()?)
    }

    /// Journal entries for a bible, oldest first.
    pub fn changes(&self, bible: &str) -> Result<Vec<ChangeEntry>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp, bible, book, chapter, user, summary, old_usfm, new_usfm
             FROM changes
             WHERE bible = ?1
             ORDER BY id",
        )?;
        let rows = stmt.query_map(params![bible], |row| {
            Ok(ChangeEntry {
                timestamp: row.get(0)?,
                bible: row.get(1)?,
                book: row.get(2)?,
                chapter: row.get(3)?,
                user: row.get(4)?,
                summary: row.get(5)?,
                old_usfm: row.get(6)?,
                new_usfm: row.get(7)?,
            })
        })?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    pub fn set_setting(&self, user: &str, key: &str, value: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (user, key, value) VALUES (?1, ?2, ?3)",
            params![user, key, value],
        )?;
        Ok(())
    }

    pub fn get_setting(&self, user: &str, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE user = ?1 AND key = ?2",
                params![user, key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn get_percentage(&self, user: &str, key: &str, default: u32) -> Result<u32, DbError> {
        match self.get_setting(user, key)? {
            None => Ok(default),
            Some(value) => match value.trim().parse::<u32>() {
                Ok(percentage) if percentage <= 100 => Ok(percentage),
                _ => Err(DbError::InvalidSetting {
                    user: user.to_string(),
                    key: key.to_string(),
                    value,
                }),
            },
        }
    }
}

fn now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

impl ChapterStore for SqliteBible {
    fn get_chapter(&self, bible: &str, book: u32, chapter: u32) -> Result<String, DbError> {
        let usfm: Option<String> = self
            .conn
            .query_row(
                "SELECT usfm FROM chapters WHERE bible = ?1 AND book = ?2 AND chapter = ?3",
                params![bible, book, chapter],
                |row| row.get(0),
            )
            .optional()?;
        Ok(usfm.unwrap_or_default())
    }

    fn store_chapter(&self, bible: &str, book: u32, chapter: u32, usfm: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO chapters (bible, book, chapter, usfm) VALUES (?1, ?2, ?3, ?4)",
            params![bible, book, chapter, usfm],
        )?;
        Ok(())
    }
}

impl ChangeLog for SqliteBible {
    fn log_change(&self, change: &ChangeRecord<'_>) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO changes (timestamp, bible, book, chapter, user, summary, old_usfm, new_usfm)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                now(),
                change.bible,
                change.book,
                change.chapter,
                change.user,
                change.summary,
                change.old_usfm,
                change.new_usfm
            ],
        )?;
        Ok(())
    }
}

impl AuditLog for SqliteBible {
    fn log(&self, entry: &str) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO logs (timestamp, entry) VALUES (?1, ?2)",
            params![now(), entry],
        )?;
        Ok(())
    }
}

impl UserSettings for SqliteBible {
    fn safety_params(&self, user: &str) -> Result<SafetyParams, DbError> {
        let defaults = SafetyParams::default();
        Ok(SafetyParams {
            allowed_difference_chapter: self.get_percentage(
                user,
                ALLOWED_DIFFERENCE_CHAPTER,
                defaults.allowed_difference_chapter,
            )?,
            allowed_difference_verse: self.get_percentage(
                user,
                ALLOWED_DIFFERENCE_VERSE,
                defaults.allowed_difference_verse,
            )?,
            ..defaults
        })
    }
}
