//! Note repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/list/delete over the persisted `notes` table.
//! - Own the SQLite connection for the lifetime of the repository.
//!
//! # Invariants
//! - Inserts run in a transaction and are read back before commit, so a
//!   failed create never leaves a partial row behind.
//! - Read paths reject invalid persisted state instead of masking it.
//! - The connection is released when the repository is dropped or closed.

use crate::db::migrations::{current_version, latest_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::note::{is_blank_content, Note, NoteId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const NOTE_SELECT_SQL: &str = "SELECT id, content, created_at FROM notes";
const REQUIRED_NOTE_COLUMNS: [&str; 3] = ["id", "content", "created_at"];

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure of the persistence mechanism to complete a read or write.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    InvalidData(String),
    /// Backend refused the operation (used by non-SQLite backends).
    Unavailable(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted note data: {message}"),
            Self::Unavailable(message) => write!(f, "note storage unavailable: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "missing required table `{table}`"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "missing required column `{table}.{column}`")
            }
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for note persistence.
pub trait NoteRepository {
    /// Inserts one note and returns it as persisted.
    fn create_note(&mut self, content: &str) -> StorageResult<Note>;
    /// Returns every note, newest first.
    fn list_notes(&self) -> StorageResult<Vec<Note>>;
    /// Removes one note. Returns `false` when no row had that id.
    fn delete_note(&mut self, id: NoteId) -> StorageResult<bool>;
}

/// SQLite-backed note repository owning its connection.
#[derive(Debug)]
pub struct SqliteNoteRepository {
    conn: Connection,
}

impl SqliteNoteRepository {
    /// Opens the database file at `path`, bootstrapping the schema if needed.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Wraps an already bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `user_version` is not the latest.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `notes`
    ///   table does not have the expected shape.
    pub fn try_new(conn: Connection) -> StorageResult<Self> {
        ensure_connection_ready(&conn)?;
        Ok(Self { conn })
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Closes the connection, surfacing errors that `Drop` would swallow.
    pub fn close(self) -> StorageResult<()> {
        self.conn.close().map_err(|(_, err)| err.into())
    }
}

impl NoteRepository for SqliteNoteRepository {
    fn create_note(&mut self, content: &str) -> StorageResult<Note> {
        let tx = self.conn.transaction()?;
        tx.execute("INSERT INTO notes (content) VALUES (?1);", [content])?;
        let id = tx.last_insert_rowid();

        let note = {
            let mut stmt = tx.prepare(&format!("{NOTE_SELECT_SQL} WHERE id = ?1;"))?;
            let mut rows = stmt.query([id])?;
            match rows.next()? {
                Some(row) => parse_note_row(row)?,
                None => {
                    return Err(StorageError::InvalidData(format!(
                        "inserted note {id} missing in read-back"
                    )));
                }
            }
        };

        tx.commit()?;
        Ok(note)
    }

    fn list_notes(&self) -> StorageResult<Vec<Note>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTE_SELECT_SQL} ORDER BY created_at DESC, id DESC;"))?;
        let mut rows = stmt.query([])?;
        let mut notes = Vec::new();
        while let Some(row) = rows.next()? {
            notes.push(parse_note_row(row)?);
        }
        Ok(notes)
    }

    fn delete_note(&mut self, id: NoteId) -> StorageResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1;", params![id])?;
        Ok(changed > 0)
    }
}

fn parse_note_row(row: &Row<'_>) -> StorageResult<Note> {
    let id: NoteId = row.get("id")?;
    let content: String = row.get("content")?;
    if is_blank_content(&content) {
        return Err(StorageError::InvalidData(format!(
            "empty content in notes.content for id {id}"
        )));
    }

    Ok(Note {
        id,
        content,
        created_at: row.get("created_at")?,
    })
}

fn ensure_connection_ready(conn: &Connection) -> StorageResult<()> {
    let expected_version = latest_version();
    let actual_version = current_version(conn)?;
    if actual_version != expected_version {
        return Err(StorageError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "notes")? {
        return Err(StorageError::MissingRequiredTable("notes"));
    }

    for column in REQUIRED_NOTE_COLUMNS {
        if !table_has_column(conn, "notes", column)? {
            return Err(StorageError::MissingRequiredColumn {
                table: "notes",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> StorageResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> StorageResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
