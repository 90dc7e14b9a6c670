//! In-memory note repository.
//!
//! Stand-in for `SqliteNoteRepository` when a caller needs the store contract
//! without a database: presentation tests, and failure-path tests through
//! `fail_next_write`.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, StorageError, StorageResult};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    notes: Vec<Note>,
    last_id: NoteId,
    fail_next_write: Option<String>,
    fail_reads: Option<String>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next `create_note` or `delete_note` fail with
    /// `StorageError::Unavailable` and leave the collection untouched.
    pub fn fail_next_write(&mut self, reason: impl Into<String>) {
        self.fail_next_write = Some(reason.into());
    }

    /// Makes every `list_notes` fail until cleared with `None`.
    pub fn set_read_failure(&mut self, reason: Option<String>) {
        self.fail_reads = reason;
    }

    fn take_write_failure(&mut self) -> StorageResult<()> {
        match self.fail_next_write.take() {
            Some(reason) => Err(StorageError::Unavailable(reason)),
            None => Ok(()),
        }
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn create_note(&mut self, content: &str) -> StorageResult<Note> {
        self.take_write_failure()?;

        self.last_id += 1;
        let note = Note {
            id: self.last_id,
            content: content.to_string(),
            created_at: now_epoch_ms(),
        };
        self.notes.push(note.clone());
        Ok(note)
    }

    fn list_notes(&self) -> StorageResult<Vec<Note>> {
        if let Some(reason) = &self.fail_reads {
            return Err(StorageError::Unavailable(reason.clone()));
        }

        let mut notes = self.notes.clone();
        notes.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(notes)
    }

    fn delete_note(&mut self, id: NoteId) -> StorageResult<bool> {
        self.take_write_failure()?;

        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        Ok(self.notes.len() < before)
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
