//! Note Store: the create/list/delete surface callers depend on.
//!
//! # Responsibility
//! - Expose the three note operations over any `NoteRepository`.
//! - Gate creation on non-blank content before storage is touched.
//! - Emit metadata-only events per operation (never note content).
//!
//! # Invariants
//! - The store never bypasses repository persistence contracts.
//! - `StorageError` is propagated to the caller unchanged; nothing is retried.
//! - Deleting a missing id is a successful no-op.

use crate::model::note::{is_blank_content, Note, NoteId};
use crate::repo::note_repo::{NoteRepository, StorageError, StorageResult};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Error returned by `NoteStore::create`.
#[derive(Debug)]
pub enum NoteStoreError {
    /// Content was empty or whitespace only.
    EmptyContent,
    /// Persistence-layer failure.
    Storage(StorageError),
}

impl Display for NoteStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "note content cannot be empty"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for NoteStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyContent => None,
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<StorageError> for NoteStoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Note store owning its repository handle.
pub struct NoteStore<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteStore<R> {
    /// Creates a store over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new note and returns it with its assigned id and timestamp.
    ///
    /// # Errors
    /// - `EmptyContent` for blank input; storage is not touched.
    /// - `Storage` when the write cannot complete. No note is left behind.
    pub fn create(&mut self, content: &str) -> Result<Note, NoteStoreError> {
        if is_blank_content(content) {
            warn!("event=note_create module=store status=rejected reason=empty_content");
            return Err(NoteStoreError::EmptyContent);
        }

        let started_at = Instant::now();
        match self.repo.create_note(content) {
            Ok(note) => {
                info!(
                    "event=note_create module=store status=ok note_id={} content_chars={} duration_ms={}",
                    note.id,
                    note.content.chars().count(),
                    started_at.elapsed().as_millis()
                );
                Ok(note)
            }
            Err(err) => {
                error!(
                    "event=note_create module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }

    /// Returns every note, most recently created first.
    pub fn list(&self) -> StorageResult<Vec<Note>> {
        let started_at = Instant::now();
        match self.repo.list_notes() {
            Ok(notes) => {
                info!(
                    "event=note_list module=store status=ok count={} duration_ms={}",
                    notes.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(notes)
            }
            Err(err) => {
                error!(
                    "event=note_list module=store status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Deletes the note with `id` if it exists.
    ///
    /// Returns whether a note was removed; a missing id yields `Ok(false)`.
    pub fn delete(&mut self, id: NoteId) -> StorageResult<bool> {
        let started_at = Instant::now();
        match self.repo.delete_note(id) {
            Ok(removed) => {
                info!(
                    "event=note_delete module=store status=ok note_id={id} removed={removed} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(removed)
            }
            Err(err) => {
                error!(
                    "event=note_delete module=store status=error note_id={id} duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err)
            }
        }
    }

    /// Borrows the repository.
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Consumes the store and hands back the repository, e.g. to close it.
    pub fn into_inner(self) -> R {
        self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::{NoteStore, NoteStoreError};
    use crate::repo::memory_repo::InMemoryNoteRepository;

    #[test]
    fn create_rejects_blank_content_without_touching_storage() {
        let mut repo = InMemoryNoteRepository::new();
        repo.fail_next_write("must not be reached");
        let mut store = NoteStore::new(repo);

        let err = store.create(" \n\t").unwrap_err();
        assert!(matches!(err, NoteStoreError::EmptyContent));

        // The armed failure is still pending, so the repository was never called.
        let err = store.create("real note").unwrap_err();
        assert!(matches!(err, NoteStoreError::Storage(_)));
    }

    #[test]
    fn storage_failure_on_create_propagates_and_leaves_no_note() {
        let mut repo = InMemoryNoteRepository::new();
        repo.fail_next_write("disk unavailable");
        let mut store = NoteStore::new(repo);

        let err = store.create("Buy milk").unwrap_err();
        assert!(err.to_string().contains("disk unavailable"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn read_failure_propagates_from_list() {
        let mut repo = InMemoryNoteRepository::new();
        repo.set_read_failure(Some("corrupt".to_string()));
        let store = NoteStore::new(repo);

        assert!(store.list().is_err());
    }
}
