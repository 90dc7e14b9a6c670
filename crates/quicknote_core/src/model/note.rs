//! Note domain record.

use serde::{Deserialize, Serialize};

/// Store-assigned note identity.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = i64;

/// One persisted note as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Assigned on insert, strictly increasing, never reused.
    pub id: NoteId,
    /// Note body exactly as submitted.
    pub content: String,
    /// Insert time in Unix epoch milliseconds. Never changes.
    pub created_at: i64,
}

/// Returns whether `content` carries at least one non-whitespace character.
///
/// Both the store and the presentation layer gate note creation on this.
pub fn is_blank_content(content: &str) -> bool {
    content.trim().is_empty()
}
