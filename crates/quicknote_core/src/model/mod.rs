//! Domain model for persisted notes.
//!
//! # Invariants
//! - A `Note` is identified by a store-assigned integer id that is never
//!   reused, even after the note is deleted.
//! - Notes are immutable after creation; deletion is a hard delete.

pub mod note;
