//! Persistence contracts for notes and their implementations.
//!
//! # Responsibility
//! - Define the `NoteRepository` contract the store is written against.
//! - Keep SQL inside `note_repo`; nothing above this layer sees rusqlite.
//!
//! # Invariants
//! - Every implementation assigns strictly increasing, never reused ids.
//! - Every implementation lists notes `created_at DESC, id DESC`.
//! - Deleting a missing id is a no-op, never an error.

pub mod memory_repo;
pub mod note_repo;
