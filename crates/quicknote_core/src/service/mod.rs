//! Use-case layer.
//!
//! Callers (CLI, tests) go through `NoteStore`; they never reach the
//! repository or SQLite directly.

pub mod note_store;
