//! Presentation layer over the note store.
//!
//! # Responsibility
//! - Collect note text, reject blank input before calling the store.
//! - Ask for confirmation before deleting.
//! - Render whatever the store returns; hold no note state of its own.

use crate::cli::Command;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use quicknote_core::{core_version, is_blank_content, Note, NoteId, NoteRepository, NoteStore};
use std::io::{BufRead, Read, Write};

const EMPTY_INPUT_MESSAGE: &str = "Please enter a note before adding!";

/// Runs one parsed command against `store`, reading prompts from `input`
/// and writing all user-facing output to `out`.
pub fn run_command<R: NoteRepository>(
    store: &mut NoteStore<R>,
    command: Command,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add { text } => add_note(store, text, input, out),
        Command::List { json } => list_notes(store, json, out),
        Command::Delete { id, yes } => delete_note(store, id, yes, input, out),
        Command::Version => print_version(out),
    }
}

pub fn print_version(out: &mut impl Write) -> Result<()> {
    writeln!(out, "quicknote_cli version={}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "quicknote_core version={}", core_version())?;
    Ok(())
}

fn add_note<R: NoteRepository>(
    store: &mut NoteStore<R>,
    words: Vec<String>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let raw = if words.is_empty() {
        let mut buffer = String::new();
        input
            .read_to_string(&mut buffer)
            .context("read note from stdin")?;
        buffer
    } else {
        words.join(" ")
    };

    let content = raw.trim();
    if is_blank_content(content) {
        bail!(EMPTY_INPUT_MESSAGE);
    }

    let note = store.create(content).context("Error adding note")?;
    writeln!(out, "Note added successfully! (#{})", note.id)?;
    Ok(())
}

fn list_notes<R: NoteRepository>(
    store: &NoteStore<R>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let notes = store.list().context("Error loading notes")?;

    if json {
        let payload = serde_json::to_string_pretty(&notes).context("serialize notes")?;
        writeln!(out, "{payload}")?;
        return Ok(());
    }

    if notes.is_empty() {
        writeln!(out, "No notes yet.")?;
        return Ok(());
    }

    for (idx, note) in notes.iter().enumerate() {
        if idx > 0 {
            writeln!(out)?;
        }
        render_note(note, out)?;
    }
    Ok(())
}

fn delete_note<R: NoteRepository>(
    store: &mut NoteStore<R>,
    id: NoteId,
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    if !assume_yes && !confirm(&format!("Delete note #{id}?"), input, out)? {
        writeln!(out, "Delete cancelled.")?;
        return Ok(());
    }

    if store.delete(id).context("Error deleting note")? {
        writeln!(out, "Note deleted successfully!")?;
    } else {
        writeln!(out, "No note #{id}; nothing deleted.")?;
    }
    Ok(())
}

fn confirm(question: &str, input: &mut impl BufRead, out: &mut impl Write) -> Result<bool> {
    write!(out, "{question} [y/N] ")?;
    out.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

fn render_note(note: &Note, out: &mut impl Write) -> Result<()> {
    writeln!(out, "#{}  Created: {}", note.id, format_created_at(note.created_at))?;
    for line in note.content.lines() {
        writeln!(out, "    {line}")?;
    }
    Ok(())
}

fn format_created_at(epoch_ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(epoch_ms) {
        Some(utc) => utc
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => epoch_ms.to_string(),
    }
}
