//! `quicknote` command-line front end.
//!
//! # Responsibility
//! - Resolve configuration and start logging before touching notes.
//! - Own the store for exactly one command, then close it.

mod app;
mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use log::info;
use quicknote_core::{init_logging, AppConfig, NoteStore, SqliteNoteRepository};
use std::io;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.command == Command::Version {
        return app::print_version(&mut out);
    }

    let config = AppConfig::from_env(cli.config_overrides()).context("resolve configuration")?;
    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(config.log_level, log_dir).context("initialize logging")?;
    }
    info!(
        "event=cli_start module=cli status=ok db_path={}",
        config.db_path.display()
    );

    let repo = SqliteNoteRepository::open(&config.db_path)
        .with_context(|| format!("open note database `{}`", config.db_path.display()))?;
    let mut store = NoteStore::new(repo);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let outcome = app::run_command(&mut store, cli.command, &mut input, &mut out);

    store
        .into_inner()
        .close()
        .context("close note database")?;
    outcome
}
