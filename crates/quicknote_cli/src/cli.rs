//! Command-line surface.

use clap::{Parser, Subcommand};
use quicknote_core::{ConfigOverrides, NoteId};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "quicknote", version, about = "Keep short notes in a local database")]
pub struct Cli {
    /// Database file (overrides QUICKNOTE_DB_PATH; default ./notes.db).
    #[arg(long, global = true, value_name = "PATH")]
    pub db: Option<PathBuf>,

    /// Absolute directory for rolling log files (overrides QUICKNOTE_LOG_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// trace|debug|info|warn|error (overrides QUICKNOTE_LOG_LEVEL).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Add a note. Reads the note from stdin when no TEXT is given.
    Add {
        /// Note text; multiple words are joined with single spaces.
        text: Vec<String>,
    },
    /// Show all notes, newest first.
    List {
        /// Print notes as a JSON array.
        #[arg(long)]
        json: bool,
    },
    /// Delete a note by id.
    Delete {
        id: NoteId,
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Print core and CLI versions.
    Version,
}

impl Cli {
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            db_path: self.db.clone(),
            log_dir: self.log_dir.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["quicknote", "list", "--json", "--db", "/tmp/n.db"]).unwrap();
        assert_eq!(cli.command, Command::List { json: true });
        assert_eq!(
            cli.config_overrides().db_path,
            Some(PathBuf::from("/tmp/n.db"))
        );
    }

    #[test]
    fn add_collects_all_words() {
        let cli = Cli::try_parse_from(["quicknote", "add", "Buy", "milk"]).unwrap();
        assert_eq!(
            cli.command,
            Command::Add {
                text: vec!["Buy".to_string(), "milk".to_string()]
            }
        );
    }

    #[test]
    fn delete_requires_numeric_id() {
        assert!(Cli::try_parse_from(["quicknote", "delete", "abc"]).is_err());
        let cli = Cli::try_parse_from(["quicknote", "delete", "3", "-y"]).unwrap();
        assert_eq!(cli.command, Command::Delete { id: 3, yes: true });
    }
}
