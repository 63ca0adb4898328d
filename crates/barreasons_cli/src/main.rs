//! Terminal front end for the reason list.
//!
//! # Responsibility
//! - Map one invocation to one list operation against a SQLite slot.
//! - Print the resulting notice and list.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Manage the reasons bartenders pick when cancelling an order",
    long_about = None
)]
struct Cli {
    /// SQLite database holding the list.
    #[arg(long, env = "BARREASONS_DB_PATH", global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files; logging is off when unset.
    #[arg(long, global = true)]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error).
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the reasons in display order.
    List,
    /// Append a new reason.
    Add { text: String },
    /// Remove a reason by id.
    Delete { id: String },
    /// Replace the text of a reason.
    Rename { id: String, text: String },
    /// Move the reason at INDEX (0-based) one place up.
    Up { index: usize },
    /// Move the reason at INDEX (0-based) one place down.
    Down { index: usize },
    /// Replace the list with the example reasons.
    Reset,
    /// Check core linkage.
    Ping,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| barreasons_core::default_log_level());
        barreasons_core::init_logging(level, log_dir)
            .map_err(anyhow::Error::msg)
            .context("failed to initialize logging")?;
    }

    let command = match cli.command {
        Commands::Ping => {
            println!("barreasons_core ping={}", barreasons_core::ping());
            println!("barreasons_core version={}", barreasons_core::core_version());
            return Ok(());
        }
        Commands::List => commands::Command::List,
        Commands::Add { text } => commands::Command::Add(text),
        Commands::Delete { id } => commands::Command::Delete(id),
        Commands::Rename { id, text } => commands::Command::Rename { id, text },
        Commands::Up { index } => commands::Command::Up(index),
        Commands::Down { index } => commands::Command::Down(index),
        Commands::Reset => commands::Command::Reset,
    };

    let db_path = cli.db.unwrap_or_else(commands::default_db_path);
    let stdout = std::io::stdout();
    commands::run(&db_path, command, &mut stdout.lock())
}
