use anyhow::{bail, Context, Result};
use barreasons_core::notice::{self, Notice};
use barreasons_core::{
    KeyValuePersistence, KeyValueStore, PersistHook, ReasonId, ReasonListStore,
    SqliteKeyValueStore,
};
use log::info;
use std::io::Write;
use std::path::{Path, PathBuf};

const DB_FILE_NAME: &str = "barreasons.sqlite3";

/// One list operation requested on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add(String),
    Delete(String),
    Rename { id: String, text: String },
    Up(usize),
    Down(usize),
    Reset,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Add(_) => "add",
            Self::Delete(_) => "delete",
            Self::Rename { .. } => "rename",
            Self::Up(_) => "up",
            Self::Down(_) => "down",
            Self::Reset => "reset",
        }
    }
}

pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DB_FILE_NAME)
}

/// Opens the list at `db_path`, applies `command`, and prints the result.
///
/// # Errors
/// - Database open/read failures.
/// - Blank input, unknown rename target, or a failed write-through.
pub fn run(db_path: &Path, command: Command, out: &mut impl Write) -> Result<()> {
    let kv = SqliteKeyValueStore::open(db_path)
        .with_context(|| format!("failed to open `{}`", db_path.display()))?;
    execute(KeyValuePersistence::new(kv), command, out)
}

/// Hydrates from `persistence`, applies `command`, and prints the result.
///
/// A write-through failure fails the command even though the list changed
/// in memory.
pub fn execute<S: KeyValueStore>(
    persistence: KeyValuePersistence<S>,
    command: Command,
    out: &mut impl Write,
) -> Result<()> {
    let hydration = persistence.load().context("failed to load reasons")?;
    let mut store = ReasonListStore::new(hydration.reasons, persistence);

    info!("event=cli_run module=cli status=start command={}", command.name());
    let shown = apply(&mut store, command)?;
    if let Some(err) = store.persistence().last_error() {
        bail!("failed to save reasons: {err}");
    }
    if let Some(shown) = shown {
        writeln!(out, "{}", shown.message)?;
    }
    print_list(&store, out)
}

fn apply<P: PersistHook>(store: &mut ReasonListStore<P>, command: Command) -> Result<Option<Notice>> {
    let shown = match command {
        Command::List => None,
        Command::Add(text) => {
            let outcome = store.add(&text);
            Some(notice::add_notice(&outcome))
        }
        Command::Delete(id) => {
            store.delete(&ReasonId::new(id));
            Some(notice::delete_notice())
        }
        Command::Rename { id, text } => {
            let id = ReasonId::new(id);
            if !store.begin_edit(&id) {
                bail!("reason not found: {id}");
            }
            store.set_edit_buffer(text);
            let outcome = store.commit_edit();
            Some(notice::commit_notice(&outcome))
        }
        Command::Up(index) => {
            store.move_up(index);
            None
        }
        Command::Down(index) => {
            store.move_down(index);
            None
        }
        Command::Reset => {
            store.reset_to_seed();
            None
        }
    };

    match shown {
        Some(shown) if shown.is_error() => bail!("{}", shown.message),
        other => Ok(other),
    }
}

fn print_list<P: PersistHook>(store: &ReasonListStore<P>, out: &mut impl Write) -> Result<()> {
    if store.is_empty() {
        writeln!(out, "No reasons added yet.")?;
        return Ok(());
    }
    for (index, reason) in store.reasons().iter().enumerate() {
        writeln!(out, "{index:>3}. {}  [{}]", reason.text, reason.id)?;
    }
    Ok(())
}
