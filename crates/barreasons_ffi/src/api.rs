//! FFI use-case API for the reason manager screen.
//!
//! # Responsibility
//! - Expose one opaque session object owning the reason list store.
//! - Translate store outcomes into plain envelopes with notice text.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every response carries the post-operation list so the view never
//!   keeps its own copy.

use barreasons_core::notice::{self, Notice};
use barreasons_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    EditState, KeyValuePersistence, ReasonId, ReasonListStore, SqliteKeyValueStore,
};
use log::info;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

const DB_PATH_ENV: &str = "BARREASONS_DB_PATH";
const DB_FILE_NAME: &str = "barreasons.sqlite3";

type SessionStore = ReasonListStore<KeyValuePersistence<SqliteKeyValueStore>>;

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One row of the reason list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonItem {
    pub id: String,
    pub text: String,
}

/// Everything the view needs to render the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonListView {
    /// Reasons in display order.
    pub items: Vec<ReasonItem>,
    /// Id of the row being renamed, if any.
    pub editing_id: Option<String>,
    /// Draft text of the row being renamed.
    pub edit_buffer: Option<String>,
}

/// Outcome envelope for operations that raise a notice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReasonActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Id of the added/updated reason.
    pub reason_id: Option<String>,
    /// Notice text for the toast.
    pub message: String,
    /// List after the operation.
    pub list: ReasonListView,
}

/// Reason manager session bound to one database file.
#[flutter_rust_bridge::frb(opaque)]
pub struct ReasonSession {
    store: Mutex<SessionStore>,
    db_path: PathBuf,
}

impl ReasonSession {
    /// Opens the database and hydrates the list.
    ///
    /// `db_path` falls back to `BARREASONS_DB_PATH`, then to a file in the
    /// system temp directory.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open(db_path: Option<String>) -> Result<ReasonSession, String> {
        let db_path = resolve_db_path(db_path);
        let kv = SqliteKeyValueStore::open(&db_path)
            .map_err(|err| format!("reason DB open failed: {err}"))?;
        let persistence = KeyValuePersistence::new(kv);
        let hydration = persistence
            .load()
            .map_err(|err| format!("reason list load failed: {err}"))?;
        info!(
            "event=session_open module=ffi status=ok count={}",
            hydration.reasons.len()
        );
        Ok(Self {
            store: Mutex::new(ReasonListStore::new(hydration.reasons, persistence)),
            db_path,
        })
    }

    #[flutter_rust_bridge::frb(sync, getter)]
    pub fn db_path(&self) -> String {
        self.db_path.display().to_string()
    }

    /// Current list and edit state.
    #[flutter_rust_bridge::frb(sync)]
    pub fn snapshot(&self) -> ReasonListView {
        to_view(&self.lock())
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn add(&self, text: String) -> ReasonActionResponse {
        let mut store = self.lock();
        let outcome = store.add(&text);
        let shown = notice::add_notice(&outcome);
        respond(&store, shown, outcome.ok())
    }

    /// Deletes by id; unknown ids still report success.
    #[flutter_rust_bridge::frb(sync)]
    pub fn delete(&self, id: String) -> ReasonActionResponse {
        let mut store = self.lock();
        store.delete(&ReasonId::new(id));
        respond(&store, notice::delete_notice(), None)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn begin_edit(&self, id: String) -> ReasonListView {
        let mut store = self.lock();
        store.begin_edit(&ReasonId::new(id));
        to_view(&store)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn set_edit_buffer(&self, text: String) -> ReasonListView {
        let mut store = self.lock();
        store.set_edit_buffer(text);
        to_view(&store)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn commit_edit(&self) -> ReasonActionResponse {
        let mut store = self.lock();
        let outcome = store.commit_edit();
        let shown = notice::commit_notice(&outcome);
        respond(&store, shown, outcome.ok().flatten())
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn cancel_edit(&self) -> ReasonListView {
        let mut store = self.lock();
        store.cancel_edit();
        to_view(&store)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn move_up(&self, index: u32) -> ReasonListView {
        let mut store = self.lock();
        store.move_up(usize::try_from(index).unwrap_or(usize::MAX));
        to_view(&store)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn move_down(&self, index: u32) -> ReasonListView {
        let mut store = self.lock();
        store.move_down(usize::try_from(index).unwrap_or(usize::MAX));
        to_view(&store)
    }

    /// Last write-through failure, if the most recent write failed.
    #[flutter_rust_bridge::frb(sync)]
    pub fn persist_error(&self) -> Option<String> {
        self.lock()
            .persistence()
            .last_error()
            .map(|err| err.to_string())
    }

    fn lock(&self) -> MutexGuard<'_, SessionStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn resolve_db_path(explicit: Option<String>) -> PathBuf {
    let from_env = std::env::var(DB_PATH_ENV).ok();
    [explicit, from_env]
        .into_iter()
        .flatten()
        .map(|raw| raw.trim().to_string())
        .find(|raw| !raw.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join(DB_FILE_NAME))
}

fn to_view(store: &SessionStore) -> ReasonListView {
    let items = store
        .reasons()
        .iter()
        .map(|reason| ReasonItem {
            id: reason.id.to_string(),
            text: reason.text.clone(),
        })
        .collect();
    let (editing_id, edit_buffer) = match store.edit_state() {
        EditState::NoEdit => (None, None),
        EditState::Editing { id, buffer } => (Some(id.to_string()), Some(buffer.clone())),
    };
    ReasonListView {
        items,
        editing_id,
        edit_buffer,
    }
}

fn respond(store: &SessionStore, shown: Notice, reason_id: Option<ReasonId>) -> ReasonActionResponse {
    ReasonActionResponse {
        ok: !shown.is_error(),
        reason_id: reason_id.map(|id| id.to_string()),
        message: shown.message.to_string(),
        list: to_view(store),
    }
}
