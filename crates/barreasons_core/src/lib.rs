//! Core domain logic for the bar cancellation reason list.
//! This crate is the single source of truth for list invariants.

pub mod codec;
pub mod db;
pub mod logging;
pub mod model;
pub mod notice;
pub mod service;
pub mod store;

pub use codec::{decode_reasons, encode_reasons, CodecError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::edit::EditState;
pub use model::reason::{seed_reasons, Reason, ReasonId, ReasonValidationError};
pub use notice::{Notice, NoticeLevel};
pub use service::reason_list::{ReasonListError, ReasonListStore};
pub use store::kv::{KeyValueStore, KvError, KvResult, MemoryKeyValueStore};
pub use store::persistence::{
    hydrate_reasons, load_reasons, Hydration, HydrationSource, KeyValuePersistence, PersistError,
    PersistHook, STORAGE_KEY,
};
pub use store::sqlite_kv::SqliteKeyValueStore;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
