//! Bridge between list snapshots and the persisted key-value slot.
//!
//! # Responsibility
//! - Define the hook the list store calls after each successful mutation.
//! - Write full snapshots through to a `KeyValueStore`.
//! - Hydrate the startup list from the slot, seeding when it is empty.
//!
//! # Invariants
//! - A write failure never aborts the caller's mutation; it is logged and
//!   kept in `last_error`.
//! - Hydrated lists have unique ids; later duplicates receive fresh ids.

use crate::codec::{decode_reasons, encode_reasons, CodecError};
use crate::model::reason::{seed_reasons, Reason, ReasonId};
use crate::store::kv::{KeyValueStore, KvError, KvResult};
use log::{debug, error, info, warn};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Key of the slot holding the serialized reason list.
pub const STORAGE_KEY: &str = "bartenderReasons";

/// Side effect invoked with the full list after every successful mutation.
pub trait PersistHook {
    fn persist(&mut self, reasons: &[Reason]);
}

impl<F> PersistHook for F
where
    F: FnMut(&[Reason]),
{
    fn persist(&mut self, reasons: &[Reason]) {
        self(reasons)
    }
}

/// Failure of one write-through attempt.
#[derive(Debug)]
pub enum PersistError {
    Codec(CodecError),
    Kv(KvError),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Codec(err) => write!(f, "{err}"),
            Self::Kv(err) => write!(f, "{err}"),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Codec(err) => Some(err),
            Self::Kv(err) => Some(err),
        }
    }
}

impl From<CodecError> for PersistError {
    fn from(value: CodecError) -> Self {
        Self::Codec(value)
    }
}

impl From<KvError> for PersistError {
    fn from(value: KvError) -> Self {
        Self::Kv(value)
    }
}

/// Persist hook writing encoded snapshots into one slot of a key-value store.
pub struct KeyValuePersistence<S: KeyValueStore> {
    store: S,
    key: String,
    last_error: Option<PersistError>,
}

impl<S: KeyValueStore> KeyValuePersistence<S> {
    /// Writes under [`STORAGE_KEY`].
    pub fn new(store: S) -> Self {
        Self::with_key(store, STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            last_error: None,
        }
    }

    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Error of the most recent write, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&PersistError> {
        self.last_error.as_ref()
    }

    /// Reads the slot and hydrates a list from it.
    pub fn load(&self) -> KvResult<Hydration> {
        load_reasons(&self.store, &self.key)
    }

    /// Encodes and writes one snapshot.
    ///
    /// # Errors
    /// - Returns an error when encoding or the backend write fails.
    pub fn write_snapshot(&mut self, reasons: &[Reason]) -> Result<(), PersistError> {
        let encoded = encode_reasons(reasons)?;
        self.store.write(&self.key, &encoded)?;
        Ok(())
    }
}

impl<S: KeyValueStore> PersistHook for KeyValuePersistence<S> {
    fn persist(&mut self, reasons: &[Reason]) {
        match self.write_snapshot(reasons) {
            Ok(()) => {
                debug!(
                    "event=reasons_persist module=store status=ok count={}",
                    reasons.len()
                );
                self.last_error = None;
            }
            Err(err) => {
                error!(
                    "event=reasons_persist module=store status=error count={} error={}",
                    reasons.len(),
                    err
                );
                self.last_error = Some(err);
            }
        }
    }
}

/// Where a hydrated list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationSource {
    /// Decoded from the stored slot.
    Stored,
    /// Slot absent or empty; seed list used.
    Seeded,
    /// Slot held undecodable data; seed list used.
    Recovered,
}

/// Startup list plus what happened while producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hydration {
    pub reasons: Vec<Reason>,
    pub source: HydrationSource,
    /// Number of duplicate ids replaced with fresh ones.
    pub reassigned_ids: usize,
}

/// Reads `key` from `store` and hydrates a list from it.
///
/// # Errors
/// - Returns backend read errors; decoding problems fall back to the seed.
pub fn load_reasons<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> KvResult<Hydration> {
    let raw = store.read(key)?;
    Ok(hydrate_reasons(raw.as_deref()))
}

/// Builds the startup list from the raw slot content.
///
/// - `None` or `""` yields the seed list.
/// - Undecodable content yields the seed list and a warning.
/// - Decoded content is trusted as-is apart from duplicate ids.
pub fn hydrate_reasons(raw: Option<&str>) -> Hydration {
    let raw = match raw {
        Some(value) if !value.is_empty() => value,
        _ => {
            info!("event=reasons_hydrate module=store status=ok source=seed");
            return Hydration {
                reasons: seed_reasons(),
                source: HydrationSource::Seeded,
                reassigned_ids: 0,
            };
        }
    };

    match decode_reasons(raw) {
        Ok(mut reasons) => {
            let reassigned_ids = dedupe_ids(&mut reasons);
            if reassigned_ids > 0 {
                warn!(
                    "event=reasons_hydrate module=store status=repaired duplicate_ids={reassigned_ids}"
                );
            }
            info!(
                "event=reasons_hydrate module=store status=ok source=stored count={}",
                reasons.len()
            );
            Hydration {
                reasons,
                source: HydrationSource::Stored,
                reassigned_ids,
            }
        }
        Err(err) => {
            warn!(
                "event=reasons_hydrate module=store status=error source=seed error_code=decode_failed error={err}"
            );
            Hydration {
                reasons: seed_reasons(),
                source: HydrationSource::Recovered,
                reassigned_ids: 0,
            }
        }
    }
}

fn dedupe_ids(reasons: &mut [Reason]) -> usize {
    let mut taken: HashSet<ReasonId> = reasons.iter().map(|reason| reason.id.clone()).collect();
    let mut seen = HashSet::with_capacity(reasons.len());
    let mut reassigned = 0;

    for reason in reasons.iter_mut() {
        if seen.insert(reason.id.clone()) {
            continue;
        }
        let fresh = loop {
            let candidate = ReasonId::generate();
            if !taken.contains(&candidate) {
                break candidate;
            }
        };
        taken.insert(fresh.clone());
        seen.insert(fresh.clone());
        reason.id = fresh;
        reassigned += 1;
    }

    reassigned
}

#[cfg(test)]
mod tests {
    use super::{hydrate_reasons, HydrationSource};

    #[test]
    fn missing_and_empty_slots_seed() {
        assert_eq!(hydrate_reasons(None).source, HydrationSource::Seeded);
        let hydrated = hydrate_reasons(Some(""));
        assert_eq!(hydrated.source, HydrationSource::Seeded);
        assert_eq!(hydrated.reasons.len(), 3);
    }

    #[test]
    fn stored_empty_array_stays_empty() {
        let hydrated = hydrate_reasons(Some("[]"));
        assert_eq!(hydrated.source, HydrationSource::Stored);
        assert!(hydrated.reasons.is_empty());
    }

    #[test]
    fn garbage_falls_back_to_seed() {
        let hydrated = hydrate_reasons(Some("not json"));
        assert_eq!(hydrated.source, HydrationSource::Recovered);
        assert_eq!(hydrated.reasons.len(), 3);
    }

    #[test]
    fn duplicate_ids_get_fresh_values_and_keep_order() {
        let raw = r#"[{"id":"7","text":"a"},{"id":"7","text":"b"},{"id":"8","text":"c"}]"#;
        let hydrated = hydrate_reasons(Some(raw));

        assert_eq!(hydrated.reassigned_ids, 1);
        let texts: Vec<&str> = hydrated.reasons.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
        assert_eq!(hydrated.reasons[0].id.as_str(), "7");
        assert_ne!(hydrated.reasons[1].id.as_str(), "7");
        assert_eq!(hydrated.reasons[2].id.as_str(), "8");
    }

    #[test]
    fn stored_whitespace_text_is_trusted() {
        let hydrated = hydrate_reasons(Some(r#"[{"id":"1","text":"  "}]"#));
        assert_eq!(hydrated.reasons[0].text, "  ");
    }
}
