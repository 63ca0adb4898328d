use barreasons_core::{
    decode_reasons, encode_reasons, load_reasons, HydrationSource, KeyValuePersistence,
    KeyValueStore, KvError, KvResult, MemoryKeyValueStore, Reason, ReasonId, ReasonListStore,
    SqliteKeyValueStore, STORAGE_KEY,
};
use std::cell::Cell;
use std::rc::Rc;

/// Memory store whose writes fail while `failing` is set.
struct FlakyStore {
    inner: MemoryKeyValueStore,
    failing: Rc<Cell<bool>>,
}

impl KeyValueStore for FlakyStore {
    fn read(&self, key: &str) -> KvResult<Option<String>> {
        self.inner.read(key)
    }

    fn write(&mut self, key: &str, value: &str) -> KvResult<()> {
        if self.failing.get() {
            return Err(KvError::from(rusqlite::Error::InvalidQuery));
        }
        self.inner.write(key, value)
    }
}

fn reason(id: &str, text: &str) -> Reason {
    Reason {
        id: ReasonId::new(id),
        text: text.to_string(),
    }
}

#[test]
fn encode_then_decode_preserves_order_ids_and_text() {
    let original = vec![
        reason("1700000000000", "Spill"),
        reason("1", "Out of ingredients"),
        reason("b4c6a1f2-0000-4000-8000-000000000000", "Tab closed \"early\""),
    ];

    let decoded = decode_reasons(&encode_reasons(&original).unwrap()).unwrap();

    assert_eq!(decoded, original);
}

#[test]
fn empty_store_hydrates_seed_and_writes_nothing() {
    let persistence = KeyValuePersistence::new(MemoryKeyValueStore::new());

    let hydration = persistence.load().unwrap();

    assert_eq!(hydration.source, HydrationSource::Seeded);
    assert_eq!(hydration.reasons.len(), 3);
    assert_eq!(persistence.store().read(STORAGE_KEY).unwrap(), None);
}

#[test]
fn every_mutation_rewrites_the_full_slot() {
    let persistence = KeyValuePersistence::new(MemoryKeyValueStore::new());
    let hydration = persistence.load().unwrap();
    let mut store = ReasonListStore::new(hydration.reasons, persistence);

    store.add("Spill").unwrap();
    store.move_up(3);

    let raw = store
        .persistence()
        .store()
        .read(STORAGE_KEY)
        .unwrap()
        .unwrap();
    let stored = decode_reasons(&raw).unwrap();
    assert_eq!(stored, store.reasons());
    assert_eq!(stored[2].text, "Spill");
    assert!(store.persistence().last_error().is_none());
}

#[test]
fn cancel_edit_does_not_touch_the_slot() {
    let seeded = encode_reasons(&[reason("1", "a")]).unwrap();
    let persistence =
        KeyValuePersistence::new(MemoryKeyValueStore::with_slot(STORAGE_KEY, seeded.clone()));
    let hydration = persistence.load().unwrap();
    let mut store = ReasonListStore::new(hydration.reasons, persistence);

    store.begin_edit(&ReasonId::new("1"));
    store.set_edit_buffer("b");
    store.cancel_edit();

    let raw = store.persistence().store().read(STORAGE_KEY).unwrap();
    assert_eq!(raw.as_deref(), Some(seeded.as_str()));
}

#[test]
fn sqlite_slot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reasons.sqlite3");

    {
        let persistence = KeyValuePersistence::new(SqliteKeyValueStore::open(&path).unwrap());
        let hydration = persistence.load().unwrap();
        let mut store = ReasonListStore::new(hydration.reasons, persistence);
        store.delete(&ReasonId::new("3"));
        store.add("Wrong table").unwrap();
        store.move_down(0);
    }

    let reopened = SqliteKeyValueStore::open(&path).unwrap();
    let hydration = load_reasons(&reopened, STORAGE_KEY).unwrap();

    assert_eq!(hydration.source, HydrationSource::Stored);
    let texts: Vec<&str> = hydration
        .reasons
        .iter()
        .map(|reason| reason.text.as_str())
        .collect();
    assert_eq!(
        texts,
        vec!["Customer changed mind", "Out of ingredients", "Wrong table"]
    );
}

#[test]
fn custom_key_isolates_lists() {
    let mut persistence =
        KeyValuePersistence::with_key(MemoryKeyValueStore::new(), "otherReasons");
    persistence.write_snapshot(&[reason("9", "x")]).unwrap();

    assert_eq!(persistence.key(), "otherReasons");
    let store = persistence.into_store();
    assert_eq!(store.read(STORAGE_KEY).unwrap(), None);
    assert!(store.read("otherReasons").unwrap().is_some());
}

#[test]
fn failed_write_keeps_mutation_and_next_success_clears_error() {
    let failing = Rc::new(Cell::new(true));
    let persistence = KeyValuePersistence::new(FlakyStore {
        inner: MemoryKeyValueStore::new(),
        failing: Rc::clone(&failing),
    });
    let hydration = persistence.load().unwrap();
    let mut store = ReasonListStore::new(hydration.reasons, persistence);

    let id = store.add("Spill").unwrap();

    assert_eq!(store.len(), 4);
    assert_eq!(store.get(&id).unwrap().text, "Spill");
    assert!(store.persistence().last_error().is_some());
    assert_eq!(store.persistence().store().read(STORAGE_KEY).unwrap(), None);

    failing.set(false);
    assert!(store.move_up(3));

    assert!(store.persistence().last_error().is_none());
    let raw = store
        .persistence()
        .store()
        .read(STORAGE_KEY)
        .unwrap()
        .unwrap();
    assert_eq!(decode_reasons(&raw).unwrap(), store.reasons());
}

#[test]
fn corrupt_slot_loads_seed_and_is_replaced_by_first_mutation() {
    let mut kv = SqliteKeyValueStore::open_in_memory().unwrap();
    kv.write(STORAGE_KEY, "{not json").unwrap();
    let persistence = KeyValuePersistence::new(kv);

    let hydration = persistence.load().unwrap();
    assert_eq!(hydration.source, HydrationSource::Recovered);
    assert_eq!(hydration.reasons.len(), 3);
    assert_eq!(
        persistence.store().read(STORAGE_KEY).unwrap().as_deref(),
        Some("{not json")
    );

    let mut store = ReasonListStore::new(hydration.reasons, persistence);
    store.begin_edit(&ReasonId::new("1"));
    store.cancel_edit();
    assert!(!store.move_up(0));
    assert_eq!(
        store.persistence().store().read(STORAGE_KEY).unwrap().as_deref(),
        Some("{not json")
    );

    store.delete(&ReasonId::new("2"));

    let raw = store
        .persistence()
        .store()
        .read(STORAGE_KEY)
        .unwrap()
        .unwrap();
    let stored = decode_reasons(&raw).unwrap();
    let ids: Vec<&str> = stored.iter().map(|reason| reason.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "3"]);
}
