use super::*;
use crate::catalog::Track;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};
use proptest::prelude::*;
use std::collections::HashSet;

fn t(file: &str) -> Track {
    Track {
        title: format!("Title {file}"),
        artist: "Artist".into(),
        file: file.into(),
        artwork: Some(format!("https://img/{file}.jpg")),
    }
}

fn ids<S: KeyValueStore>(lib: &LibraryStore<S>) -> Vec<String> {
    lib.entries().iter().map(|t| t.id().to_string()).collect()
}

#[test]
fn toggle_adds_then_removes_and_writes_each_time() {
    let mut lib = LibraryStore::load(MemoryStore::default(), DEFAULT_LIBRARY_KEY);
    assert!(lib.is_empty());

    let x = t("x.mp3");
    assert_eq!(lib.toggle(&x).unwrap(), Toggled::Added);
    assert_eq!(ids(&lib), vec!["x.mp3"]);
    assert!(lib.is_favorite("x.mp3"));
    assert_eq!(lib.store().writes, 1);
    let stored = lib.store().values.get(DEFAULT_LIBRARY_KEY).unwrap();
    assert!(stored.contains("x.mp3"));

    assert_eq!(lib.toggle(&x).unwrap(), Toggled::Removed);
    assert!(lib.is_empty());
    assert!(!lib.is_favorite("x.mp3"));
    assert_eq!(lib.store().writes, 2);
    assert_eq!(lib.store().values.get(DEFAULT_LIBRARY_KEY).unwrap(), "[]");
}

#[test]
fn toggle_keeps_insertion_order() {
    let mut lib = LibraryStore::load(MemoryStore::default(), "library");
    lib.toggle(&t("c.mp3")).unwrap();
    lib.toggle(&t("a.mp3")).unwrap();
    lib.toggle(&t("b.mp3")).unwrap();
    lib.toggle(&t("a.mp3")).unwrap();
    assert_eq!(ids(&lib), vec!["c.mp3", "b.mp3"]);
}

#[test]
fn toggle_matches_by_id_not_by_whole_record() {
    let mut lib = LibraryStore::load(MemoryStore::default(), "library");
    lib.toggle(&t("x.mp3")).unwrap();

    let mut renamed = t("x.mp3");
    renamed.title = "Other title".into();
    assert_eq!(lib.toggle(&renamed).unwrap(), Toggled::Removed);
    assert!(lib.is_empty());
}

#[test]
fn failed_write_rolls_back() {
    let mut lib = LibraryStore::load(MemoryStore::default(), "library");
    lib.toggle(&t("a.mp3")).unwrap();

    let mut store = lib.store().clone();
    store.fail_writes = true;
    let mut lib = LibraryStore::load(store, "library");
    assert_eq!(ids(&lib), vec!["a.mp3"]);

    assert!(lib.toggle(&t("b.mp3")).is_err());
    assert_eq!(ids(&lib), vec!["a.mp3"]);

    assert!(lib.toggle(&t("a.mp3")).is_err());
    assert_eq!(ids(&lib), vec!["a.mp3"]);
}

#[test]
fn load_absent_or_malformed_is_empty() {
    let lib = LibraryStore::load(MemoryStore::default(), "library");
    assert!(lib.is_empty());

    let mut store = MemoryStore::default();
    store.values.insert("library".into(), "{not json".into());
    let lib = LibraryStore::load(store, "library");
    assert!(lib.is_empty());

    let mut store = MemoryStore::default();
    store.values.insert("library".into(), r#"{"file": "x.mp3"}"#.into());
    let lib = LibraryStore::load(store, "library");
    assert!(lib.is_empty());
}

#[test]
fn load_drops_invalid_and_duplicate_entries() {
    let mut store = MemoryStore::default();
    store.values.insert(
        "library".into(),
        r#"[
          {"title": "A", "artist": "X", "file": "a.mp3"},
          {"title": "A again", "artist": "X", "file": "a.mp3"},
          {"artist": "X", "file": "b.mp3"}
        ]"#
        .into(),
    );
    let lib = LibraryStore::load(store, "library");
    assert_eq!(ids(&lib), vec!["a.mp3"]);
}

#[test]
fn load_uses_its_own_key() {
    let mut store = MemoryStore::default();
    store.values.insert(
        "other".into(),
        r#"[{"title": "A", "artist": "X", "file": "a.mp3"}]"#.into(),
    );
    let lib = LibraryStore::load(store, "library");
    assert!(lib.is_empty());
}

#[test]
fn file_backed_library_survives_reload() {
    let dir = tempfile::tempdir().unwrap();

    let mut lib = LibraryStore::load(FileStore::new(dir.path()), "library");
    lib.toggle(&t("a.mp3")).unwrap();
    lib.toggle(&t("b.mp3")).unwrap();
    drop(lib);

    let lib = LibraryStore::load(FileStore::new(dir.path()), "library");
    assert_eq!(ids(&lib), vec!["a.mp3", "b.mp3"]);
    assert_eq!(lib.entries()[0], t("a.mp3"));
}

fn track_ids() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-e]\\.mp3", 0..40)
}

proptest! {
    #[test]
    fn toggle_twice_restores_original(seed in track_ids(), pick in "[a-g]\\.mp3") {
        let mut lib = LibraryStore::load(MemoryStore::default(), "library");
        for id in &seed {
            lib.toggle(&t(id)).unwrap();
        }
        let before = ids(&lib).into_iter().collect::<HashSet<_>>();

        lib.toggle(&t(&pick)).unwrap();
        lib.toggle(&t(&pick)).unwrap();

        let after = ids(&lib).into_iter().collect::<HashSet<_>>();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn at_most_one_entry_per_id(seq in track_ids()) {
        let mut lib = LibraryStore::load(MemoryStore::default(), "library");
        for id in &seq {
            lib.toggle(&t(id)).unwrap();
        }
        let all = ids(&lib);
        let unique: HashSet<_> = all.iter().cloned().collect();
        prop_assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn persisted_set_round_trips(seq in track_ids()) {
        let mut lib = LibraryStore::load(MemoryStore::default(), "library");
        for id in &seq {
            lib.toggle(&t(id)).unwrap();
        }
        let reloaded = LibraryStore::load(lib.store().clone(), "library");

        let a: HashSet<_> = lib.entries().iter().cloned().map(|t| t.file).collect();
        let b: HashSet<_> = reloaded.entries().iter().cloned().map(|t| t.file).collect();
        prop_assert_eq!(a, b);
        prop_assert_eq!(lib.entries(), reloaded.entries());
    }
}
