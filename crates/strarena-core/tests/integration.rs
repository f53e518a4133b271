//! Integration tests: StringStore scenarios end to end.
//!
//! These tests drive the public surface only, the way an embedding
//! application would: store, look up, search, mutate, compact.

use strarena_core::{Config, StoreError, StringStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn debug_store() -> StringStore {
    StringStore::open(Config::debug()).unwrap()
}

fn demo_store() -> StringStore {
    let mut store = debug_store();
    for s in ["ABC", "ABCDE", "12", "123", "12", "555"] {
        store.store(s).unwrap();
    }
    store
}

fn contents(store: &StringStore) -> Vec<String> {
    store
        .iter()
        .map(|(_, c)| String::from_utf8_lossy(c).into_owned())
        .collect()
}

// ---------------------------------------------------------------------------
// Counting and deletion
// ---------------------------------------------------------------------------

#[test]
fn test_store_and_delete_accounting() {
    let mut store = debug_store();
    store.store("ABC").unwrap();
    store.store("ABCDE").unwrap();
    store.store("12").unwrap();

    assert_eq!(store.count(), 3);
    assert_eq!(store.used_size(), 13);
    assert_eq!(store.free_size(), 17);

    store.delete_at(0).unwrap();
    assert_eq!(store.count(), 2);
    assert_eq!(store.used_size(), 9);
    assert_eq!(store.get(0).unwrap().content, b"ABCDE");
    assert_eq!(store.get(1).unwrap().content, b"12");
    assert!(store.get(2).is_none());
}

#[test]
fn test_round_trip() {
    let mut store = StringStore::open(Config::standard()).unwrap();
    for i in 0..50 {
        let s = format!("value-{:03}", i);
        let ordinal = store.store(&s).unwrap();
        let entry = store.get(ordinal).unwrap();
        assert_eq!(entry.content, s.as_bytes());
        assert_eq!(entry.len, s.len() + 1);
    }
    store.verify().unwrap();
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn test_fuzzy_query_returns_every_substring_match() {
    let mut store = demo_store();

    let result = store.fuzzy_query_all("2");
    let hits: Vec<(Vec<u8>, usize)> = result.to_owned_matches();
    assert_eq!(
        hits,
        vec![
            (b"12".to_vec(), 2),
            (b"123".to_vec(), 3),
            (b"12".to_vec(), 4),
        ]
    );
}

#[test]
fn test_query_all_exact_only() {
    let mut store = demo_store();

    let result = store.query_all("12");
    assert_eq!(result.ordinals(), vec![2, 4]);
    assert_eq!(result.get(0).unwrap().content, b"12");

    assert_eq!(store.query_next("12", 3).unwrap().ordinal, 4);
    assert!(store.query_next("12", 5).is_none());
}

#[test]
fn test_query_result_is_replaced_by_next_query() {
    let mut store = demo_store();
    assert_eq!(store.query_all("555").len(), 1);
    assert_eq!(store.fuzzy_query_all("ABC").len(), 2);
    assert!(store.query_all("missing").is_empty());
}

// ---------------------------------------------------------------------------
// Capacity and compaction
// ---------------------------------------------------------------------------

#[test]
fn test_full_leaves_state_unchanged() {
    let mut store = demo_store();
    assert_eq!(store.used_size(), 24);
    let before = store.arena().to_vec();

    let err = store.store("1234567").unwrap_err();
    assert_eq!(err, StoreError::Full { requested: 8, free: 6 });
    assert_eq!(store.arena(), before.as_slice());
    assert_eq!(store.count(), 6);
    assert_eq!(store.used_size(), 24);
}

#[test]
fn test_defragment_then_store_previously_full() {
    let config = Config { capacity: 30, compact_on_demand: false };
    let mut store = StringStore::open(config).unwrap();
    for s in ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff"] {
        store.store(s).unwrap();
    }
    store.delete_at(4).unwrap(); // eeee
    store.delete_at(2).unwrap(); // cccc
    store.delete_at(0).unwrap(); // aaaa

    // 15 units free in three 5-unit holes
    assert_eq!(store.free_size(), 15);
    assert!(matches!(store.store("0123456789"), Err(StoreError::Full { .. })));
    assert_eq!(store.count(), 3);

    assert_eq!(store.defragment(), 15);
    let ordinal = store.store("0123456789").unwrap();
    assert_eq!(ordinal, 3);
    assert_eq!(store.get(3).unwrap().content, b"0123456789");
    store.verify().unwrap();
}

#[test]
fn test_store_compacts_on_demand() {
    let mut store = debug_store();
    for s in ["aaaa", "bbbb", "cccc", "dddd", "eeee", "ffff"] {
        store.store(s).unwrap();
    }
    store.delete_at(4).unwrap();
    store.delete_at(2).unwrap();
    store.delete_at(0).unwrap();

    let ordinal = store.store("0123456789").unwrap();
    assert_eq!(ordinal, 3);
    assert_eq!(contents(&store), vec!["bbbb", "dddd", "ffff", "0123456789"]);
    assert_eq!(store.free_size(), 4);
}

#[test]
fn test_defragment_is_idempotent() {
    let mut store = demo_store();
    store.delete_at(1).unwrap();
    store.delete_at(3).unwrap();
    let before = contents(&store);

    let first = store.defragment();
    let second = store.defragment();

    assert_eq!(first, second);
    assert_eq!(contents(&store), before);
    store.verify().unwrap();
}

// ---------------------------------------------------------------------------
// Alteration
// ---------------------------------------------------------------------------

#[test]
fn test_alter_all_then_delete_all() {
    let mut store = demo_store();

    assert_eq!(store.alter_all("12", "XY"), 2);
    assert_eq!(contents(&store), vec!["ABC", "ABCDE", "XY", "123", "XY", "555"]);

    assert_eq!(store.delete_all("XY"), 2);
    assert_eq!(contents(&store), vec!["ABC", "ABCDE", "123", "555"]);
    store.verify().unwrap();
}

#[test]
fn test_alter_grow_moves_record() {
    let mut store = demo_store();

    // "ABC" is boxed in, growing it relocates to the trailing gap
    let ordinal = store.alter_at(0, "ABCDEFG").unwrap();
    assert_eq!(ordinal, 5);
    assert_eq!(contents(&store), vec!["ABCDE", "12", "123", "12", "555", "ABCDEFG"]);
    assert_eq!(store.used_size(), 28);
    store.verify().unwrap();
}

#[test]
fn test_alter_grow_failure_keeps_original() {
    let mut store = demo_store();

    let err = store.alter_at(0, "ABCDEFGHIJKL").unwrap_err();
    assert!(matches!(err, StoreError::Full { .. }));
    assert_eq!(store.get(0).unwrap().content, b"ABC");
    assert_eq!(store.count(), 6);
}

#[test]
fn test_clear_resets_everything() {
    let mut store = demo_store();
    store.clear();
    assert_eq!(store.count(), 0);
    assert_eq!(store.used_size(), 0);
    assert_eq!(store.free_size(), store.total_size());
    assert!(store.fuzzy_query_all("").is_empty());
}
