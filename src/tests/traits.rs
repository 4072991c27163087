use crate::PersistentMap;

#[test]
fn default_is_empty() {
    let map: PersistentMap<i32> = PersistentMap::default();
    assert!(map.is_empty());
}

#[test]
fn debug_format_lists_entries() {
    let map = PersistentMap::new().insert("k", 7);
    assert_eq!(format!("{map:?}"), r#"{"k": 7}"#);
}

#[test]
fn from_iterator() {
    let map: PersistentMap<i32> = vec![("1", 10), ("2", 20), ("3", 30)].into_iter().collect();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get("1"), Some(&10));
}

#[test]
fn from_iterator_last_write_wins() {
    let map: PersistentMap<i32> = vec![("k", 1), ("k", 2)].into_iter().collect();
    assert_eq!(map.len(), 1);
    assert_eq!(map["k"], 2);
}

#[test]
fn index_existing() {
    let map = PersistentMap::new().insert("key", 42);
    assert_eq!(map["key"], 42);
}

#[test]
#[should_panic(expected = "key not found")]
fn index_missing_panics() {
    let map: PersistentMap<i32> = PersistentMap::new();
    let _ = map["999"];
}

#[test]
fn into_iterator_for_ref() {
    let map = PersistentMap::new().insert("a", 1).insert("b", 2);
    let mut sum = 0;
    for (_, v) in &map {
        sum += v;
    }
    assert_eq!(sum, 3);
    assert_eq!(map.iter().len(), 2);
}

#[test]
fn equality_ignores_history() {
    let a = PersistentMap::new().insert("x", 1).insert("y", 2);
    let b = PersistentMap::new().insert("y", 2).insert("z", 3).insert("x", 1).remove("z");
    assert_eq!(a, b);
    assert_ne!(a, b.insert("x", 9));
}
