use rstest::{fixture, rstest};

use super::{Organism, direwolf, dog, human, init_tracing, scientific_name};
use crate::{AppendOnlyHandle, PersistentMap, ReadOnlyHandle, ReadWriteHandle, create_keyed_mapper};

#[fixture]
fn read_write() -> ReadWriteHandle<Organism> {
    init_tracing();
    ReadWriteHandle::new(scientific_name)
}

#[fixture]
fn append_only() -> AppendOnlyHandle<Organism> {
    init_tracing();
    let mut h = AppendOnlyHandle::new(scientific_name);
    assert!(h.try_add_value(human()));
    assert!(h.try_add_value(dog()));
    h
}

// ---------------------------------------------------------------------------
// ReadWrite
// ---------------------------------------------------------------------------

#[rstest]
fn set_value_then_clear(mut read_write: ReadWriteHandle<Organism>) {
    let mutated_dog = Organism {
        extinct: true,
        ..dog()
    };
    assert!(read_write.set_value(human()));
    assert!(read_write.set_value(mutated_dog));
    assert_eq!(read_write.len(), 2);
    assert!(read_write.get("Canis lupus familiaris").is_some_and(|o| o.extinct));

    assert!(read_write.clear());
    assert_eq!(read_write.len(), 0);
    assert!(read_write.is_empty());
    assert!(!read_write.clear());
}

#[rstest]
fn set_value_overwrites_under_same_key(mut read_write: ReadWriteHandle<Organism>) {
    read_write.set_value(human());
    let before = read_write.current_snapshot().clone();
    assert!(read_write.set_value(Organism {
        extinct: true,
        ..human()
    }));
    assert_eq!(read_write.len(), 1);
    assert!(read_write.current_snapshot()["Homo sapiens"].extinct);
    assert!(!before["Homo sapiens"].extinct);
}

#[rstest]
fn set_none_keeps_snapshot(mut read_write: ReadWriteHandle<Organism>) {
    read_write.set_value(human());
    let before = read_write.current_snapshot().clone();
    assert!(!read_write.set(None));
    assert!(read_write.current_snapshot().ptr_eq(&before));
    assert!(read_write.set(Some(dog())));
    assert_eq!(read_write.len(), 2);
}

#[rstest]
fn remove_at_and_remove(mut read_write: ReadWriteHandle<Organism>) {
    read_write.set_value(human());
    read_write.set_value(dog());

    assert!(read_write.remove_at("Homo sapiens"));
    assert!(!read_write.remove_at("Homo sapiens"));

    let lookalike = Organism {
        extinct: true,
        ..dog()
    };
    assert!(read_write.remove(&lookalike));
    assert!(!read_write.remove(&direwolf()));
    assert!(read_write.is_empty());
}

#[rstest]
fn try_add_through_read_write(mut read_write: ReadWriteHandle<Organism>) {
    assert!(read_write.try_add_value(human()));
    assert!(!read_write.try_add_value(Organism {
        extinct: true,
        ..human()
    }));
    assert!(!read_write.current_snapshot()["Homo sapiens"].extinct);
}

#[rstest]
fn get_or_throw_on_handle(mut read_write: ReadWriteHandle<Organism>) {
    read_write.set_value(direwolf());
    assert_eq!(read_write.get_or_throw("Canis dirus"), Ok(&direwolf()));
    let err = read_write.get_or_throw("Canis lupus").unwrap_err();
    assert_eq!(
        err.to_string(),
        "no non-null value exists for key, 'Canis lupus'"
    );
}

#[rstest]
fn copy_is_independent(mut read_write: ReadWriteHandle<Organism>) {
    read_write.set_value(human());
    let mut copy = read_write.copy();

    assert!(copy.current_snapshot().ptr_eq(read_write.current_snapshot()));
    copy.set_value(dog());
    read_write.clear();

    assert_eq!(copy.len(), 2);
    assert!(read_write.is_empty());

    let mut cloned = copy.clone();
    cloned.remove(&human());
    assert_eq!(copy.len(), 2);
    assert_eq!(cloned.len(), 1);
}

// ---------------------------------------------------------------------------
// AppendOnly
// ---------------------------------------------------------------------------

#[rstest]
fn append_only_never_overwrites(mut append_only: AppendOnlyHandle<Organism>) {
    let before = append_only.current_snapshot().clone();
    assert!(!append_only.try_add_value(Organism {
        extinct: true,
        ..dog()
    }));
    assert!(append_only.current_snapshot().ptr_eq(&before));
    assert_eq!(append_only.get_value("Canis lupus familiaris"), Some(dog()));
}

#[rstest]
fn read_only_view_is_detached(mut append_only: AppendOnlyHandle<Organism>) {
    let view = append_only.as_read_only_view();
    let seen = view.current_snapshot().clone();

    assert!(view.contains(&human()));
    assert_eq!(view.get("Homo sapiens"), Some(&human()));
    assert_eq!(view.keys().len(), 2);

    assert!(append_only.try_add_value(direwolf()));
    assert_eq!(append_only.len(), 3);
    assert!(view.current_snapshot().ptr_eq(&seen));
    assert!(!view.contains(&direwolf()));
}

#[rstest]
fn append_only_copy_is_independent(append_only: AppendOnlyHandle<Organism>) {
    let mut copy = append_only.copy();
    copy.try_add_value(direwolf());
    assert_eq!(copy.len(), 3);
    assert_eq!(append_only.len(), 2);
}

#[rstest]
fn read_write_derefs_to_view(mut read_write: ReadWriteHandle<Organism>) {
    read_write.set_value(human());
    let view = read_write.as_read_only_view();
    read_write.set_value(dog());
    assert_eq!(view.len(), 1);
    assert_eq!(read_write.len(), 2);
}

// ---------------------------------------------------------------------------
// ReadOnly
// ---------------------------------------------------------------------------

#[test]
fn read_only_over_existing_snapshot() {
    let mapper = create_keyed_mapper(scientific_name);
    let snapshot = mapper.set_value(&PersistentMap::new(), human());
    let view = ReadOnlyHandle::from_mapper(mapper, snapshot.clone());

    assert!(view.current_snapshot().ptr_eq(&snapshot));
    assert_eq!(view.mapper().key_of(&dog()), "Canis lupus familiaris");
    assert_eq!(view.values(), vec![&human()]);
    assert_eq!(view.pairs().len(), 1);
    assert_eq!(view.iter().count(), 1);
    assert!(view.contains_key("Homo sapiens"));
}

#[test]
fn read_only_handle_iterates_by_reference() {
    let mut h = ReadWriteHandle::new(scientific_name);
    h.set_value(human());
    h.set_value(direwolf());
    let view = h.as_read_only_view();

    let mut seen = Vec::new();
    for (key, organism) in &view {
        assert_eq!(key, scientific_name(organism));
        seen.push(key);
    }
    assert_eq!(seen, view.keys());
}

#[test]
fn handles_start_from_given_snapshot() {
    let snapshot: PersistentMap<Organism> = [("Homo sapiens", human()), ("Canis dirus", direwolf())]
        .into_iter()
        .collect();

    let view = ReadOnlyHandle::with_snapshot(scientific_name, snapshot.clone());
    let mut log = AppendOnlyHandle::with_snapshot(scientific_name, snapshot.clone());
    let mut full = ReadWriteHandle::with_snapshot(scientific_name, snapshot);

    assert_eq!(view.len(), 2);
    assert!(!log.try_add_value(direwolf()));
    assert!(full.remove(&direwolf()));
    assert_eq!(log.len(), 2);
    assert_eq!(full.len(), 1);
}

#[test]
fn debug_output_names_handle() {
    let mut h = ReadWriteHandle::new(|s: &String| s.clone());
    h.set_value("x".to_owned());
    let out = format!("{h:?}");
    assert!(out.starts_with("ReadWriteHandle"));
    assert!(out.contains("\"x\""));
}
