use std::thread;

use super::{Organism, dog, human, scientific_name};
use crate::{
    AppendOnlyHandle, KeyNotFoundError, KeyedMapper, PersistentMap, ReadOnlyHandle, ReadWriteHandle,
};

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn public_types_are_send_and_sync() {
    assert_send_sync::<PersistentMap<String>>();
    assert_send_sync::<KeyedMapper<Organism>>();
    assert_send_sync::<ReadOnlyHandle<Organism>>();
    assert_send_sync::<AppendOnlyHandle<Organism>>();
    assert_send_sync::<ReadWriteHandle<Organism>>();
    assert_send_sync::<KeyNotFoundError>();
}

#[test]
fn snapshot_shared_across_readers() {
    let map: PersistentMap<usize> = (0..1_000).map(|i| (format!("k{i}"), i)).collect();

    thread::scope(|s| {
        for t in 0..4 {
            let map = &map;
            s.spawn(move || {
                for i in (t..1_000).step_by(4) {
                    assert_eq!(map.get(&format!("k{i}")), Some(&i));
                }
            });
        }
    });
}

#[test]
fn copies_edited_on_separate_threads() {
    let mut base = ReadWriteHandle::new(scientific_name);
    base.set_value(human());

    let results: Vec<usize> = thread::scope(|s| {
        let mut workers = Vec::with_capacity(4);
        for n in 0..4 {
            let mut h = base.copy();
            workers.push(s.spawn(move || {
                for i in 0..n {
                    h.set_value(Organism {
                        species: if i % 2 == 0 { "a" } else { "b" },
                        genus: "Test",
                        extinct: false,
                    });
                }
                if n == 3 {
                    h.remove(&human());
                }
                h.len()
            }));
        }
        workers
            .into_iter()
            .map(|w| w.join().expect("worker panicked"))
            .collect()
    });

    assert_eq!(results, vec![1, 2, 3, 2]);
    assert_eq!(base.len(), 1);
    base.set_value(dog());
    assert_eq!(base.len(), 2);
}
