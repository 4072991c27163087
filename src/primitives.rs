//! Free-function surface over [`PersistentMap`] snapshots.
//!
//! Every function takes a snapshot by reference and either reads from it or
//! returns a snapshot reflecting the edit. The input is never modified.
//! Functions that change nothing return a snapshot identical to the input
//! ([`PersistentMap::ptr_eq`]), which lets callers detect no-ops cheaply.
//!
//! `Option` plays the part of the absent marker: `None` in [`set`] removes,
//! and no key is ever stored without a value.

use crate::error::KeyNotFoundError;
use crate::map::PersistentMap;

/// One key-value pair of a snapshot, as produced by [`pairs`].
#[derive(Debug, PartialEq, Eq)]
pub struct Pair<'a, V> {
    /// The key.
    pub key: &'a str,
    /// The value stored under `key`.
    pub value: &'a V,
}

impl<V> Clone for Pair<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Pair<'_, V> {}

/// Returns an empty snapshot.
#[must_use]
pub const fn empty<V>() -> PersistentMap<V> {
    PersistentMap::new()
}

/// Returns `true` if `key` has a value in `map`.
#[must_use]
pub fn contains_key<V>(map: &PersistentMap<V>, key: &str) -> bool {
    map.contains_key(key)
}

/// Returns the value stored under `key`, if any.
#[must_use]
pub fn get<'a, V>(map: &'a PersistentMap<V>, key: &str) -> Option<&'a V> {
    map.get(key)
}

/// Returns an owned copy of the value stored under `key`, if any.
#[must_use]
pub fn get_value<V: Clone>(map: &PersistentMap<V>, key: &str) -> Option<V> {
    map.get(key).cloned()
}

/// Returns the value stored under `key`.
///
/// # Errors
///
/// Returns [`KeyNotFoundError`] carrying `key` if it has no value in `map`.
pub fn get_or_throw<'a, V>(map: &'a PersistentMap<V>, key: &str) -> Result<&'a V, KeyNotFoundError> {
    map.get(key).ok_or_else(|| KeyNotFoundError::new(key))
}

/// Returns a snapshot without `key`.
///
/// When `key` is already absent the input snapshot is returned as is.
#[must_use]
pub fn remove_at<V: Clone>(map: &PersistentMap<V>, key: &str) -> PersistentMap<V> {
    map.remove(key)
}

/// Binds `key` to `value`: `Some(v)` adds or overwrites, `None` removes.
#[must_use]
pub fn set<V: Clone>(map: &PersistentMap<V>, key: &str, value: Option<V>) -> PersistentMap<V> {
    value.map_or_else(|| remove_at(map, key), |v| map.insert(key, v))
}

/// Binds `key` to `value`, adding or overwriting.
#[must_use]
pub fn set_value<V: Clone>(map: &PersistentMap<V>, key: &str, value: V) -> PersistentMap<V> {
    set(map, key, Some(value))
}

/// Adds `key` → `value` only if `key` is absent.
///
/// If `key` is already present, the input snapshot is returned unchanged,
/// even when the stored value differs from `value`.
#[must_use]
pub fn try_add_value<V: Clone>(map: &PersistentMap<V>, key: &str, value: V) -> PersistentMap<V> {
    if contains_key(map, key) {
        return map.clone();
    }
    set_value(map, key, value)
}

/// Returns all keys of `map`.
#[must_use]
pub fn keys<V>(map: &PersistentMap<V>) -> Vec<&str> {
    map.iter().map(|(key, _)| key).collect()
}

/// Returns all values of `map`, in the same order as [`keys`].
#[must_use]
pub fn values<V>(map: &PersistentMap<V>) -> Vec<&V> {
    map.iter().map(|(_, value)| value).collect()
}

/// Returns all key-value pairs of `map`, in the same order as [`keys`].
#[must_use]
pub fn pairs<V>(map: &PersistentMap<V>) -> Vec<Pair<'_, V>> {
    map.iter().map(|(key, value)| Pair { key, value }).collect()
}
