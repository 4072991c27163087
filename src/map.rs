//! Persistent string-keyed CHAMP map.

use std::fmt;
use std::ops;
use std::sync::Arc;

use crate::hash::hash_key;
use crate::iter::Iter;
use crate::node::{Entry, Node};
use crate::ops::get::get_recursive;
use crate::ops::insert::insert_recursive;
use crate::ops::remove::{RemoveOutcome, remove_recursive};

/// Immutable snapshot of a string-keyed map.
///
/// No method takes `&mut self`: every edit returns a new snapshot and leaves
/// `self` as it was. Unchanged subtrees are shared between versions, so
/// `clone` is O(1) and an edit copies only the path to the touched slot.
///
/// Same set of entries always produces the same trie structure (canonical
/// form), so equal snapshots also enumerate in the same order.
///
/// ```
/// use keyed_champ::PersistentMap;
///
/// let v1 = PersistentMap::new().insert("a", 1);
/// let v2 = v1.insert("a", 2);
/// assert_eq!(v1.get("a"), Some(&1));
/// assert_eq!(v2.get("a"), Some(&2));
/// ```
pub struct PersistentMap<V> {
    root: Option<Arc<Node<V>>>,
    size: usize,
}

// ---------------------------------------------------------------------------
// Construction & accessors, no trait bounds
// ---------------------------------------------------------------------------

impl<V> PersistentMap<V> {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// Returns the number of key-value pairs.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns `true` if both snapshots are the same version.
    ///
    /// This is reference identity, not content equality: an edit that
    /// changes nothing hands back an identical snapshot, any other edit a
    /// distinct one. All empty maps are identical to each other.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.root, &other.root) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }

    /// Returns a reference to the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_hashed(hash_key(key), key)
    }

    /// Returns `true` if the map contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns an iterator over `(&str, &V)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(self.root.as_ref(), self.size)
    }

    pub(crate) fn get_hashed(&self, hash: u64, key: &str) -> Option<&V> {
        let root = self.root.as_deref()?;
        get_recursive(root, hash, key, 0).map(|e| &e.value)
    }
}

// ---------------------------------------------------------------------------
// Write operations, V: Clone (path copies clone the touched blocks)
// ---------------------------------------------------------------------------

impl<V: Clone> PersistentMap<V> {
    /// Returns a new map with `key` bound to `value`, added or overwritten.
    #[must_use]
    pub fn insert(&self, key: &str, value: V) -> Self {
        self.insert_hashed(hash_key(key), key, value)
    }

    /// Returns a map without `key`.
    ///
    /// If `key` is absent the result is identical ([`ptr_eq`](Self::ptr_eq))
    /// to `self`.
    #[must_use]
    pub fn remove(&self, key: &str) -> Self {
        self.remove_hashed(hash_key(key), key)
    }

    pub(crate) fn insert_hashed(&self, hash: u64, key: &str, value: V) -> Self {
        let entry = Entry {
            hash,
            key: Arc::from(key),
            value,
        };

        let Some(root) = &self.root else {
            return Self {
                root: Some(Arc::new(Node::singleton(entry))),
                size: 1,
            };
        };

        let outcome = insert_recursive(root, entry, 0);
        Self {
            root: Some(outcome.node),
            size: if outcome.inserted {
                self.size + 1
            } else {
                self.size
            },
        }
    }

    pub(crate) fn remove_hashed(&self, hash: u64, key: &str) -> Self {
        let Some(root) = &self.root else {
            return self.clone();
        };
        match remove_recursive(root, hash, key, 0) {
            RemoveOutcome::NotFound => self.clone(),
            RemoveOutcome::Removed { node } => Self {
                root: node,
                size: self.size - 1,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<V> Clone for PersistentMap<V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            size: self.size,
        }
    }
}

impl<V> Default for PersistentMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for PersistentMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V: PartialEq> PartialEq for PersistentMap<V> {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        self.size == other.size && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<V: Eq> Eq for PersistentMap<V> {}

impl<K: AsRef<str>, V: Clone> FromIterator<(K, V)> for PersistentMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |map, (k, v)| map.insert(k.as_ref(), v))
    }
}

impl<V> ops::Index<&str> for PersistentMap<V> {
    type Output = V;

    fn index(&self, key: &str) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, V> IntoIterator for &'a PersistentMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}
