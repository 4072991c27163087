//! Stateful handles over a current snapshot, at three capability levels.
//!
//! Each handle owns one [`PersistentMap`] snapshot and swaps it for a new one
//! on every edit. The capability levels nest by composition:
//!
//! - [`ReadOnlyHandle`]: queries only;
//! - [`AppendOnlyHandle`]: queries plus [`try_add_value`](AppendOnlyHandle::try_add_value);
//! - [`ReadWriteHandle`]: the full set of edits.
//!
//! The richer handles dereference to the poorer ones for queries. A read-only
//! handle exposes no mutating method at all:
//!
//! ```compile_fail
//! use keyed_champ::ReadOnlyHandle;
//!
//! let mut view: ReadOnlyHandle<String> = ReadOnlyHandle::new(|s: &String| s.clone());
//! view.try_add_value("x".to_owned());
//! ```
//!
//! and an append-only handle cannot overwrite or remove:
//!
//! ```compile_fail
//! use keyed_champ::AppendOnlyHandle;
//!
//! let mut log: AppendOnlyHandle<String> = AppendOnlyHandle::new(|s: &String| s.clone());
//! log.remove_at("x");
//! ```

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::{debug, trace};

use crate::error::KeyNotFoundError;
use crate::iter::Iter;
use crate::keyed::KeyedMapper;
use crate::map::PersistentMap;
use crate::primitives::{self, Pair};

// ---------------------------------------------------------------------------
// Read-only
// ---------------------------------------------------------------------------

/// Query-only handle over a snapshot.
///
/// ```
/// use keyed_champ::{PersistentMap, ReadOnlyHandle};
///
/// let map = PersistentMap::new().insert("ada", "Ada".to_owned());
/// let view = ReadOnlyHandle::with_snapshot(|s: &String| s.to_lowercase(), map);
/// assert!(view.contains(&"Ada".to_owned()));
/// assert_eq!(view.len(), 1);
/// ```
pub struct ReadOnlyHandle<T> {
    mapper: KeyedMapper<T>,
    snapshot: PersistentMap<T>,
}

impl<T> ReadOnlyHandle<T> {
    /// Creates a handle over an empty snapshot.
    #[must_use]
    pub fn new(key_of: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::with_snapshot(key_of, PersistentMap::new())
    }

    /// Creates a handle over `snapshot`.
    #[must_use]
    pub fn with_snapshot(
        key_of: impl Fn(&T) -> String + Send + Sync + 'static,
        snapshot: PersistentMap<T>,
    ) -> Self {
        Self::from_mapper(KeyedMapper::new(key_of), snapshot)
    }

    /// Creates a handle sharing `mapper`'s key function.
    #[must_use]
    pub const fn from_mapper(mapper: KeyedMapper<T>, snapshot: PersistentMap<T>) -> Self {
        Self { mapper, snapshot }
    }

    /// The snapshot this handle currently holds.
    #[must_use]
    pub const fn current_snapshot(&self) -> &PersistentMap<T> {
        &self.snapshot
    }

    /// The mapper (and key function) this handle uses.
    #[must_use]
    pub const fn mapper(&self) -> &KeyedMapper<T> {
        &self.mapper
    }

    /// Returns `true` if `key` has a value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.snapshot.contains_key(key)
    }

    /// Returns `true` if the key of `entity` has a value.
    #[must_use]
    pub fn contains(&self, entity: &T) -> bool {
        self.mapper.contains(&self.snapshot, entity)
    }

    /// Returns the entity stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.snapshot.get(key)
    }

    /// Returns the entity stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFoundError`] if `key` has no value.
    pub fn get_or_throw(&self, key: &str) -> Result<&T, KeyNotFoundError> {
        self.mapper.get_or_throw(&self.snapshot, key)
    }

    /// Returns all keys.
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        primitives::keys(&self.snapshot)
    }

    /// Returns all entities, in the same order as [`keys`](Self::keys).
    #[must_use]
    pub fn values(&self) -> Vec<&T> {
        primitives::values(&self.snapshot)
    }

    /// Returns all key-entity pairs, in the same order as [`keys`](Self::keys).
    #[must_use]
    pub fn pairs(&self) -> Vec<Pair<'_, T>> {
        primitives::pairs(&self.snapshot)
    }

    /// Returns an iterator over `(&str, &T)` pairs.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        self.snapshot.iter()
    }

    /// Number of stored entities.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Returns an independent handle starting from the same snapshot.
    #[must_use]
    pub fn copy(&self) -> Self {
        debug!(len = self.len(), "copying handle");
        Self::from_mapper(self.mapper.clone(), self.snapshot.clone())
    }

    /// Swaps in `next`. Returns `true` if it is a different version.
    fn replace(&mut self, op: &'static str, next: PersistentMap<T>) -> bool {
        let changed = !self.snapshot.ptr_eq(&next);
        trace!(op, changed, len = next.len(), "handle transition");
        self.snapshot = next;
        changed
    }
}

impl<T: Clone> ReadOnlyHandle<T> {
    /// Returns an owned copy of the entity stored under `key`.
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<T> {
        self.mapper.get_value(&self.snapshot, key)
    }
}

impl<'a, T> IntoIterator for &'a ReadOnlyHandle<T> {
    type Item = (&'a str, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Clone for ReadOnlyHandle<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadOnlyHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadOnlyHandle")
            .field("snapshot", &self.snapshot)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Append-only
// ---------------------------------------------------------------------------

/// Handle that can add entities but never overwrite or remove them.
///
/// Derefs to [`ReadOnlyHandle`] for queries.
pub struct AppendOnlyHandle<T> {
    inner: ReadOnlyHandle<T>,
}

impl<T> AppendOnlyHandle<T> {
    /// Creates a handle over an empty snapshot.
    #[must_use]
    pub fn new(key_of: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::with_snapshot(key_of, PersistentMap::new())
    }

    /// Creates a handle over `snapshot`.
    #[must_use]
    pub fn with_snapshot(
        key_of: impl Fn(&T) -> String + Send + Sync + 'static,
        snapshot: PersistentMap<T>,
    ) -> Self {
        Self::from_mapper(KeyedMapper::new(key_of), snapshot)
    }

    /// Creates a handle sharing `mapper`'s key function.
    #[must_use]
    pub const fn from_mapper(mapper: KeyedMapper<T>, snapshot: PersistentMap<T>) -> Self {
        Self {
            inner: ReadOnlyHandle::from_mapper(mapper, snapshot),
        }
    }

    /// Returns a read-only handle over the current snapshot.
    ///
    /// The view is detached: later edits through `self` do not reach it.
    #[must_use]
    pub fn as_read_only_view(&self) -> ReadOnlyHandle<T> {
        debug!(len = self.len(), "taking read-only view");
        ReadOnlyHandle::from_mapper(self.inner.mapper.clone(), self.inner.snapshot.clone())
    }

    /// Returns an independent handle starting from the same snapshot.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            inner: self.inner.copy(),
        }
    }
}

impl<T: Clone> AppendOnlyHandle<T> {
    /// Adds `entity` unless its key is already present.
    ///
    /// Returns `true` if the entity was added. On `false` the handle still
    /// holds the identical snapshot and the stored entity is kept.
    pub fn try_add_value(&mut self, entity: T) -> bool {
        let next = self.inner.mapper.try_add_value(&self.inner.snapshot, entity);
        self.inner.replace("try_add_value", next)
    }
}

impl<T> Deref for AppendOnlyHandle<T> {
    type Target = ReadOnlyHandle<T>;

    fn deref(&self) -> &ReadOnlyHandle<T> {
        &self.inner
    }
}

impl<T> Clone for AppendOnlyHandle<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for AppendOnlyHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppendOnlyHandle")
            .field("snapshot", &self.inner.snapshot)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Read-write
// ---------------------------------------------------------------------------

/// Handle with the full set of edits.
///
/// Derefs to [`AppendOnlyHandle`], so `try_add_value`, `as_read_only_view`
/// and every query are available as well.
///
/// ```
/// use keyed_champ::ReadWriteHandle;
///
/// let mut names = ReadWriteHandle::new(|s: &String| s.to_lowercase());
/// names.set_value("Ada".to_owned());
/// names.set_value("ADA".to_owned());
/// assert_eq!(names.len(), 1);
/// assert_eq!(names.get("ada").map(String::as_str), Some("ADA"));
/// ```
pub struct ReadWriteHandle<T> {
    inner: AppendOnlyHandle<T>,
}

impl<T> ReadWriteHandle<T> {
    /// Creates a handle over an empty snapshot.
    #[must_use]
    pub fn new(key_of: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::with_snapshot(key_of, PersistentMap::new())
    }

    /// Creates a handle over `snapshot`.
    #[must_use]
    pub fn with_snapshot(
        key_of: impl Fn(&T) -> String + Send + Sync + 'static,
        snapshot: PersistentMap<T>,
    ) -> Self {
        Self::from_mapper(KeyedMapper::new(key_of), snapshot)
    }

    /// Creates a handle sharing `mapper`'s key function.
    #[must_use]
    pub const fn from_mapper(mapper: KeyedMapper<T>, snapshot: PersistentMap<T>) -> Self {
        Self {
            inner: AppendOnlyHandle::from_mapper(mapper, snapshot),
        }
    }

    /// Returns an independent handle starting from the same snapshot.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            inner: self.inner.copy(),
        }
    }

    /// Resets to an empty snapshot. Returns `true` if anything was stored.
    pub fn clear(&mut self) -> bool {
        self.cell().replace("clear", PersistentMap::new())
    }

    const fn cell(&mut self) -> &mut ReadOnlyHandle<T> {
        &mut self.inner.inner
    }
}

impl<T: Clone> ReadWriteHandle<T> {
    /// Stores the entity if there is one; `None` is a no-op.
    ///
    /// Returns `true` if the snapshot changed.
    pub fn set(&mut self, entity: Option<T>) -> bool {
        let cell = self.cell();
        let next = cell.mapper.set(&cell.snapshot, entity);
        cell.replace("set", next)
    }

    /// Stores `entity` under its key, adding or overwriting.
    ///
    /// Always produces a new snapshot, so always returns `true`.
    pub fn set_value(&mut self, entity: T) -> bool {
        let cell = self.cell();
        let next = cell.mapper.set_value(&cell.snapshot, entity);
        cell.replace("set_value", next)
    }

    /// Removes whatever is stored under `key`.
    ///
    /// Returns `true` if something was removed.
    pub fn remove_at(&mut self, key: &str) -> bool {
        let cell = self.cell();
        let next = cell.mapper.remove_at(&cell.snapshot, key);
        cell.replace("remove_at", next)
    }

    /// Removes whatever is stored under the key of `entity`.
    ///
    /// Removal is by key: a different entity sharing the key is removed too.
    /// Returns `true` if something was removed.
    pub fn remove(&mut self, entity: &T) -> bool {
        let cell = self.cell();
        let next = cell.mapper.remove(&cell.snapshot, entity);
        cell.replace("remove", next)
    }
}

impl<T> Deref for ReadWriteHandle<T> {
    type Target = AppendOnlyHandle<T>;

    fn deref(&self) -> &AppendOnlyHandle<T> {
        &self.inner
    }
}

impl<T> DerefMut for ReadWriteHandle<T> {
    fn deref_mut(&mut self) -> &mut AppendOnlyHandle<T> {
        &mut self.inner
    }
}

impl<T> Clone for ReadWriteHandle<T> {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl<T: fmt::Debug> fmt::Debug for ReadWriteHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadWriteHandle")
            .field("snapshot", &self.inner.inner.snapshot)
            .finish_non_exhaustive()
    }
}
