//! Entity-keyed view of the primitives.
//!
//! A [`KeyedMapper`] pairs the free functions of [`primitives`](crate::primitives)
//! with a key function, so callers hand over whole entities and the mapper
//! derives the key. It holds no snapshot of its own.

use std::fmt;
use std::sync::Arc;

use crate::error::KeyNotFoundError;
use crate::map::PersistentMap;
use crate::primitives::{self, Pair};

/// Shared, thread-safe key function: entity → key.
///
/// Must be pure and return the same key for an entity for as long as the
/// entity is stored.
pub type KeyFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Creates a [`KeyedMapper`] deriving keys with `key_of`.
#[must_use]
pub fn create_keyed_mapper<T>(key_of: impl Fn(&T) -> String + Send + Sync + 'static) -> KeyedMapper<T> {
    KeyedMapper::new(key_of)
}

/// Stateless bundle of snapshot operations over entities of type `T`.
///
/// Cloning shares the key function.
pub struct KeyedMapper<T> {
    key_of: KeyFn<T>,
}

impl<T> KeyedMapper<T> {
    /// Creates a mapper deriving keys with `key_of`.
    #[must_use]
    pub fn new(key_of: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        Self::from_shared(Arc::new(key_of))
    }

    /// Creates a mapper around an already shared key function.
    #[must_use]
    pub fn from_shared(key_of: KeyFn<T>) -> Self {
        Self { key_of }
    }

    /// Derives the key of `entity`.
    #[must_use]
    pub fn key_of(&self, entity: &T) -> String {
        (self.key_of)(entity)
    }

    /// Returns `true` if the key derived from `entity` has a value in `map`.
    ///
    /// The stored value need not be `entity` itself, only share its key.
    #[must_use]
    pub fn contains(&self, map: &PersistentMap<T>, entity: &T) -> bool {
        primitives::contains_key(map, &self.key_of(entity))
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFoundError`] if `key` has no value in `map`.
    pub fn get_or_throw<'a>(&self, map: &'a PersistentMap<T>, key: &str) -> Result<&'a T, KeyNotFoundError> {
        primitives::get_or_throw(map, key)
    }

    /// Binds this mapper to one snapshot.
    #[must_use]
    pub const fn bind<'a>(&'a self, map: &'a PersistentMap<T>) -> BoundMapper<'a, T> {
        BoundMapper { mapper: self, map }
    }
}

// ---------------------------------------------------------------------------
// Pass-through operations, bound to the primitives
// ---------------------------------------------------------------------------

impl<T: Clone> KeyedMapper<T> {
    /// [`primitives::contains_key`].
    pub const CONTAINS_KEY: fn(&PersistentMap<T>, &str) -> bool = primitives::contains_key;
    /// [`primitives::get`].
    pub const GET: for<'a> fn(&'a PersistentMap<T>, &str) -> Option<&'a T> = primitives::get;
    /// [`primitives::get_value`].
    pub const GET_VALUE: fn(&PersistentMap<T>, &str) -> Option<T> = primitives::get_value;
    /// [`primitives::remove_at`].
    pub const REMOVE_AT: fn(&PersistentMap<T>, &str) -> PersistentMap<T> = primitives::remove_at;
    /// [`primitives::keys`].
    pub const KEYS: for<'a> fn(&'a PersistentMap<T>) -> Vec<&'a str> = primitives::keys;
    /// [`primitives::values`].
    pub const VALUES: for<'a> fn(&'a PersistentMap<T>) -> Vec<&'a T> = primitives::values;
    /// [`primitives::pairs`].
    pub const PAIRS: for<'a> fn(&'a PersistentMap<T>) -> Vec<Pair<'a, T>> = primitives::pairs;

    /// See [`CONTAINS_KEY`](Self::CONTAINS_KEY).
    #[must_use]
    pub fn contains_key(&self, map: &PersistentMap<T>, key: &str) -> bool {
        (Self::CONTAINS_KEY)(map, key)
    }

    /// See [`GET`](Self::GET).
    #[must_use]
    pub fn get<'a>(&self, map: &'a PersistentMap<T>, key: &str) -> Option<&'a T> {
        (Self::GET)(map, key)
    }

    /// See [`GET_VALUE`](Self::GET_VALUE).
    #[must_use]
    pub fn get_value(&self, map: &PersistentMap<T>, key: &str) -> Option<T> {
        (Self::GET_VALUE)(map, key)
    }

    /// See [`REMOVE_AT`](Self::REMOVE_AT).
    #[must_use]
    pub fn remove_at(&self, map: &PersistentMap<T>, key: &str) -> PersistentMap<T> {
        (Self::REMOVE_AT)(map, key)
    }

    /// See [`KEYS`](Self::KEYS).
    #[must_use]
    pub fn keys<'a>(&self, map: &'a PersistentMap<T>) -> Vec<&'a str> {
        (Self::KEYS)(map)
    }

    /// See [`VALUES`](Self::VALUES).
    #[must_use]
    pub fn values<'a>(&self, map: &'a PersistentMap<T>) -> Vec<&'a T> {
        (Self::VALUES)(map)
    }

    /// See [`PAIRS`](Self::PAIRS).
    #[must_use]
    pub fn pairs<'a>(&self, map: &'a PersistentMap<T>) -> Vec<Pair<'a, T>> {
        (Self::PAIRS)(map)
    }
}

// ---------------------------------------------------------------------------
// Keyed edits
// ---------------------------------------------------------------------------

impl<T: Clone> KeyedMapper<T> {
    /// Stores `entity` under its key, adding or overwriting.
    #[must_use]
    pub fn set_value(&self, map: &PersistentMap<T>, entity: T) -> PersistentMap<T> {
        let key = self.key_of(&entity);
        primitives::set_value(map, &key, entity)
    }

    /// Stores the entity if there is one.
    ///
    /// `None` carries no key, so there is nothing to remove: the input
    /// snapshot is returned unchanged.
    #[must_use]
    pub fn set(&self, map: &PersistentMap<T>, entity: Option<T>) -> PersistentMap<T> {
        entity.map_or_else(
            || map.clone(),
            |entity| {
                let key = self.key_of(&entity);
                primitives::set(map, &key, Some(entity))
            },
        )
    }

    /// Stores `entity` only if its key is absent; otherwise returns `map`
    /// unchanged (identical snapshot, stored value kept).
    #[must_use]
    pub fn try_add_value(&self, map: &PersistentMap<T>, entity: T) -> PersistentMap<T> {
        let key = self.key_of(&entity);
        primitives::try_add_value(map, &key, entity)
    }

    /// Removes whatever is stored under the key of `entity`.
    ///
    /// Removal is by key, not by instance: a different entity sharing the
    /// key is removed just the same.
    #[must_use]
    pub fn remove(&self, map: &PersistentMap<T>, entity: &T) -> PersistentMap<T> {
        primitives::remove_at(map, &self.key_of(entity))
    }
}

impl<T> Clone for KeyedMapper<T> {
    fn clone(&self) -> Self {
        Self {
            key_of: Arc::clone(&self.key_of),
        }
    }
}

impl<T> fmt::Debug for KeyedMapper<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyedMapper").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Bound mapper
// ---------------------------------------------------------------------------

/// A [`KeyedMapper`] applied to one fixed snapshot.
///
/// Edits return new snapshots; the bound one is never changed.
pub struct BoundMapper<'a, T> {
    mapper: &'a KeyedMapper<T>,
    map: &'a PersistentMap<T>,
}

impl<'a, T> BoundMapper<'a, T> {
    /// The bound snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &'a PersistentMap<T> {
        self.map
    }

    /// See [`KeyedMapper::contains`].
    #[must_use]
    pub fn contains(&self, entity: &T) -> bool {
        self.mapper.contains(self.map, entity)
    }

    /// See [`primitives::contains_key`].
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        primitives::contains_key(self.map, key)
    }

    /// See [`primitives::get`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a T> {
        primitives::get(self.map, key)
    }

    /// See [`primitives::get_or_throw`].
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFoundError`] if `key` has no value in the bound snapshot.
    pub fn get_or_throw(&self, key: &str) -> Result<&'a T, KeyNotFoundError> {
        primitives::get_or_throw(self.map, key)
    }

    /// See [`primitives::keys`].
    #[must_use]
    pub fn keys(&self) -> Vec<&'a str> {
        primitives::keys(self.map)
    }

    /// See [`primitives::values`].
    #[must_use]
    pub fn values(&self) -> Vec<&'a T> {
        primitives::values(self.map)
    }

    /// See [`primitives::pairs`].
    #[must_use]
    pub fn pairs(&self) -> Vec<Pair<'a, T>> {
        primitives::pairs(self.map)
    }
}

impl<T: Clone> BoundMapper<'_, T> {
    /// See [`primitives::get_value`].
    #[must_use]
    pub fn get_value(&self, key: &str) -> Option<T> {
        primitives::get_value(self.map, key)
    }

    /// See [`KeyedMapper::set_value`].
    #[must_use]
    pub fn set_value(&self, entity: T) -> PersistentMap<T> {
        self.mapper.set_value(self.map, entity)
    }

    /// See [`KeyedMapper::set`].
    #[must_use]
    pub fn set(&self, entity: Option<T>) -> PersistentMap<T> {
        self.mapper.set(self.map, entity)
    }

    /// See [`KeyedMapper::try_add_value`].
    #[must_use]
    pub fn try_add_value(&self, entity: T) -> PersistentMap<T> {
        self.mapper.try_add_value(self.map, entity)
    }

    /// See [`KeyedMapper::remove`].
    #[must_use]
    pub fn remove(&self, entity: &T) -> PersistentMap<T> {
        self.mapper.remove(self.map, entity)
    }

    /// See [`primitives::remove_at`].
    #[must_use]
    pub fn remove_at(&self, key: &str) -> PersistentMap<T> {
        primitives::remove_at(self.map, key)
    }
}
