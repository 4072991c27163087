//! Persistent string-keyed map with entity mappers and capability-layered handles.
//!
//! The storage is a CHAMP (Compressed Hash-Array Mapped Prefix-tree), a
//! refined HAMT that guarantees **canonical form**: the same set of entries
//! always produces the same trie structure, regardless of edit history.
//! Nodes are immutable and shared between versions through `Arc`, so every
//! edit yields a new [`PersistentMap`] snapshot while the old one stays valid.
//!
//! # Layers
//!
//! - [`PersistentMap`] and the free functions in [`primitives`]: snapshot
//!   reads and copy-on-write edits by explicit key.
//! - [`KeyedMapper`]: the same surface over whole entities, with keys derived
//!   by a caller-supplied function.
//! - [`ReadOnlyHandle`], [`AppendOnlyHandle`], [`ReadWriteHandle`]: stateful
//!   holders of a current snapshot, each exposing a fixed set of edits.
//!
//! # Key properties
//!
//! - **No-op detection by identity**: edits that change nothing return a
//!   snapshot identical to their input ([`PersistentMap::ptr_eq`])
//! - **COW structural sharing**: O(1) clone, O(log₃₂ n) edit
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! ```
//! use keyed_champ::{AppendOnlyHandle, primitives};
//!
//! let m0 = primitives::empty();
//! let m1 = primitives::try_add_value(&m0, "key", "value");
//! let m2 = primitives::try_add_value(&m1, "key", "value2");
//! assert!(m1.ptr_eq(&m2));
//! assert_eq!(primitives::get_value(&m2, "key"), Some("value"));
//!
//! let mut log = AppendOnlyHandle::new(|line: &String| line.clone());
//! assert!(log.try_add_value("boot".to_owned()));
//! assert!(!log.try_add_value("boot".to_owned()));
//! ```
//!
//! # References
//!
//! - Steindorfer & Vinju, 2015. "Optimizing Hash-Array Mapped Tries
//!   for Fast and Lean Immutable JVM Collections", OOPSLA 2015
//! - Bagwell, 2001. "Ideal Hash Trees"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod handle;
pub mod iter;
pub mod keyed;
pub mod primitives;

mod hash;
mod map;
mod node;
mod ops;

#[cfg(test)]
mod tests;

pub use error::KeyNotFoundError;
pub use handle::{AppendOnlyHandle, ReadOnlyHandle, ReadWriteHandle};
pub use keyed::{BoundMapper, KeyFn, KeyedMapper, create_keyed_mapper};
pub use map::PersistentMap;
pub use primitives::Pair;
