//! Key hashing.
//!
//! Keys are hashed with a fixed-key `SipHash` (`DefaultHasher::new`), so the
//! same key always lands on the same trie path. Canonical form across
//! snapshots depends on this.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Computes the 64-bit hash of a key.
#[must_use]
pub fn hash_key(key: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.hash(&mut hasher);
    hasher.finish()
}
