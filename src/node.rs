//! CHAMP trie node types and bitmap helpers.

use std::sync::Arc;

/// Bits per trie level (5 → 32-way branching).
pub const BITS_PER_LEVEL: u32 = 5;

/// Maximum bit-shift value (depth 12, last level uses 4 bits).
pub const MAX_SHIFT: u32 = 60;

/// Inline entry storing a key-value pair with its precomputed hash.
pub struct Entry<V> {
    /// Precomputed 64-bit hash of the key.
    pub hash: u64,
    /// The key. Shared between every version that still holds the entry.
    pub key: Arc<str>,
    /// The value.
    pub value: V,
}

impl<V> Entry<V> {
    /// Returns `true` if this entry is stored under `key` with `hash`.
    #[inline]
    pub fn matches(&self, hash: u64, key: &str) -> bool {
        self.hash == hash && *self.key == *key
    }
}

impl<V: Clone> Clone for Entry<V> {
    fn clone(&self) -> Self {
        Self {
            hash: self.hash,
            key: Arc::clone(&self.key),
            value: self.value.clone(),
        }
    }
}

/// CHAMP trie node.
///
/// Nodes are never modified after construction. An edit builds a new node
/// for every level on the path to the touched slot and shares all other
/// subtrees with the previous version.
///
/// Two variants maintain the canonical form invariant:
/// - [`Inner`](Self::Inner): bitmap-compressed node at depth `d < D`
/// - [`Collision`](Self::Collision): linear node for full 64-bit hash collisions
pub enum Node<V> {
    /// Bitmap-compressed inner node.
    ///
    /// Invariant: `data_map & node_map == 0` (disjoint positions),
    /// `entries.len() == data_map.count_ones()`,
    /// `children.len() == node_map.count_ones()`.
    Inner {
        /// Bitmap of positions occupied by inline entries.
        data_map: u32,
        /// Bitmap of positions occupied by child subtrees.
        node_map: u32,
        /// Inline entries, ordered by position.
        entries: Box<[Entry<V>]>,
        /// Child subtrees, ordered by position.
        children: Box<[Arc<Self>]>,
    },
    /// Collision node for keys sharing the same 64-bit hash.
    ///
    /// Invariant: `entries.len() >= 2`, keys strictly ascending.
    Collision {
        /// The shared 64-bit hash value.
        hash: u64,
        /// Colliding entries, sorted by key.
        entries: Box<[Entry<V>]>,
    },
}

// ---------------------------------------------------------------------------
// Bitmap helpers
// ---------------------------------------------------------------------------

/// Extracts the 5-bit hash fragment at the given bit-shift depth.
#[inline]
#[must_use]
pub const fn fragment(hash: u64, shift: u32) -> u32 {
    ((hash >> shift) & 0x1F) as u32
}

/// Returns the single-bit mask for the given fragment (0..31).
#[inline]
#[must_use]
pub const fn mask(frag: u32) -> u32 {
    1 << frag
}

/// Returns the compact index of `bit` within `bitmap`.
///
/// Counts the number of set bits below `bit`.
#[inline]
#[must_use]
pub const fn index(bitmap: u32, bit: u32) -> usize {
    (bitmap & (bit - 1)).count_ones() as usize
}

// ---------------------------------------------------------------------------
// Node construction & accessors
// ---------------------------------------------------------------------------

impl<V> Node<V> {
    /// Builds a root-level node holding exactly one entry.
    pub fn singleton(entry: Entry<V>) -> Self {
        Self::Inner {
            data_map: mask(fragment(entry.hash, 0)),
            node_map: 0,
            entries: vec![entry].into_boxed_slice(),
            children: Box::default(),
        }
    }

    /// Canonical form: a subtree with exactly one entry and no children
    /// is stored inline in its parent instead.
    #[must_use]
    pub const fn is_single_entry(&self) -> bool {
        match self {
            Self::Inner {
                data_map, node_map, ..
            } => data_map.is_power_of_two() && *node_map == 0,
            Self::Collision { .. } => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Block builders: every edit copies the touched block once.
// ---------------------------------------------------------------------------

/// Copies `items` with `item` inserted at `at`.
pub fn inserting<T: Clone>(items: &[T], at: usize, item: T) -> Box<[T]> {
    let mut out = Vec::with_capacity(items.len() + 1);
    out.extend_from_slice(&items[..at]);
    out.push(item);
    out.extend_from_slice(&items[at..]);
    out.into_boxed_slice()
}

/// Copies `items` with the element at `at` replaced by `item`.
pub fn replacing<T: Clone>(items: &[T], at: usize, item: T) -> Box<[T]> {
    let mut out = Vec::with_capacity(items.len());
    out.extend_from_slice(&items[..at]);
    out.push(item);
    out.extend_from_slice(&items[at + 1..]);
    out.into_boxed_slice()
}

/// Copies `items` without the element at `at`.
pub fn removing<T: Clone>(items: &[T], at: usize) -> Box<[T]> {
    let mut out = Vec::with_capacity(items.len().saturating_sub(1));
    out.extend_from_slice(&items[..at]);
    out.extend_from_slice(&items[at + 1..]);
    out.into_boxed_slice()
}
