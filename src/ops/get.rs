//! Lookup: traverses the trie to find a key.

use crate::node::{self, Entry, Node};

/// Searches for `key` in the subtree rooted at `node`.
///
/// Returns the stored entry if found.
pub fn get_recursive<'a, V>(
    node: &'a Node<V>,
    hash: u64,
    key: &str,
    shift: u32,
) -> Option<&'a Entry<V>> {
    match node {
        Node::Inner {
            data_map,
            node_map,
            entries,
            children,
        } => {
            let bit = node::mask(node::fragment(hash, shift));

            if data_map & bit != 0 {
                // Position has an inline entry.
                let entry = &entries[node::index(*data_map, bit)];
                entry.matches(hash, key).then_some(entry)
            } else if node_map & bit != 0 {
                // Position has a child subtree, recurse.
                let child = &children[node::index(*node_map, bit)];
                get_recursive(child, hash, key, shift + node::BITS_PER_LEVEL)
            } else {
                None
            }
        }
        Node::Collision {
            hash: node_hash,
            entries,
        } => {
            if hash != *node_hash {
                return None;
            }
            entries.iter().find(|e| *e.key == *key)
        }
    }
}
