//! Removal: COW path-copy delete with canonical inlining.

use std::sync::Arc;

use crate::node::{self, Entry, Node};

/// Outcome of a recursive remove.
pub enum RemoveOutcome<V> {
    /// Key was not found; subtree unchanged.
    NotFound,
    /// Key was removed.
    Removed {
        /// New root of the modified subtree, or `None` if the subtree is now empty.
        node: Option<Arc<Node<V>>>,
    },
}

/// Removes `key` from the subtree rooted at `node` via COW path-copy.
pub fn remove_recursive<V: Clone>(
    node: &Node<V>,
    hash: u64,
    key: &str,
    shift: u32,
) -> RemoveOutcome<V> {
    match node {
        Node::Inner {
            data_map,
            node_map,
            entries,
            children,
        } => remove_from_inner(*data_map, *node_map, entries, children, hash, key, shift),
        Node::Collision {
            hash: node_hash,
            entries,
        } => remove_from_collision(*node_hash, entries, hash, key),
    }
}

// ---------------------------------------------------------------------------
// Inner node remove
// ---------------------------------------------------------------------------

fn remove_from_inner<V: Clone>(
    data_map: u32,
    node_map: u32,
    entries: &[Entry<V>],
    children: &[Arc<Node<V>>],
    hash: u64,
    key: &str,
    shift: u32,
) -> RemoveOutcome<V> {
    let bit = node::mask(node::fragment(hash, shift));

    if data_map & bit != 0 {
        let pos = node::index(data_map, bit);
        if !entries[pos].matches(hash, key) {
            return RemoveOutcome::NotFound;
        }

        let new_data_map = data_map & !bit;
        if new_data_map == 0 && node_map == 0 {
            return RemoveOutcome::Removed { node: None };
        }

        let node = Node::Inner {
            data_map: new_data_map,
            node_map,
            entries: node::removing(entries, pos),
            children: children.into(),
        };
        RemoveOutcome::Removed {
            node: Some(Arc::new(node)),
        }
    } else if node_map & bit != 0 {
        let child_pos = node::index(node_map, bit);
        let outcome = remove_recursive(
            &children[child_pos],
            hash,
            key,
            shift + node::BITS_PER_LEVEL,
        );

        let RemoveOutcome::Removed { node: new_child } = outcome else {
            return RemoveOutcome::NotFound;
        };

        let node = match new_child {
            Some(child) if child.is_single_entry() => {
                inline_child(data_map, node_map, entries, children, bit, child_pos, &child)
            }
            // Keep child as subtree, update pointer.
            Some(child) => Node::Inner {
                data_map,
                node_map,
                entries: entries.into(),
                children: node::replacing(children, child_pos, child),
            },
            // Child became empty: drop the slot.
            None => {
                let new_node_map = node_map & !bit;
                if data_map == 0 && new_node_map == 0 {
                    return RemoveOutcome::Removed { node: None };
                }
                Node::Inner {
                    data_map,
                    node_map: new_node_map,
                    entries: entries.into(),
                    children: node::removing(children, child_pos),
                }
            }
        };
        RemoveOutcome::Removed {
            node: Some(Arc::new(node)),
        }
    } else {
        RemoveOutcome::NotFound
    }
}

/// Moves the single entry of `child` into the parent's data block.
fn inline_child<V: Clone>(
    data_map: u32,
    node_map: u32,
    entries: &[Entry<V>],
    children: &[Arc<Node<V>>],
    bit: u32,
    child_pos: usize,
    child: &Node<V>,
) -> Node<V> {
    let inlined = match child {
        Node::Inner { entries, .. } => entries[0].clone(),
        Node::Collision { .. } => unreachable!("collision nodes are never single-entry"),
    };

    let new_data_map = data_map | bit;
    let at = node::index(new_data_map, bit);
    Node::Inner {
        data_map: new_data_map,
        node_map: node_map & !bit,
        entries: node::inserting(entries, at, inlined),
        children: node::removing(children, child_pos),
    }
}

// ---------------------------------------------------------------------------
// Collision node remove
// ---------------------------------------------------------------------------

fn remove_from_collision<V: Clone>(
    node_hash: u64,
    entries: &[Entry<V>],
    hash: u64,
    key: &str,
) -> RemoveOutcome<V> {
    if hash != node_hash {
        return RemoveOutcome::NotFound;
    }
    let Some(pos) = entries.iter().position(|e| *e.key == *key) else {
        return RemoveOutcome::NotFound;
    };

    let node = if entries.len() == 2 {
        // One entry left: hand it up as a single-entry node, the parent inlines it.
        Node::singleton(entries[1 - pos].clone())
    } else {
        Node::Collision {
            hash: node_hash,
            entries: node::removing(entries, pos),
        }
    };
    RemoveOutcome::Removed {
        node: Some(Arc::new(node)),
    }
}
