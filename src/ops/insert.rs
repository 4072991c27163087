//! Insertion: COW path-copy insert.

use std::sync::Arc;

use crate::node::{self, Entry, Node};

/// Outcome of a recursive insert.
pub struct InsertOutcome<V> {
    /// New (path-copied) root of the modified subtree.
    pub node: Arc<Node<V>>,
    /// `true` if a new key was inserted, `false` if an existing value was replaced.
    pub inserted: bool,
}

/// Inserts `entry` into the subtree rooted at `node` via COW path-copy.
pub fn insert_recursive<V: Clone>(node: &Node<V>, entry: Entry<V>, shift: u32) -> InsertOutcome<V> {
    match node {
        Node::Inner {
            data_map,
            node_map,
            entries,
            children,
        } => insert_into_inner(*data_map, *node_map, entries, children, entry, shift),
        Node::Collision { hash, entries } => insert_into_collision(*hash, entries, entry),
    }
}

// ---------------------------------------------------------------------------
// Inner node insert
// ---------------------------------------------------------------------------

fn insert_into_inner<V: Clone>(
    data_map: u32,
    node_map: u32,
    entries: &[Entry<V>],
    children: &[Arc<Node<V>>],
    entry: Entry<V>,
    shift: u32,
) -> InsertOutcome<V> {
    let bit = node::mask(node::fragment(entry.hash, shift));

    if data_map & bit != 0 {
        let pos = node::index(data_map, bit);
        let existing = &entries[pos];

        if existing.matches(entry.hash, &entry.key) {
            // Same key → replace value.
            let node = Node::Inner {
                data_map,
                node_map,
                entries: node::replacing(entries, pos, entry),
                children: children.into(),
            };
            InsertOutcome {
                node: Arc::new(node),
                inserted: false,
            }
        } else {
            // Different key at same position → push both into a subtree.
            let subtree = create_subtree(existing.clone(), entry, shift + node::BITS_PER_LEVEL);

            let new_node_map = node_map | bit;
            let child_pos = node::index(new_node_map, bit);
            let node = Node::Inner {
                data_map: data_map & !bit,
                node_map: new_node_map,
                entries: node::removing(entries, pos),
                children: node::inserting(children, child_pos, subtree),
            };
            InsertOutcome {
                node: Arc::new(node),
                inserted: true,
            }
        }
    } else if node_map & bit != 0 {
        // Position has child subtree → recurse.
        let child_pos = node::index(node_map, bit);
        let outcome = insert_recursive(&children[child_pos], entry, shift + node::BITS_PER_LEVEL);

        let node = Node::Inner {
            data_map,
            node_map,
            entries: entries.into(),
            children: node::replacing(children, child_pos, outcome.node),
        };
        InsertOutcome {
            node: Arc::new(node),
            inserted: outcome.inserted,
        }
    } else {
        // Position empty → add inline entry.
        let new_data_map = data_map | bit;
        let at = node::index(new_data_map, bit);
        let node = Node::Inner {
            data_map: new_data_map,
            node_map,
            entries: node::inserting(entries, at, entry),
            children: children.into(),
        };
        InsertOutcome {
            node: Arc::new(node),
            inserted: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Collision node insert
// ---------------------------------------------------------------------------

fn insert_into_collision<V: Clone>(
    hash: u64,
    entries: &[Entry<V>],
    entry: Entry<V>,
) -> InsertOutcome<V> {
    let (entries, inserted) = match entries.binary_search_by(|e| e.key.cmp(&entry.key)) {
        Ok(pos) => (node::replacing(entries, pos, entry), false),
        Err(at) => (node::inserting(entries, at, entry), true),
    };
    InsertOutcome {
        node: Arc::new(Node::Collision { hash, entries }),
        inserted,
    }
}

// ---------------------------------------------------------------------------
// Subtree creation
// ---------------------------------------------------------------------------

/// Creates a subtree from two entries that collide at the current depth.
///
/// Recursively descends until hash fragments differ, or creates a collision
/// node past `MAX_SHIFT`.
fn create_subtree<V>(e1: Entry<V>, e2: Entry<V>, shift: u32) -> Arc<Node<V>> {
    if shift > node::MAX_SHIFT {
        let hash = e1.hash;
        let entries = if e1.key < e2.key { vec![e1, e2] } else { vec![e2, e1] };
        return Arc::new(Node::Collision {
            hash,
            entries: entries.into_boxed_slice(),
        });
    }

    let f1 = node::fragment(e1.hash, shift);
    let f2 = node::fragment(e2.hash, shift);

    if f1 == f2 {
        let child = create_subtree(e1, e2, shift + node::BITS_PER_LEVEL);
        Arc::new(Node::Inner {
            data_map: 0,
            node_map: node::mask(f1),
            entries: Box::default(),
            children: vec![child].into_boxed_slice(),
        })
    } else {
        let entries = if f1 < f2 { vec![e1, e2] } else { vec![e2, e1] };
        Arc::new(Node::Inner {
            data_map: node::mask(f1) | node::mask(f2),
            node_map: 0,
            entries: entries.into_boxed_slice(),
            children: Box::default(),
        })
    }
}
