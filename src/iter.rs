//! Iterator types for persistent maps.

use std::sync::Arc;

use crate::node::Node;

/// Iterator over `(&str, &V)` pairs of a [`PersistentMap`](crate::PersistentMap).
///
/// Order is the trie's depth-first order: unspecified, but identical for
/// every snapshot holding the same entries.
pub struct Iter<'a, V> {
    entries: Vec<(&'a str, &'a V)>,
    pos: usize,
}

impl<'a, V> Iter<'a, V> {
    /// Creates an iterator by collecting all live entries via DFS.
    pub(crate) fn new(root: Option<&'a Arc<Node<V>>>, len: usize) -> Self {
        let mut entries = Vec::with_capacity(len);
        if let Some(node) = root {
            collect(node, &mut entries);
        }
        Self { entries, pos: 0 }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.entries.get(self.pos).copied()?;
        self.pos += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.entries.len() - self.pos;
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// DFS collect all `(&str, &V)` from the subtree rooted at `node`.
///
/// Inline entries of a node come before its children.
fn collect<'a, V>(node: &'a Node<V>, out: &mut Vec<(&'a str, &'a V)>) {
    match node {
        Node::Inner {
            entries, children, ..
        } => {
            out.extend(entries.iter().map(|e| (&*e.key, &e.value)));
            for child in children {
                collect(child, out);
            }
        }
        Node::Collision { entries, .. } => {
            out.extend(entries.iter().map(|e| (&*e.key, &e.value)));
        }
    }
}
