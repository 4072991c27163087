//! Path-copying trie operations. Each takes a node by reference and returns
//! freshly allocated replacements; the input subtree is never touched.

pub mod get;
pub mod insert;
pub mod remove;
