//! Error types.

use thiserror::Error;

/// A lookup that requires a value found none.
///
/// Returned by the `get_or_throw` family; every other operation is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no non-null value exists for key, '{key}'")]
pub struct KeyNotFoundError {
    key: String,
}

impl KeyNotFoundError {
    /// Creates an error for the missing `key`.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Returns the key that had no value.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}
