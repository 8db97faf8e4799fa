#![forbid(unsafe_code)]

//! Persistence port for per-panel open/closed choices.
//!
//! The durable store is modeled as an injected key-value port rather than an
//! ambient global, so the controller can run against `localStorage` in the
//! browser, [`MemoryStore`] in tests, and [`MemoryStore`] again as the
//! degraded in-session fallback when durable storage is unavailable.
//!
//! # Invariants
//!
//! 1. Keys follow `"{namespace}-open-{index}"`; values are exactly `"true"`
//!    or `"false"`.
//! 2. Absence of a key is a meaningful third state ("apply default policy"),
//!    distinct from `"false"`.
//! 3. `get` is infallible by contract: a backend that cannot read reports
//!    `None` and the default policy applies.

use std::collections::HashMap;

use thiserror::Error;

/// Failure writing to the durable store.
///
/// Never fatal: the controller downgrades to in-memory state for the rest of
/// the session on the first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store rejected the write or is disabled by the host.
    #[error("durable storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-value port the controller persists through.
pub trait StateStore {
    /// Read a previously persisted value, `None` when no choice was stored.
    fn get(&self, key: &str) -> Option<String>;

    /// Persist a value under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store: test double and storage-unavailable fallback.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Build the persistence key for a panel position.
#[must_use]
pub fn storage_key(namespace: &str, index: usize) -> String {
    format!("{namespace}-open-{index}")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn storage_key_embeds_namespace_and_index() {
        assert_eq!(storage_key("panel", 0), "panel-open-0");
        assert_eq!(storage_key("dropdown", 17), "dropdown-open-17");
    }

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("panel-open-0"), None);
        store.set("panel-open-0", "true").unwrap();
        assert_eq!(store.get("panel-open-0").as_deref(), Some("true"));
        store.set("panel-open-0", "false").unwrap();
        assert_eq!(store.get("panel-open-0").as_deref(), Some("false"));
        assert_eq!(store.len(), 1);
    }
}
