#![forbid(unsafe_code)]

//! `localStorage`-backed [`StateStore`], with availability detection.
//!
//! Browsers can disable storage outright (private browsing, embedded
//! contexts) or make every access throw. Availability is probed once with a
//! write/remove round-trip; when the probe fails the page runs on a
//! [`MemoryStore`] for the session and user choices simply do not survive a
//! reload.

use foldout_core::{MemoryStore, StateStore, StorageError};
use tracing::warn;
use web_sys::{Storage, Window};

const PROBE_KEY: &str = "__foldout_probe__";

/// Durable per-origin store.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    /// Open `localStorage` if the host exposes it and it accepts writes.
    #[must_use]
    pub fn probe(window: &Window) -> Option<Self> {
        let storage = window.local_storage().ok()??;
        storage.set_item(PROBE_KEY, PROBE_KEY).ok()?;
        storage.remove_item(PROBE_KEY).ok()?;
        Some(Self { storage })
    }
}

impl StateStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}

/// The store a page load actually runs on: durable when available,
/// in-memory otherwise.
#[derive(Debug, Clone)]
pub enum PageStore {
    Durable(LocalStorageStore),
    Session(MemoryStore),
}

impl PageStore {
    /// Probe durable storage, falling back to the session store.
    #[must_use]
    pub fn detect(window: &Window) -> Self {
        match LocalStorageStore::probe(window) {
            Some(store) => Self::Durable(store),
            None => {
                warn!("localStorage unavailable, panel state will not persist");
                Self::Session(MemoryStore::new())
            }
        }
    }

    #[must_use]
    pub fn is_durable(&self) -> bool {
        matches!(self, Self::Durable(_))
    }
}

impl StateStore for PageStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            Self::Durable(store) => store.get(key),
            Self::Session(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            Self::Durable(store) => store.set(key, value),
            Self::Session(store) => store.set(key, value),
        }
    }
}
