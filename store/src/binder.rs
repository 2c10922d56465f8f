//! Per-game checklist persistence.
//!
//! The binder gates hydration on two facts arriving in any order: the template
//! has been resolved (fetched and normalized, or replaced by the fallback), and
//! a game with a usable [`StorageKey`] is known. Once both hold, the stored
//! snapshot for that key is loaded at most once. From then on every persisted
//! model overwrites the snapshot under the same key.
//!
//! Snapshots for other games are never touched.

use serde_json::Value;

use gameday_core::normalize;
use gameday_types::{ChecklistModel, Game, StorageKey};

use crate::KeyValueStore;

/// Result of a hydration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Hydration {
    /// Template or keyed game still missing; try again when the other lands.
    NotReady,
    /// This key was already hydrated; the in-memory model is authoritative.
    AlreadyHydrated,
    /// Nothing stored for this game; keep the template.
    Empty,
    /// A stored snapshot replaces the template.
    Restored(ChecklistModel),
    /// The stored snapshot was corrupt and has been ignored.
    Discarded,
}

#[derive(Debug)]
pub struct PersistenceBinder<S> {
    store: S,
    key: Option<StorageKey>,
    template_ready: bool,
    hydrated: bool,
}

impl<S: KeyValueStore> PersistenceBinder<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: None,
            template_ready: false,
            hydrated: false,
        }
    }

    /// Record that the template has been resolved at least once.
    pub fn mark_template_ready(&mut self) {
        self.template_ready = true;
    }

    /// Bind the active game. A different key re-arms hydration for that key;
    /// a game without a key disables persistence.
    pub fn bind_game(&mut self, game: Option<&Game>) {
        let key = game.and_then(Game::storage_key);
        if key != self.key {
            tracing::debug!(
                key = key.as_ref().map(StorageKey::as_str),
                "Bound checklist storage key"
            );
            self.key = key;
            self.hydrated = false;
        }
    }

    #[must_use]
    pub fn storage_key(&self) -> Option<&StorageKey> {
        self.key.as_ref()
    }

    #[must_use]
    pub fn is_hydrated(&self) -> bool {
        self.hydrated
    }

    /// Load the stored snapshot for the bound game, once.
    pub fn try_hydrate(&mut self) -> Hydration {
        if !self.template_ready {
            return Hydration::NotReady;
        }
        let Some(key) = self.key.as_ref() else {
            return Hydration::NotReady;
        };
        if self.hydrated {
            return Hydration::AlreadyHydrated;
        }
        self.hydrated = true;

        let Some(stored) = self.store.get(key.as_str()) else {
            tracing::debug!(key = key.as_str(), "No stored checklist for game");
            return Hydration::Empty;
        };

        match serde_json::from_str::<Value>(&stored) {
            Ok(raw) if !raw.is_object() => {
                tracing::warn!(key = key.as_str(), "Discarding stored checklist that is not an object");
                Hydration::Discarded
            }
            Ok(raw) => {
                tracing::info!(key = key.as_str(), "Restored checklist progress");
                Hydration::Restored(normalize(&raw))
            }
            Err(e) => {
                tracing::warn!(key = key.as_str(), "Discarding unreadable stored checklist: {e}");
                Hydration::Discarded
            }
        }
    }

    /// Store `model` under the bound key.
    ///
    /// Skipped until the bound key has been hydrated. Write failures are
    /// logged and absorbed. Returns `true` if the snapshot was written.
    pub fn persist(&mut self, model: &ChecklistModel) -> bool {
        if !self.hydrated {
            return false;
        }
        let Some(key) = self.key.as_ref() else {
            return false;
        };

        let json = match serde_json::to_string(model) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(key = key.as_str(), "Failed to encode checklist: {e}");
                return false;
            }
        };

        match self.store.set(key.as_str(), &json) {
            Ok(()) => {
                tracing::debug!(key = key.as_str(), bytes = json.len(), "Persisted checklist");
                true
            }
            Err(e) => {
                tracing::warn!(key = key.as_str(), "Failed to persist checklist: {e}");
                false
            }
        }
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
