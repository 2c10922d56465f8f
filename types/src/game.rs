//! The active game and the persistence partition derived from it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix applied to a [`GameKey`] to form the store key for checklist progress.
pub const STORAGE_KEY_PREFIX: &str = "sections_";

/// Game record as served by the game provider.
///
/// Fields the provider omits deserialize as empty strings. Never mutated by
/// the checklist core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Game {
    pub opponent: String,
    pub date: String,
    pub time: String,
    pub manager_name: String,
}

impl Game {
    /// Derive the persistence partition, if both `date` and `opponent` are present.
    #[must_use]
    pub fn key(&self) -> Option<GameKey> {
        GameKey::new(&self.date, &self.opponent)
    }

    #[must_use]
    pub fn storage_key(&self) -> Option<StorageKey> {
        self.key().map(|key| key.storage_key())
    }
}

/// `date + "_" + opponent`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameKey(String);

impl GameKey {
    #[must_use]
    pub fn new(date: &str, opponent: &str) -> Option<Self> {
        if date.is_empty() || opponent.is_empty() {
            return None;
        }
        Some(Self(format!("{date}_{opponent}")))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn storage_key(&self) -> StorageKey {
        StorageKey(format!("{STORAGE_KEY_PREFIX}{}", self.0))
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store key under which one game's checklist snapshot lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StorageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
