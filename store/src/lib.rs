//! Client-side persistence for Gameday.
//!
//! - [`KeyValueStore`] - synchronous string get/set/remove, owned by one session
//! - [`MemoryStore`] - process-local store, used by tests and ephemeral runs
//! - [`FileStore`] - JSON file on disk, replaced atomically on every write
//! - [`PersistenceBinder`] - per-game checklist hydration and persistence

mod binder;
mod file;
mod memory;

pub use binder::{Hydration, PersistenceBinder};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read store at {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to write store at {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode store contents: {0}")]
    Encode(#[from] serde_json::Error),
}

/// String key-value storage scoped to one client.
///
/// Writes are last-writer-wins; there is no cross-process coordination.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}
