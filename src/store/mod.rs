//! Durable key-value storage.
//!
//! The score book persists through the [`KeyValueStore`] trait so hosts can
//! plug in whatever durable storage they have. Two implementations ship:
//!
//! - [`MemoryStore`]: process-local map, used in tests
//! - [`FileStore`]: one file per key under a data directory
//!
//! Writes are plain read-modify-write. A host running several engines
//! against one store must add its own locking.

mod file;

pub use file::FileStore;

use rustc_hash::FxHashMap;

use crate::error::StoreResult;

/// String-keyed, string-valued durable storage.
pub trait KeyValueStore {
    /// Read a value. `Ok(None)` if the key was never written.
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a value. Missing keys are not an error.
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}

/// In-memory store.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}
