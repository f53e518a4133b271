//! Shared access to a single StringStore
//!
//! The store's algorithms assume exclusive, non-reentrant access: an insert
//! or delete observed halfway through its table shift would expose a
//! mis-ordered table. SharedStore puts the whole store behind one mutex, so
//! every call, reads included, runs alone.
//!
//! Borrowed results (entries, query results) cannot escape the lock; use the
//! closure methods to work with them in place, or the `_owned` helpers to
//! copy them out.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::engine::StringStore;
use crate::error::StoreResult;

/// Cloneable, thread-safe handle to one StringStore.
#[derive(Clone)]
pub struct SharedStore {
    inner: Arc<Mutex<StringStore>>,
}

impl SharedStore {
    /// Create a shared store with the given configuration.
    pub fn open(config: Config) -> StoreResult<Self> {
        Ok(Self::from_store(StringStore::open(config)?))
    }

    /// Take ownership of an existing store.
    pub fn from_store(store: StringStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with shared access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&StringStore) -> R) -> R {
        let store = self.inner.lock();
        f(&store)
    }

    /// Run `f` with exclusive access to the store.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut StringStore) -> R) -> R {
        let mut store = self.inner.lock();
        f(&mut store)
    }

    pub fn store(&self, content: impl AsRef<[u8]>) -> StoreResult<usize> {
        self.with_mut(|s| s.store(content))
    }

    /// Copy of the content at `ordinal`.
    pub fn get_owned(&self, ordinal: usize) -> Option<Vec<u8>> {
        self.with(|s| s.get(ordinal).map(|e| e.content.to_vec()))
    }

    pub fn delete_at(&self, ordinal: usize) -> StoreResult<()> {
        self.with_mut(|s| s.delete_at(ordinal))
    }

    pub fn delete_all(&self, content: impl AsRef<[u8]>) -> usize {
        self.with_mut(|s| s.delete_all(content))
    }

    pub fn alter_at(&self, ordinal: usize, content: impl AsRef<[u8]>) -> StoreResult<usize> {
        self.with_mut(|s| s.alter_at(ordinal, content))
    }

    pub fn alter_all(&self, source: impl AsRef<[u8]>, content: impl AsRef<[u8]>) -> usize {
        self.with_mut(|s| s.alter_all(source, content))
    }

    /// Copies of every exact match, as (content, ordinal) pairs.
    pub fn query_all_owned(&self, content: impl AsRef<[u8]>) -> Vec<(Vec<u8>, usize)> {
        self.with_mut(|s| s.query_all(content).to_owned_matches())
    }

    /// Copies of every substring match, as (content, ordinal) pairs.
    pub fn fuzzy_query_all_owned(&self, content: impl AsRef<[u8]>) -> Vec<(Vec<u8>, usize)> {
        self.with_mut(|s| s.fuzzy_query_all(content).to_owned_matches())
    }

    pub fn defragment(&self) -> usize {
        self.with_mut(|s| s.defragment())
    }

    pub fn clear(&self) {
        self.with_mut(|s| s.clear())
    }

    pub fn count(&self) -> usize {
        self.with(|s| s.count())
    }

    pub fn used_size(&self) -> usize {
        self.with(|s| s.used_size())
    }

    pub fn free_size(&self) -> usize {
        self.with(|s| s.free_size())
    }
}
