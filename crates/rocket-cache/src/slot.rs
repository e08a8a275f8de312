//! A typed handle on one fixed key.

use std::marker::PhantomData;

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Serialize};

/// A single persisted value under a fixed key.
pub struct Slot<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> Slot<T> {
    /// Create a slot for `key`.
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The key this slot writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Delete the persisted value.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}

impl<T: DeserializeOwned> Slot<T> {
    /// Load the persisted value, if any.
    pub fn load(&self) -> Result<Option<T>, CacheError> {
        self.cache.get(&self.key)
    }

    /// Load the persisted value, falling back to `T::default()` when the
    /// slot is empty or holds something that does not parse.
    pub fn load_or_default(&self) -> T
    where
        T: Default,
    {
        match self.load() {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding unreadable slot value");
                T::default()
            }
        }
    }
}

impl<T: Serialize> Slot<T> {
    /// Replace the persisted value.
    pub fn store(&self, value: &T) -> Result<(), CacheError> {
        self.cache.set(&self.key, value)
    }
}

impl<T> Clone for Slot<T> {
    fn clone(&self) -> Self {
        Self::new(self.cache.clone(), self.key.clone())
    }
}

impl<T> std::fmt::Debug for Slot<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Slot").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{KeyValueStore, MemoryStore};

    #[test]
    fn test_load_or_default_on_missing() {
        let slot: Slot<Vec<i64>> = Cache::new(MemoryStore::new()).slot("k");
        assert_eq!(slot.load_or_default(), Vec::<i64>::new());
    }

    #[test]
    fn test_load_or_default_on_garbage() {
        let store = MemoryStore::new().with_value("k", "not json at all");
        let slot: Slot<Vec<i64>> = Cache::new(store).slot("k");
        assert_eq!(slot.load_or_default(), Vec::<i64>::new());
    }

    #[test]
    fn test_store_and_clear() {
        let store = MemoryStore::new();
        let slot: Slot<Vec<i64>> = Cache::new(store.clone()).slot("k");

        slot.store(&vec![1]).unwrap();
        assert!(store.exists("k").unwrap());

        slot.clear().unwrap();
        assert_eq!(slot.load().unwrap(), None);
    }
}
