//! Typed cache wrapper with automatic serialization.

use std::sync::Arc;

use crate::{CacheError, KeyValueStore, Slot};
use serde::{de::DeserializeOwned, Serialize};

/// Type-safe cache over a [`KeyValueStore`].
///
/// Provides automatic JSON serialization for any type that implements
/// `Serialize` and `DeserializeOwned`. Cheap to clone.
pub struct Cache {
    store: Arc<dyn KeyValueStore>,
}

impl Clone for Cache {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl Cache {
    /// Wrap a backend.
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Get a value from the cache.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// text is not valid JSON for `T`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let cart: Option<Cart> = cache.get("@RocketShoes:cart")?;
    /// ```
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CacheError> {
        match self.store.get(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    /// Get the raw stored text.
    pub fn get_raw(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.store.get(key)
    }

    /// Set a value in the cache.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// cache.set("@RocketShoes:cart", &cart)?;
    /// ```
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), CacheError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text)
    }

    /// Delete a value from the cache.
    pub fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.delete(key)
    }

    /// Check if a key exists in the cache.
    pub fn exists(&self, key: &str) -> Result<bool, CacheError> {
        self.store.exists(key)
    }

    /// Typed handle on a single key.
    pub fn slot<T>(&self, key: impl Into<String>) -> Slot<T> {
        Slot::new(self.clone(), key)
    }
}

impl std::fmt::Debug for Cache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cache").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn test_get_missing_is_none() {
        let cache = Cache::new(MemoryStore::new());
        let value: Option<Vec<i64>> = cache.get("missing").unwrap();
        assert!(value.is_none());
    }

    #[test]
    fn test_set_then_get() {
        let cache = Cache::new(MemoryStore::new());
        cache.set("numbers", &vec![3, 1, 2]).unwrap();
        assert_eq!(cache.get_raw("numbers").unwrap().as_deref(), Some("[3,1,2]"));
        assert_eq!(cache.get::<Vec<i64>>("numbers").unwrap(), Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let store = MemoryStore::new().with_value("numbers", "{not json");
        let cache = Cache::new(store);
        assert!(matches!(
            cache.get::<Vec<i64>>("numbers"),
            Err(CacheError::SerializeError(_))
        ));
    }
}
