//! Durable key-value slots for RocketShoes.
//!
//! Provides a small string key-value store abstraction with two backends
//! and a typed layer doing JSON serialization on top.
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::{Cache, MemoryStore, Slot};
//!
//! let cache = Cache::new(MemoryStore::new());
//! let slot: Slot<Vec<u32>> = cache.slot("@RocketShoes:cart");
//!
//! slot.store(&vec![1, 2, 3]).unwrap();
//! assert_eq!(slot.load().unwrap(), Some(vec![1, 2, 3]));
//!
//! slot.clear().unwrap();
//! assert_eq!(slot.load().unwrap(), None);
//! ```

mod error;
mod kv;
mod slot;
mod store;

pub use error::CacheError;
pub use kv::Cache;
pub use slot::Slot;
pub use store::{FileStore, KeyValueStore, MemoryStore};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, FileStore, KeyValueStore, MemoryStore, Slot};
}
