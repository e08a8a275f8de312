//! Cart store for the RocketShoes storefront.
//!
//! [`CartStore`] keeps the shopper's cart in memory, mirrors it to a durable
//! key-value slot, and exposes three validated mutations:
//!
//! - [`CartStore::add_product`] - add one unit, checking catalog and stock
//! - [`CartStore::remove_product`] - drop a product's entry
//! - [`CartStore::update_product_amount`] - set an amount, checking stock
//!
//! A rejected mutation leaves the cart untouched, shows one message through
//! the [`Notifier`], and returns a [`CartError`] saying why.
//!
//! # Example
//!
//! ```rust
//! use rocket_cache::{Cache, MemoryStore};
//! use rocket_cart::{CartStore, RecordingNotifier, DEFAULT_STORAGE_KEY};
//! use rocket_commerce::prelude::*;
//! use rocket_data::InMemoryApi;
//!
//! # tokio_test_runtime(async {
//! let api = InMemoryApi::new()
//!     .with_product(Product::new(5, "Tênis VR Caminhada", 139.9, "vr.jpg"))
//!     .with_stock(StockRecord::new(5, 3));
//! let notifier = RecordingNotifier::new();
//! let store = CartStore::new(
//!     api.clone(),
//!     api,
//!     Cache::new(MemoryStore::new()).slot(DEFAULT_STORAGE_KEY),
//!     notifier.clone(),
//! );
//!
//! store.add_product(ProductId::new(5)).await.unwrap();
//! assert_eq!(store.cart().get(ProductId::new(5)).unwrap().amount, 1);
//!
//! assert!(store.add_product(ProductId::new(6)).await.is_err());
//! assert_eq!(notifier.messages(), vec!["Erro na adição do produto"]);
//! # });
//! # fn tokio_test_runtime(f: impl std::future::Future<Output = ()>) {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod config;
mod error;
mod locks;
mod notifier;
mod store;

pub use config::{CartConfig, Messages, DEFAULT_STORAGE_KEY};
pub use error::CartError;
pub use notifier::{Notifier, RecordingNotifier, TracingNotifier};
pub use store::{CartStore, Operation};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        CartConfig, CartError, CartStore, Messages, Notifier, Operation, RecordingNotifier,
        TracingNotifier, DEFAULT_STORAGE_KEY,
    };
}
