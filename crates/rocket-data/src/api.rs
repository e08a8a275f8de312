//! In-process storefront API.
//!
//! Serves products and stock from memory. Can be seeded from a json-server
//! style `db.json` fixture:
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "...", "price": 179.9, "image": "..." }],
//!   "stock": [{ "id": 1, "amount": 3 }]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use rocket_commerce::{catalog::Product, catalog::StockRecord, ProductId};
use serde::Deserialize;

use crate::{CatalogClient, FetchError, StockClient};

/// On-disk fixture layout.
#[derive(Debug, Default, Deserialize)]
struct Db {
    #[serde(default)]
    products: Vec<Product>,
    #[serde(default)]
    stock: Vec<StockRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    products: RwLock<HashMap<ProductId, Product>>,
    stock: RwLock<HashMap<ProductId, i64>>,
    offline: AtomicBool,
    calls: AtomicU64,
}

/// Catalog and stock client backed by in-memory maps.
///
/// Clones share state, so a test can keep one handle to adjust stock while
/// the store under test owns another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryApi {
    inner: Arc<Inner>,
    latency: Option<Duration>,
}

impl InMemoryApi {
    /// Create an empty API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `db.json` fixture.
    pub fn from_db_json(text: &str) -> Result<Self, FetchError> {
        let db: Db = serde_json::from_str(text)?;
        let api = Self::new();
        for product in db.products {
            api.put_product(product);
        }
        for record in db.stock {
            api.set_stock(record.product_id, record.amount);
        }
        Ok(api)
    }

    /// Read and parse a `db.json` fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FetchError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Connection(format!("{}: {}", path.display(), e)))?;
        Self::from_db_json(&text)
    }

    /// Add a product.
    pub fn with_product(self, product: Product) -> Self {
        self.put_product(product);
        self
    }

    /// Add a stock record.
    pub fn with_stock(self, record: StockRecord) -> Self {
        self.set_stock(record.product_id, record.amount);
        self
    }

    /// Delay every fetch by `latency`.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Insert or replace a product.
    pub fn put_product(&self, product: Product) {
        self.inner
            .products
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(product.id, product);
    }

    /// Drop a product from the catalog.
    pub fn remove_product(&self, id: ProductId) {
        self.inner
            .products
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&id);
    }

    /// Set the available units for a product.
    pub fn set_stock(&self, id: ProductId, amount: i64) {
        self.inner
            .stock
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id, amount);
    }

    /// Make every fetch fail with a connection error.
    pub fn set_offline(&self, offline: bool) {
        self.inner.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of fetches served or refused so far.
    pub fn calls(&self) -> u64 {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// All products, ordered by id.
    pub fn products(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .inner
            .products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .cloned()
            .collect();
        products.sort_by_key(|p| p.id);
        products
    }

    async fn begin(&self, path: &str) -> Result<(), FetchError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if self.inner.offline.load(Ordering::SeqCst) {
            return Err(FetchError::Connection(format!("{} unreachable", path)));
        }
        tracing::debug!(path, "serving fetch");
        Ok(())
    }
}

#[async_trait]
impl CatalogClient for InMemoryApi {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        self.begin(&format!("/products/{}", id)).await?;
        Ok(self
            .inner
            .products
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .cloned())
    }
}

#[async_trait]
impl StockClient for InMemoryApi {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        let path = format!("/stock/{}", id);
        self.begin(&path).await?;
        let amount = self
            .inner
            .stock
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&id)
            .copied();
        amount
            .map(|amount| StockRecord::new(id, amount))
            .ok_or_else(|| FetchError::not_found(path))
    }
}
