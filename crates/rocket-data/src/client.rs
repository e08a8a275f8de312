//! Client traits for the two remote lookups.

use std::sync::Arc;

use async_trait::async_trait;
use rocket_commerce::{catalog::Product, catalog::StockRecord, ProductId};

use crate::FetchError;

/// Answers "does product X exist" and "what is its canonical data".
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch a product. `Ok(None)` when the catalog has no such product.
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError>;
}

/// Answers "how many units of product X remain".
#[async_trait]
pub trait StockClient: Send + Sync {
    /// Fetch the stock record for a product.
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError>;
}

#[async_trait]
impl<C: CatalogClient + ?Sized> CatalogClient for Arc<C> {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        (**self).product(id).await
    }
}

#[async_trait]
impl<S: StockClient + ?Sized> StockClient for Arc<S> {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        (**self).stock(id).await
    }
}
