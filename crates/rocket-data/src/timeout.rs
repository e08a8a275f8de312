//! Timeout configuration for fetch operations.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use rocket_commerce::{catalog::Product, catalog::StockRecord, ProductId};

use crate::{CatalogClient, Dependency, FetchError, StockClient};

/// Per-fetch policy.
///
/// With no timeout a fetch that never resolves keeps the calling operation
/// waiting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Total time allowed for one fetch.
    pub timeout: Option<Duration>,
}

impl FetchPolicy {
    /// Wait indefinitely.
    pub fn unbounded() -> Self {
        Self { timeout: None }
    }

    /// Give up after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
        }
    }

    /// Build from an optional millisecond count, as found in config files.
    pub fn from_millis(millis: Option<u64>) -> Self {
        Self {
            timeout: millis.map(Duration::from_millis),
        }
    }

    /// Run `fut` under this policy.
    pub async fn run<T, F>(&self, dependency: Dependency, fut: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        match self.timeout {
            None => fut.await,
            Some(after) => match tokio::time::timeout(after, fut).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(dependency = dependency.name(), ?after, "fetch timed out");
                    Err(FetchError::Timeout { dependency, after })
                }
            },
        }
    }
}

/// Wraps a client and applies a [`FetchPolicy`] to every call.
#[derive(Debug, Clone)]
pub struct TimedClient<C> {
    inner: C,
    policy: FetchPolicy,
}

impl<C> TimedClient<C> {
    /// Wrap `inner`.
    pub fn new(inner: C, policy: FetchPolicy) -> Self {
        Self { inner, policy }
    }
}

#[async_trait]
impl<C: CatalogClient> CatalogClient for TimedClient<C> {
    async fn product(&self, id: ProductId) -> Result<Option<Product>, FetchError> {
        self.policy
            .run(Dependency::Catalog, self.inner.product(id))
            .await
    }
}

#[async_trait]
impl<C: StockClient> StockClient for TimedClient<C> {
    async fn stock(&self, id: ProductId) -> Result<StockRecord, FetchError> {
        self.policy.run(Dependency::Stock, self.inner.stock(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemoryApi;

    #[tokio::test(start_paused = true)]
    async fn test_timeout_fires_on_slow_client() {
        let api = InMemoryApi::new()
            .with_stock(StockRecord::new(1, 3))
            .with_latency(Duration::from_secs(10));
        let client = TimedClient::new(api, FetchPolicy::with_timeout(Duration::from_millis(50)));

        let err = client.stock(ProductId::new(1)).await.unwrap_err();
        assert_eq!(
            err,
            FetchError::Timeout {
                dependency: Dependency::Stock,
                after: Duration::from_millis(50),
            }
        );
    }

    #[tokio::test]
    async fn test_unbounded_passes_through() {
        let api = InMemoryApi::new().with_stock(StockRecord::new(1, 3));
        let client = TimedClient::new(api, FetchPolicy::unbounded());

        let stock = client.stock(ProductId::new(1)).await.unwrap();
        assert_eq!(stock.amount, 3);
    }

    #[test]
    fn test_from_millis() {
        assert_eq!(FetchPolicy::from_millis(None), FetchPolicy::unbounded());
        assert_eq!(
            FetchPolicy::from_millis(Some(250)).timeout,
            Some(Duration::from_millis(250))
        );
    }
}
