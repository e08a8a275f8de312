//! Per-product operation queue.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use rocket_commerce::ProductId;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type LockMap = HashMap<ProductId, Arc<AsyncMutex<()>>>;

/// Serializes operations that touch the same product.
///
/// Waiters are served in FIFO order (tokio's mutex is fair), so concurrent
/// operations on one product run in the order they were issued. An entry
/// lives only while someone holds or waits for it.
#[derive(Debug, Default)]
pub(crate) struct ProductLocks {
    locks: Arc<Mutex<LockMap>>,
}

impl ProductLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `id`.
    pub(crate) async fn acquire(&self, id: ProductId) -> ProductGuard {
        let lock = Arc::clone(lock_map(&self.locks).entry(id).or_default());
        let guard = lock.lock_owned().await;
        ProductGuard {
            id,
            locks: Arc::clone(&self.locks),
            guard: Some(guard),
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        lock_map(&self.locks).len()
    }
}

/// Exclusive access to one product. Dropping it releases the product and
/// forgets the entry if nobody else is queued.
#[derive(Debug)]
pub(crate) struct ProductGuard {
    id: ProductId,
    locks: Arc<Mutex<LockMap>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for ProductGuard {
    fn drop(&mut self) {
        // Release the async mutex first so its Arc no longer counts.
        drop(self.guard.take());
        let mut locks = lock_map(&self.locks);
        if locks
            .get(&self.id)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&self.id);
        }
    }
}

fn lock_map(locks: &Mutex<LockMap>) -> MutexGuard<'_, LockMap> {
    // The map only holds Arcs; a panic elsewhere cannot leave it inconsistent.
    locks.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_product_is_exclusive() {
        let locks = ProductLocks::new();
        let guard = locks.acquire(ProductId::new(1)).await;

        let blocked =
            tokio::time::timeout(Duration::from_millis(20), locks.acquire(ProductId::new(1))).await;
        assert!(blocked.is_err());

        drop(guard);
        let _again = locks.acquire(ProductId::new(1)).await;
    }

    #[tokio::test]
    async fn test_different_products_do_not_block() {
        let locks = ProductLocks::new();
        let _one = locks.acquire(ProductId::new(1)).await;
        let _two = locks.acquire(ProductId::new(2)).await;
    }

    #[tokio::test]
    async fn test_released_entries_are_forgotten() {
        let locks = ProductLocks::new();

        for id in 0..10_000 {
            let _guard = locks.acquire(ProductId::new(id)).await;
        }

        assert_eq!(locks.len(), 0);
    }

    #[tokio::test]
    async fn test_entry_kept_while_waiter_queued() {
        let locks = Arc::new(ProductLocks::new());
        let first = locks.acquire(ProductId::new(7)).await;

        let waiter = {
            let locks = Arc::clone(&locks);
            tokio::spawn(async move {
                let _second = locks.acquire(ProductId::new(7)).await;
                locks.len()
            })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;

        drop(first);
        assert_eq!(locks.len(), 1);

        // The waiter sees its own entry while holding it.
        assert_eq!(waiter.await.unwrap(), 1);
        assert_eq!(locks.len(), 0);
    }
}
