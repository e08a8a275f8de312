//! The cart store.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use rocket_cache::{CacheError, Slot};
use rocket_commerce::cart::{Cart, CartSummary};
use rocket_commerce::{CommerceError, Currency, ProductId};
use rocket_data::{CatalogClient, StockClient, TimedClient};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::config::{CartConfig, Messages};
use crate::locks::ProductLocks;
use crate::{CartError, Notifier};

/// The cart-mutating operations, used to pick the shopper-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    Update,
    Clear,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Remove => "remove",
            Operation::Update => "update",
            Operation::Clear => "clear",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the validation half of an add.
enum AddStep {
    Inserted,
    Increment(i64),
}

/// Shopping cart state with validated, persisted mutations.
///
/// Every operation either commits a new cart (in memory, in the durable
/// slot, and to subscribers) or leaves the cart untouched, reports one
/// message through the [`Notifier`] and returns the reason as a
/// [`CartError`].
///
/// Share it behind an `Arc`; all methods take `&self`.
///
/// # Example
///
/// ```rust,ignore
/// let store = CartStore::new(api.clone(), api, cache.slot(DEFAULT_STORAGE_KEY), TracingNotifier);
/// store.add_product(ProductId::new(5)).await?;
/// let mut updates = store.subscribe();
/// ```
pub struct CartStore {
    catalog: Arc<dyn CatalogClient>,
    stock: Arc<dyn StockClient>,
    notifier: Arc<dyn Notifier>,
    slot: Slot<Cart>,
    messages: Messages,
    currency: Currency,
    state: Mutex<Cart>,
    tx: watch::Sender<Cart>,
    locks: ProductLocks,
}

impl CartStore {
    /// Create a store, rehydrating the cart from `slot`.
    ///
    /// An empty slot, or one holding something that does not parse as a
    /// valid cart, yields an empty cart.
    pub fn new(
        catalog: impl CatalogClient + 'static,
        stock: impl StockClient + 'static,
        slot: Slot<Cart>,
        notifier: impl Notifier + 'static,
    ) -> Self {
        let cart = rehydrate(&slot);
        let (tx, _rx) = watch::channel(cart.clone());
        Self {
            catalog: Arc::new(catalog),
            stock: Arc::new(stock),
            notifier: Arc::new(notifier),
            slot,
            messages: Messages::default(),
            currency: Currency::default(),
            state: Mutex::new(cart),
            tx,
            locks: ProductLocks::new(),
        }
    }

    /// Create a store from a config: file-backed slot under `data_dir`,
    /// configured messages, and the configured fetch timeout applied to
    /// both clients.
    pub fn from_config<C, S, N>(
        config: &CartConfig,
        catalog: C,
        stock: S,
        notifier: N,
    ) -> Result<Self, CacheError>
    where
        C: CatalogClient + 'static,
        S: StockClient + 'static,
        N: Notifier + 'static,
    {
        let policy = config.fetch_policy();
        let slot = config.open_cache()?.slot(config.storage_key.clone());
        Ok(Self::new(
            TimedClient::new(catalog, policy),
            TimedClient::new(stock, policy),
            slot,
            notifier,
        )
        .with_messages(config.messages.clone())
        .with_currency(config.currency))
    }

    /// Set the shopper-facing messages.
    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Set the currency used by [`CartStore::summary`].
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Current cart snapshot.
    pub fn cart(&self) -> Cart {
        self.lock_state().clone()
    }

    /// Receive every committed cart. The receiver starts at the current cart.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.tx.subscribe()
    }

    /// Price the current cart.
    pub fn summary(&self) -> Result<CartSummary, CartError> {
        Ok(self.lock_state().summary(self.currency)?)
    }

    /// Add one unit of a product.
    ///
    /// A product not yet in the cart is appended with amount 1. A product
    /// already in the cart is incremented through [`CartStore::update_product_amount`]'s
    /// validation, so a failure on that path is reported as an update failure.
    pub async fn add_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _guard = self.locks.acquire(product_id).await;
        match self.try_add(product_id).await {
            Ok(AddStep::Inserted) => self.report(Operation::Add, product_id, Ok(())),
            Ok(AddStep::Increment(amount)) => {
                let result = self.try_update(product_id, amount).await;
                self.report(Operation::Update, product_id, result)
            }
            Err(e) => self.report(Operation::Add, product_id, Err(e)),
        }
    }

    /// Remove a product's entry.
    pub async fn remove_product(&self, product_id: ProductId) -> Result<(), CartError> {
        let _guard = self.locks.acquire(product_id).await;
        let result = self.commit(|cart| cart.remove(product_id).map(drop));
        self.report(Operation::Remove, product_id, result)
    }

    /// Set a product's amount.
    ///
    /// The product must exist in the catalog and already be in the cart, the
    /// amount must be at least 1, and the stock must cover it.
    pub async fn update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<(), CartError> {
        let _guard = self.locks.acquire(product_id).await;
        let result = self.try_update(product_id, amount).await;
        self.report(Operation::Update, product_id, result)
    }

    /// Empty the cart and delete the persisted value.
    pub fn clear(&self) -> Result<(), CartError> {
        let mut state = self.lock_state();
        if let Err(e) = self.slot.clear() {
            drop(state);
            warn!(operation = "clear", error = %e, "cart operation rejected");
            self.notifier
                .error(self.messages.for_failure(Operation::Clear, false));
            return Err(e.into());
        }
        state.clear();
        self.tx.send_replace(state.clone());
        info!(operation = "clear", "cart cleared");
        Ok(())
    }

    async fn try_add(&self, product_id: ProductId) -> Result<AddStep, CartError> {
        let product = self
            .catalog
            .product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id))?;
        let stock = self.stock.stock(product_id).await?;
        debug!(%product_id, available = stock.amount, "fetched product and stock");

        let in_cart = self.lock_state().get(product_id).map(|e| e.amount);
        let required = match in_cart {
            Some(amount) => amount.checked_add(1).ok_or(CartError::Overflow)?,
            None => 1,
        };
        if !stock.can_fulfill(required) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: required,
                available: stock.amount,
            });
        }

        if in_cart.is_some() {
            return Ok(AddStep::Increment(required));
        }
        self.commit(|cart| cart.insert(product))?;
        Ok(AddStep::Inserted)
    }

    async fn try_update(&self, product_id: ProductId, amount: i64) -> Result<(), CartError> {
        if amount < 1 {
            return Err(CartError::InvalidAmount(amount));
        }
        self.catalog
            .product(product_id)
            .await?
            .ok_or(CartError::ProductNotFound(product_id))?;
        if !self.lock_state().contains(product_id) {
            return Err(CartError::NotInCart(product_id));
        }

        let stock = self.stock.stock(product_id).await?;
        debug!(%product_id, available = stock.amount, requested = amount, "fetched stock");
        if !stock.can_fulfill(amount) {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }

        self.commit(|cart| cart.set_amount(product_id, amount))?;
        Ok(())
    }

    /// Apply `mutate` to the latest cart, persist the result, then publish it.
    ///
    /// Nothing changes if `mutate` or the write fails.
    fn commit<T>(
        &self,
        mutate: impl FnOnce(&mut Cart) -> Result<T, CommerceError>,
    ) -> Result<T, CartError> {
        let mut state = self.lock_state();
        let mut next = state.clone();
        let output = mutate(&mut next)?;
        self.slot.store(&next)?;
        *state = next.clone();
        self.tx.send_replace(next);
        Ok(output)
    }

    fn report(
        &self,
        operation: Operation,
        product_id: ProductId,
        result: Result<(), CartError>,
    ) -> Result<(), CartError> {
        match result {
            Ok(()) => {
                let cart = self.lock_state();
                info!(
                    %operation,
                    %product_id,
                    amount = cart.get(product_id).map(|e| e.amount).unwrap_or(0),
                    items = cart.len(),
                    "cart updated"
                );
                Ok(())
            }
            Err(e) => {
                warn!(%operation, %product_id, error = %e, "cart operation rejected");
                self.notifier
                    .error(self.messages.for_failure(operation, e.is_out_of_stock()));
                Err(e)
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, Cart> {
        // Cart values are replaced whole, so a poisoned lock still holds a valid cart.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("slot", &self.slot)
            .field("cart", &*self.lock_state())
            .finish_non_exhaustive()
    }
}

fn rehydrate(slot: &Slot<Cart>) -> Cart {
    let loaded = slot.load_or_default();
    match Cart::from_entries(loaded.entries().to_vec()) {
        Ok(cart) => {
            debug!(key = slot.key(), items = cart.len(), "rehydrated cart");
            cart
        }
        Err(e) => {
            warn!(key = slot.key(), error = %e, "persisted cart violates invariants, starting empty");
            Cart::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingNotifier;
    use rocket_cache::{Cache, KeyValueStore, MemoryStore};
    use rocket_commerce::catalog::{Product, StockRecord};
    use rocket_data::InMemoryApi;

    const KEY: &str = "@RocketShoes:cart";

    fn api() -> InMemoryApi {
        InMemoryApi::new()
            .with_product(Product::new(5, "Tênis VR Caminhada", 139.9, "vr.jpg"))
            .with_product(Product::new(7, "Tênis de Caminhada Leve", 179.9, "leve.jpg"))
            .with_stock(StockRecord::new(5, 3))
            .with_stock(StockRecord::new(7, 10))
    }

    fn store_with(api: InMemoryApi, store: MemoryStore) -> (CartStore, RecordingNotifier) {
        let notifier = RecordingNotifier::new();
        let cart = CartStore::new(
            api.clone(),
            api,
            Cache::new(store).slot(KEY),
            notifier.clone(),
        );
        (cart, notifier)
    }

    fn amounts(store: &CartStore) -> Vec<(i64, i64)> {
        store
            .cart()
            .iter()
            .map(|e| (e.id().get(), e.amount))
            .collect()
    }

    #[tokio::test]
    async fn test_add_new_product() {
        let (store, notifier) = store_with(api(), MemoryStore::new());

        store.add_product(ProductId::new(5)).await.unwrap();

        assert_eq!(amounts(&store), vec![(5, 1)]);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_add_existing_increments() {
        let (store, _) = store_with(api(), MemoryStore::new());

        store.add_product(ProductId::new(5)).await.unwrap();
        store.add_product(ProductId::new(5)).await.unwrap();

        assert_eq!(amounts(&store), vec![(5, 2)]);
    }

    #[tokio::test]
    async fn test_add_beyond_stock_is_rejected() {
        let api = api();
        api.set_stock(ProductId::new(5), 1);
        let (store, notifier) = store_with(api, MemoryStore::new());

        store.add_product(ProductId::new(5)).await.unwrap();
        let err = store.add_product(ProductId::new(5)).await.unwrap_err();

        assert!(err.is_out_of_stock());
        assert_eq!(amounts(&store), vec![(5, 1)]);
        assert_eq!(notifier.take(), vec!["Quantidade solicitada fora de estoque"]);
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let (store, notifier) = store_with(api(), MemoryStore::new());

        let err = store.add_product(ProductId::new(99)).await.unwrap_err();

        assert!(matches!(err, CartError::ProductNotFound(id) if id == ProductId::new(99)));
        assert!(store.cart().is_empty());
        assert_eq!(notifier.take(), vec!["Erro na adição do produto"]);
    }

    #[tokio::test]
    async fn test_update_sets_amount() {
        let (store, _) = store_with(api(), MemoryStore::new());
        store.add_product(ProductId::new(7)).await.unwrap();

        store
            .update_product_amount(ProductId::new(7), 7)
            .await
            .unwrap();

        assert_eq!(amounts(&store), vec![(7, 7)]);
    }

    #[tokio::test]
    async fn test_update_rejects_amount_below_one() {
        let (store, notifier) = store_with(api(), MemoryStore::new());
        store.add_product(ProductId::new(7)).await.unwrap();

        for amount in [0, -3] {
            let err = store
                .update_product_amount(ProductId::new(7), amount)
                .await
                .unwrap_err();
            assert!(matches!(err, CartError::InvalidAmount(a) if a == amount));
        }

        assert_eq!(amounts(&store), vec![(7, 1)]);
        assert_eq!(
            notifier.take(),
            vec![
                "Erro na alteração de quantidade do produto",
                "Erro na alteração de quantidade do produto"
            ]
        );
    }

    #[tokio::test]
    async fn test_update_product_not_in_cart() {
        let (store, notifier) = store_with(api(), MemoryStore::new());

        let err = store
            .update_product_amount(ProductId::new(5), 2)
            .await
            .unwrap_err();

        assert!(matches!(err, CartError::NotInCart(_)));
        assert_eq!(notifier.take(), vec!["Erro na alteração de quantidade do produto"]);
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, notifier) = store_with(api(), MemoryStore::new());
        store.add_product(ProductId::new(5)).await.unwrap();
        store.add_product(ProductId::new(7)).await.unwrap();

        store.remove_product(ProductId::new(5)).await.unwrap();
        assert_eq!(amounts(&store), vec![(7, 1)]);

        let err = store.remove_product(ProductId::new(5)).await.unwrap_err();
        assert!(matches!(err, CartError::NotInCart(_)));
        assert_eq!(notifier.take(), vec!["Erro na remoção do produto"]);
    }

    #[tokio::test]
    async fn test_network_failure_reports_operation_message() {
        let api = api();
        let (store, notifier) = store_with(api.clone(), MemoryStore::new());
        store.add_product(ProductId::new(5)).await.unwrap();

        api.set_offline(true);
        assert!(matches!(
            store.add_product(ProductId::new(7)).await,
            Err(CartError::Fetch(_))
        ));
        assert!(matches!(
            store.update_product_amount(ProductId::new(5), 2).await,
            Err(CartError::Fetch(_))
        ));

        assert_eq!(amounts(&store), vec![(5, 1)]);
        assert_eq!(
            notifier.take(),
            vec![
                "Erro na adição do produto",
                "Erro na alteração de quantidade do produto"
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_stock_record_is_a_fetch_failure() {
        let api = api().with_product(Product::new(8, "Sem estoque", 99.9, "x.jpg"));
        let (store, notifier) = store_with(api, MemoryStore::new());

        assert!(matches!(
            store.add_product(ProductId::new(8)).await,
            Err(CartError::Fetch(_))
        ));
        assert_eq!(notifier.take(), vec!["Erro na adição do produto"]);
    }

    #[tokio::test]
    async fn test_subscribers_see_commits() {
        let (store, _) = store_with(api(), MemoryStore::new());
        let mut rx = store.subscribe();
        assert!(rx.borrow_and_update().is_empty());

        store.add_product(ProductId::new(5)).await.unwrap();

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);

        let _ = store.remove_product(ProductId::new(99)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_commit_writes_slot() {
        let backend = MemoryStore::new();
        let (store, _) = store_with(api(), backend.clone());

        store.add_product(ProductId::new(5)).await.unwrap();

        let raw = backend.get(KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["id"], 5);
        assert_eq!(value[0]["amount"], 1);
        assert_eq!(value[0]["title"], "Tênis VR Caminhada");
    }

    #[tokio::test]
    async fn test_clear() {
        let backend = MemoryStore::new();
        let (store, _) = store_with(api(), backend.clone());
        store.add_product(ProductId::new(5)).await.unwrap();

        store.clear().unwrap();

        assert!(store.cart().is_empty());
        assert_eq!(backend.get(KEY).unwrap(), None);
    }

    #[test]
    fn test_rehydrate_rejects_duplicate_entries() {
        let raw = r#"[
            {"id": 5, "title": "A", "price": 1.0, "image": "a", "amount": 1},
            {"id": 5, "title": "A", "price": 1.0, "image": "a", "amount": 2}
        ]"#;
        let (store, notifier) = store_with(api(), MemoryStore::new().with_value(KEY, raw));
        assert!(store.cart().is_empty());
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn test_rehydrate_ignores_garbage() {
        let (store, _) = store_with(api(), MemoryStore::new().with_value(KEY, "{oops"));
        assert!(store.cart().is_empty());
    }

    #[tokio::test]
    async fn test_summary_uses_currency() {
        let (store, _) = store_with(api(), MemoryStore::new());
        store.add_product(ProductId::new(5)).await.unwrap();
        store.add_product(ProductId::new(5)).await.unwrap();

        let summary = store.summary().unwrap();
        assert_eq!(summary.total.display(), "R$ 279,80");

        let store = store.with_currency(Currency::USD);
        assert_eq!(store.summary().unwrap().total.display(), "$ 279.80");
    }
}
