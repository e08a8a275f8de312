//! Cart and cart entry types.

use std::collections::BTreeMap;

use crate::cart::{CartSummary, EntrySummary};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A shopping cart.
///
/// Entries keep insertion order and hold at most one entry per product id.
/// Serializes as a bare JSON array of entries, which is the persisted form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from entries, rejecting duplicates and amounts below 1.
    pub fn from_entries(entries: Vec<CartEntry>) -> Result<Self, CommerceError> {
        let mut cart = Self::new();
        for entry in entries {
            if entry.amount < 1 {
                return Err(CommerceError::InvalidQuantity(entry.amount));
            }
            if cart.contains(entry.id()) {
                return Err(CommerceError::AlreadyInCart(entry.id()));
            }
            cart.entries.push(entry);
        }
        Ok(cart)
    }

    /// Append a product with amount 1.
    pub fn insert(&mut self, product: Product) -> Result<(), CommerceError> {
        if self.contains(product.id) {
            return Err(CommerceError::AlreadyInCart(product.id));
        }
        self.entries.push(CartEntry::new(product, 1));
        Ok(())
    }

    /// Set the amount of an entry already in the cart.
    ///
    /// Amounts below 1 are rejected; use [`Cart::remove`] to drop an entry.
    pub fn set_amount(&mut self, product_id: ProductId, amount: i64) -> Result<(), CommerceError> {
        if amount < 1 {
            return Err(CommerceError::InvalidQuantity(amount));
        }
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id() == product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        entry.amount = amount;
        Ok(())
    }

    /// Remove an entry, returning it.
    pub fn remove(&mut self, product_id: ProductId) -> Result<CartEntry, CommerceError> {
        let index = self
            .entries
            .iter()
            .position(|e| e.id() == product_id)
            .ok_or(CommerceError::ItemNotInCart(product_id))?;
        Ok(self.entries.remove(index))
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Get an entry by product id.
    pub fn get(&self, product_id: ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.id() == product_id)
    }

    /// Check if a product is in the cart.
    pub fn contains(&self, product_id: ProductId) -> bool {
        self.get(product_id).is_some()
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total units across all entries.
    pub fn item_count(&self) -> i64 {
        self.entries.iter().map(|e| e.amount).sum()
    }

    /// Selected amount per product id.
    pub fn amounts(&self) -> BTreeMap<ProductId, i64> {
        self.entries.iter().map(|e| (e.id(), e.amount)).collect()
    }

    /// Price every entry and total the cart.
    pub fn summary(&self, currency: Currency) -> Result<CartSummary, CommerceError> {
        let entries = self
            .entries
            .iter()
            .map(|e| {
                Ok(EntrySummary {
                    product_id: e.id(),
                    title: e.product.title.clone(),
                    unit_price: e.product.unit_price(currency),
                    amount: e.amount,
                    subtotal: e.subtotal(currency)?,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let total = Money::try_sum(entries.iter().map(|e| &e.subtotal), currency)
            .ok_or(CommerceError::Overflow)?;

        Ok(CartSummary {
            entries,
            item_count: self.item_count(),
            total,
        })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartEntry;
    type IntoIter = std::slice::Iter<'a, CartEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// A product selected into the cart, with its amount.
///
/// Serializes flat: the product fields plus `amount`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartEntry {
    /// Product snapshot taken when the entry was created.
    #[serde(flatten)]
    pub product: Product,
    /// Units selected.
    pub amount: i64,
}

impl CartEntry {
    /// Create a new entry.
    pub fn new(product: Product, amount: i64) -> Self {
        Self { product, amount }
    }

    /// Product id of this entry.
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times amount.
    pub fn subtotal(&self, currency: Currency) -> Result<Money, CommerceError> {
        self.product
            .unit_price(currency)
            .try_multiply(self.amount)
            .ok_or(CommerceError::Overflow)
    }
}
