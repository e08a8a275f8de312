//! Cart price summaries.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Priced view of a cart, in cart order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Per-entry pricing.
    pub entries: Vec<EntrySummary>,
    /// Total units across all entries.
    pub item_count: i64,
    /// Sum of entry subtotals.
    pub total: Money,
}

impl CartSummary {
    /// Number of distinct products.
    pub fn distinct_items(&self) -> usize {
        self.entries.len()
    }
}

/// Pricing for a single cart entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EntrySummary {
    /// Product id.
    pub product_id: ProductId,
    /// Product title.
    pub title: String,
    /// Unit price.
    pub unit_price: Money,
    /// Units selected.
    pub amount: i64,
    /// Subtotal (unit_price * amount).
    pub subtotal: Money,
}
