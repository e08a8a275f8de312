//! Stock tracking types.

use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Available units for a product, as served by the stock service.
///
/// The stock endpoint keys records by the product id, so `id` is accepted
/// as an alias for `productId`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockRecord {
    /// Product this record describes.
    #[serde(rename = "productId", alias = "id")]
    pub product_id: ProductId,
    /// Units available.
    pub amount: i64,
}

impl StockRecord {
    /// Create a new stock record.
    pub fn new(product_id: impl Into<ProductId>, amount: i64) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
        }
    }

    /// Check if a specific quantity is available.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        self.amount >= quantity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_availability() {
        let stock = StockRecord::new(5, 3);
        assert!(stock.can_fulfill(3));
        assert!(!stock.can_fulfill(4));
        assert!(!StockRecord::new(5, 0).can_fulfill(1));
    }

    #[test]
    fn test_stock_accepts_id_alias() {
        let stock: StockRecord = serde_json::from_str(r#"{ "id": 2, "amount": 5 }"#).unwrap();
        assert_eq!(stock, StockRecord::new(2, 5));

        let stock: StockRecord =
            serde_json::from_str(r#"{ "productId": 2, "amount": 5 }"#).unwrap();
        assert_eq!(stock.product_id, ProductId::new(2));
    }
}
