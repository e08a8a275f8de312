//! Product type as served by the catalog.

use crate::ids::ProductId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// A product in the catalog.
///
/// Mirrors the storefront API record. Unknown fields in the payload are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price as served by the API.
    pub price: f64,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Create a new product.
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        price: f64,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            price,
            image: image.into(),
        }
    }

    /// Unit price in cents.
    pub fn unit_price(&self, currency: Currency) -> Money {
        Money::from_decimal(self.price, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_deserializes_api_payload() {
        let json = r#"{
            "id": 1,
            "title": "Tênis de Caminhada Leve Confortável",
            "price": 179.9,
            "image": "https://example.com/tenis1.jpg",
            "category": "running"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.unit_price(Currency::BRL).amount_cents, 17990);
    }

    #[test]
    fn test_product_missing_field_is_rejected() {
        let json = r#"{ "id": 1, "title": "No price" }"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}
