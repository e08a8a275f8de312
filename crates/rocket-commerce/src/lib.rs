//! Cart domain types for the RocketShoes storefront.
//!
//! - **Catalog**: products and stock records as served by the storefront API
//! - **Cart**: the ordered cart value, its entries, and price summaries
//!
//! Everything here is pure data manipulation. Fetching, persistence and
//! notification live in `rocket-data`, `rocket-cache` and `rocket-cart`.
//!
//! # Example
//!
//! ```rust
//! use rocket_commerce::prelude::*;
//!
//! let mut cart = Cart::new();
//! cart.insert(Product::new(5, "Tênis VR Caminhada", 139.9, "tenis.jpg")).unwrap();
//! cart.set_amount(ProductId::new(5), 2).unwrap();
//!
//! let summary = cart.summary(Currency::BRL).unwrap();
//! assert_eq!(summary.total.display(), "R$ 279,80");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{Product, StockRecord};

    // Cart
    pub use crate::cart::{Cart, CartEntry, CartSummary, EntrySummary};
}
