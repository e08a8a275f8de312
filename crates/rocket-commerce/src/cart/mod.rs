//! Shopping cart module.
//!
//! Contains the cart value, its entries, and price summaries.

mod cart;
mod summary;

pub use cart::{Cart, CartEntry};
pub use summary::{CartSummary, EntrySummary};
