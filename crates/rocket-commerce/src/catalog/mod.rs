//! Product catalog module.
//!
//! Contains the product record served by the catalog and the stock record
//! served by the stock service.

mod product;
mod stock;

pub use product::Product;
pub use stock::StockRecord;
