//! Catalog and stock access for the RocketShoes cart.
//!
//! This crate provides:
//! - `CatalogClient` / `StockClient` - the two remote lookups a cart needs
//! - `Dependency` - which remote a failure came from
//! - `FetchPolicy` / `TimedClient` - optional per-fetch timeouts
//! - `InMemoryApi` - a client backed by a `db.json` style fixture

mod api;
mod client;
mod error;
mod timeout;

pub use api::*;
pub use client::*;
pub use error::*;
pub use timeout::*;
