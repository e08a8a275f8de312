//! Catalog listing.

use anyhow::Result;
use rocket_data::{FetchError, StockClient};
use serde::Serialize;

use super::Outcome;
use crate::context::Context;
use crate::output::stock_badge;

#[derive(Serialize)]
struct Listing {
    id: i64,
    title: String,
    price: String,
    stock: Option<i64>,
}

/// Run the products command.
pub async fn run(ctx: &Context) -> Result<Outcome> {
    let api = ctx.api()?;
    let currency = ctx.config.currency;

    let mut listings = Vec::new();
    for product in api.products() {
        let stock = match api.stock(product.id).await {
            Ok(record) => Some(record.amount),
            Err(FetchError::Http { status: 404, .. }) => None,
            Err(e) => return Err(e.into()),
        };
        listings.push(Listing {
            id: product.id.get(),
            price: product.unit_price(currency).display(),
            title: product.title,
            stock,
        });
    }

    if ctx.output.is_json() {
        ctx.output.json(&listings);
        return Ok(Outcome::Done);
    }

    if listings.is_empty() {
        ctx.output.info("The catalog is empty.");
        return Ok(Outcome::Done);
    }

    ctx.output.header("Products");
    let widths = [4, 48, 12, 6];
    ctx.output.table_row(&["ID", "TITLE", "PRICE", "STOCK"], &widths);
    for listing in &listings {
        let stock = listing.stock.map_or_else(|| "-".to_string(), stock_badge);
        ctx.output.table_row(
            &[&listing.id.to_string(), &listing.title, &listing.price, &stock],
            &widths,
        );
    }

    Ok(Outcome::Done)
}
