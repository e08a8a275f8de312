//! Cart commands.

use anyhow::Result;
use rocket_cart::{CartError, CartStore};
use rocket_commerce::ProductId;
use rocket_data::InMemoryApi;

use super::Outcome;
use crate::context::Context;

/// Show the cart with per-entry subtotals and the total.
pub fn show(ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store(InMemoryApi::new())?;
    print_cart(&store, ctx)?;
    Ok(Outcome::Done)
}

/// Add one unit of `id`.
pub async fn add(id: ProductId, ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store(ctx.api()?)?;
    let result = store.add_product(id).await;
    finish(result, id, &store, ctx)
}

/// Remove `id` from the cart.
pub async fn remove(id: ProductId, ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store(InMemoryApi::new())?;
    let result = store.remove_product(id).await;
    finish(result, id, &store, ctx)
}

/// Set the amount of `id`.
pub async fn update(id: ProductId, amount: i64, ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store(ctx.api()?)?;
    let result = store.update_product_amount(id, amount).await;
    finish(result, id, &store, ctx)
}

/// Empty the cart.
pub fn clear(ctx: &Context) -> Result<Outcome> {
    let store = ctx.open_store(InMemoryApi::new())?;
    store.clear()?;
    if ctx.output.is_json() {
        ctx.output.json(&store.cart());
    } else {
        ctx.output.success("Cart cleared");
    }
    Ok(Outcome::Done)
}

fn finish(
    result: Result<(), CartError>,
    id: ProductId,
    store: &CartStore,
    ctx: &Context,
) -> Result<Outcome> {
    match result {
        Ok(()) => {
            if ctx.output.is_json() {
                ctx.output.json(&store.summary()?);
                return Ok(Outcome::Done);
            }
            match store.cart().get(id) {
                Some(entry) => ctx
                    .output
                    .success(&format!("{} x{}", entry.product.title, entry.amount)),
                None => ctx.output.success(&format!("Removed product {}", id)),
            }
            Ok(Outcome::Done)
        }
        // Storage failures are not shopper-facing rejections.
        Err(e @ CartError::Storage(_)) => Err(e.into()),
        Err(e) => {
            ctx.output.debug(&e.to_string());
            Ok(Outcome::Rejected)
        }
    }
}

fn print_cart(store: &CartStore, ctx: &Context) -> Result<()> {
    let summary = store.summary()?;

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    if summary.entries.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    ctx.output.header("Cart");
    let widths = [4, 48, 12, 6, 12];
    ctx.output
        .table_row(&["ID", "TITLE", "PRICE", "QTY", "SUBTOTAL"], &widths);
    for entry in &summary.entries {
        ctx.output.table_row(
            &[
                &entry.product_id.to_string(),
                &entry.title,
                &entry.unit_price.display(),
                &entry.amount.to_string(),
                &entry.subtotal.display(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Items", &summary.item_count.to_string());
    ctx.output.kv("Total", &summary.total.display());
    Ok(())
}
