//! Order (cart) reports.

use anyhow::{Context as _, Result};
use chrono::Utc;

use super::{OrderArgs, RecentArgs};
use crate::context::Context;
use crate::output::format_timestamp;

/// List carts created within the window.
pub async fn list(args: RecentArgs, ctx: &Context) -> Result<()> {
    let orders = ctx
        .reports
        .recent_orders(args.window(), Utc::now())
        .await
        .context("Failed to list orders")?;

    if ctx.output.is_json() {
        ctx.output.json(&orders);
        return Ok(());
    }

    ctx.output
        .header(&format!("Orders in the last {} hour(s)", args.within_hours));
    if orders.is_empty() {
        ctx.output.info("No orders found.");
        return Ok(());
    }

    let widths = [22, 30, 6, 24];
    ctx.output
        .table_row(&["ID", "EMAIL", "ITEMS", "CREATED"], &widths);
    for order in &orders {
        let items = order.items.to_string();
        let created = format_timestamp(&order.created_at);
        ctx.output
            .table_row(&[&order.id, &order.email, &items, &created], &widths);
    }
    ctx.output.info(&format!("Total: {} order(s)", orders.len()));
    Ok(())
}

/// Show one cart.
pub async fn show(args: OrderArgs, ctx: &Context) -> Result<()> {
    let cart = ctx
        .reports
        .order(&args.id)
        .await
        .with_context(|| format!("Order '{}' not found", args.id))?;

    if ctx.output.is_json() {
        ctx.output.json(&cart);
        return Ok(());
    }

    ctx.output.header(&format!("Order: {}", cart.id));
    ctx.output.kv("Email", &cart.email);
    ctx.output.kv("Items", &cart.item_count().to_string());
    for item in &cart.menu_items {
        ctx.output
            .list_item(&format!("{} ({})", item.name, item.price().display()));
    }
    Ok(())
}
