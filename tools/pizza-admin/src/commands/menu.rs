//! Menu listing and seeding.

use std::fs;

use anyhow::{bail, Context as _, Result};
use pizza_commerce::{Menu, MenuItem};
use serde::Deserialize;

use super::SeedMenuArgs;
use crate::context::{resolve_path, Context};

/// List the stored menu.
pub async fn run(ctx: &Context) -> Result<()> {
    let items = ctx.reports.menu().await.context("Failed to read menu")?;

    if ctx.output.is_json() {
        ctx.output.json(&items);
        return Ok(());
    }

    ctx.output.header("Menu");
    if items.is_empty() {
        ctx.output.info("The menu is empty.");
        ctx.output.info("Run `pizza-admin seed-menu <file>` to add items.");
        return Ok(());
    }

    let widths = [20, 10, 40];
    ctx.output.table_row(&["NAME", "PRICE", "DESCRIPTION"], &widths);
    for item in &items {
        let price = item.price().display();
        ctx.output
            .table_row(&[&item.name, &price, &item.description], &widths);
    }
    ctx.output.info(&format!("Total: {} item(s)", items.len()));
    Ok(())
}

/// Replace the stored menu with the contents of a TOML file.
pub async fn seed(args: SeedMenuArgs, ctx: &Context) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    let path = resolve_path(&cwd, &args.file);
    let content = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let menu = parse_seed(&content).with_context(|| format!("Invalid menu file {}", path.display()))?;

    let written = ctx
        .reports
        .seed_menu(&menu)
        .await
        .context("Failed to write menu")?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "items": written }));
        return Ok(());
    }
    ctx.output.success(&format!(
        "Wrote {} menu item(s) to {}",
        written,
        ctx.data_dir.display()
    ));
    Ok(())
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    items: Vec<SeedItem>,
}

#[derive(Deserialize)]
struct SeedItem {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    price_cents: i64,
}

/// Parse a seed file into a menu. Names must be unique and non-empty.
pub fn parse_seed(content: &str) -> Result<Menu> {
    let file: SeedFile = toml::from_str(content)?;
    if file.items.is_empty() {
        bail!("no [[items]] entries");
    }

    let mut items = Vec::with_capacity(file.items.len());
    for item in file.items {
        let name = item.name.trim();
        if name.is_empty() {
            bail!("item with an empty name");
        }
        if item.price_cents < 0 {
            bail!("item '{}' has a negative price", name);
        }
        if items.iter().any(|i: &MenuItem| i.name == name) {
            bail!("item '{}' appears more than once", name);
        }
        items.push(MenuItem::new(name, item.description.trim(), item.price_cents));
    }
    Ok(Menu::new(items))
}
