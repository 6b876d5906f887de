//! Menu reference data.
//!
//! The menu is read-only to the order flow. It is loaded once from the
//! `menu/items` document (or built in code) and handed to the components that
//! need it.

use crate::money::Money;
use pizza_store::{Collection, Documents, StoreError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Id of the menu document inside the `menu` collection.
pub const MENU_DOCUMENT: &str = "items";

/// One orderable item. Two items are the same item iff every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price_cents: i64,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price_cents: i64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price_cents,
        }
    }

    pub fn price(&self) -> Money {
        Money::usd(self.price_cents)
    }
}

/// Item name to item descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Menu {
    items: BTreeMap<String, MenuItem>,
}

impl Menu {
    pub fn new(items: impl IntoIterator<Item = MenuItem>) -> Self {
        Self {
            items: items
                .into_iter()
                .map(|item| (item.name.clone(), item))
                .collect(),
        }
    }

    /// Load the menu document. A missing document yields an empty menu.
    pub async fn load(docs: &Documents) -> Result<Self, StoreError> {
        let menu = docs
            .find::<Menu>(Collection::Menu, MENU_DOCUMENT)
            .await?
            .map(|v| v.value)
            .unwrap_or_default();
        tracing::debug!(items = menu.len(), "menu loaded");
        Ok(menu)
    }

    /// Write this menu as the menu document, replacing any previous one.
    pub async fn save(&self, docs: &Documents) -> Result<(), StoreError> {
        match docs.insert(Collection::Menu, MENU_DOCUMENT, self).await {
            Ok(_) => Ok(()),
            Err(StoreError::AlreadyExists { .. }) => docs
                .replace(Collection::Menu, MENU_DOCUMENT, self, None)
                .await
                .map(|_| ()),
            Err(e) => Err(e),
        }
    }

    pub fn resolve(&self, name: &str) -> Option<&MenuItem> {
        self.items.get(name.trim())
    }

    /// Items in name order.
    pub fn items(&self) -> impl Iterator<Item = &MenuItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
