//! The cart document.

use crate::error::CartError;
use crate::menu::MenuItem;
use serde::{Deserialize, Serialize};

/// A cart, keyed by the token id that created it.
///
/// Holds each menu item at most once, in the order added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
}

impl Cart {
    /// Start a cart holding a single item.
    pub fn with_item(id: impl Into<String>, email: impl Into<String>, item: MenuItem) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            menu_items: vec![item],
        }
    }

    pub fn contains(&self, item: &MenuItem) -> bool {
        self.menu_items.contains(item)
    }

    /// Append an item not already present.
    pub fn add(&mut self, item: MenuItem) -> Result<(), CartError> {
        if self.contains(&item) {
            return Err(CartError::DuplicateItem(item.name));
        }
        self.menu_items.push(item);
        Ok(())
    }

    /// Remove the first occurrence of `item`, keeping the rest in order.
    pub fn remove(&mut self, item: &MenuItem) -> Result<(), CartError> {
        let position = self
            .menu_items
            .iter()
            .position(|i| i == item)
            .ok_or_else(|| CartError::ItemNotInCart(item.name.clone()))?;
        self.menu_items.remove(position);
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.menu_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menu_items.is_empty()
    }

    pub fn clear(&mut self) {
        self.menu_items.clear();
    }
}
