//! Cart operations gated on a verified token.

use super::Cart;
use crate::error::CartError;
use crate::menu::{Menu, MenuItem};
use pizza_auth::TokenAuthenticator;
use pizza_store::{Collection, Documents, Versioned};
use std::sync::Arc;

/// Adds, removes and lists cart items.
///
/// Every write is a compare-and-swap against the version read in the same
/// call, so two concurrent edits of one cart cannot both succeed.
#[derive(Clone)]
pub struct CartManager {
    docs: Documents,
    auth: TokenAuthenticator,
    menu: Arc<Menu>,
}

impl CartManager {
    pub fn new(docs: Documents, auth: TokenAuthenticator, menu: Arc<Menu>) -> Self {
        Self { docs, auth, menu }
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    /// Add a menu item, creating the cart on first use.
    pub async fn add_item(
        &self,
        token: Option<&str>,
        email: &str,
        item_name: &str,
    ) -> Result<Vec<MenuItem>, CartError> {
        let (token, email) = self.authorize(token, email).await?;
        let item = self.resolve(item_name)?;

        let Some(current) = self.load(token).await? else {
            let cart = Cart::with_item(token, email, item);
            self.docs.insert(Collection::Carts, token, &cart).await?;
            tracing::info!(email = %email, item = item_name, "cart created");
            return Ok(cart.menu_items);
        };

        let mut cart = current.value;
        cart.add(item)?;
        self.docs
            .replace(Collection::Carts, token, &cart, Some(current.version))
            .await?;
        tracing::info!(email = %email, item = item_name, items = cart.item_count(), "item added to cart");
        Ok(cart.menu_items)
    }

    /// Remove a menu item from an existing cart.
    pub async fn remove_item(
        &self,
        token: Option<&str>,
        email: &str,
        item_name: &str,
    ) -> Result<Vec<MenuItem>, CartError> {
        let (token, email) = self.authorize(token, email).await?;
        let item = self.resolve(item_name)?;

        let current = self.load(token).await?.ok_or(CartError::CartNotFound)?;
        let mut cart = current.value;
        cart.remove(&item)?;
        self.docs
            .replace(Collection::Carts, token, &cart, Some(current.version))
            .await?;
        tracing::info!(email = %email, item = item_name, items = cart.item_count(), "item removed from cart");
        Ok(cart.menu_items)
    }

    /// Current cart contents.
    pub async fn view(&self, token: Option<&str>, email: &str) -> Result<Vec<MenuItem>, CartError> {
        let (token, _) = self.authorize(token, email).await?;
        let cart = self.load(token).await?.ok_or(CartError::CartNotFound)?;
        Ok(cart.value.menu_items)
    }

    async fn authorize<'a>(
        &self,
        token: Option<&'a str>,
        email: &'a str,
    ) -> Result<(&'a str, &'a str), CartError> {
        let email = email.trim();
        let token = token.map(str::trim).unwrap_or_default();
        if !self.auth.verify(token, email).await {
            tracing::warn!(email = %email, "cart request with invalid token");
            return Err(CartError::Unauthorized);
        }
        Ok((token, email))
    }

    fn resolve(&self, item_name: &str) -> Result<MenuItem, CartError> {
        self.menu
            .resolve(item_name)
            .cloned()
            .ok_or_else(|| CartError::ItemNotFound(item_name.trim().to_string()))
    }

    async fn load(&self, token: &str) -> Result<Option<Versioned<Cart>>, CartError> {
        Ok(self.docs.find::<Cart>(Collection::Carts, token).await?)
    }
}
