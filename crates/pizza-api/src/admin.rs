//! Read-mostly reports over the document store for operators.

use chrono::{DateTime, Duration, Utc};
use futures::future::join_all;
use pizza_auth::{User, UserProfile};
use pizza_commerce::{Cart, Menu, MenuItem};
use pizza_store::{Collection, DocumentStat, Documents, StoreError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A cart created within a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub email: String,
    pub items: usize,
    pub created_at: DateTime<Utc>,
}

/// A user created within a reporting window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Operator queries. Nothing here checks tokens.
#[derive(Clone)]
pub struct AdminReports {
    docs: Documents,
}

impl AdminReports {
    pub fn new(docs: Documents) -> Self {
        Self { docs }
    }

    /// Menu items sorted by name.
    pub async fn menu(&self) -> Result<Vec<MenuItem>, StoreError> {
        let menu = Menu::load(&self.docs).await?;
        Ok(menu.items().cloned().collect())
    }

    /// Replace the stored menu. Returns the number of items written.
    pub async fn seed_menu(&self, menu: &Menu) -> Result<usize, StoreError> {
        menu.save(&self.docs).await?;
        tracing::info!(items = menu.len(), "menu seeded");
        Ok(menu.len())
    }

    /// Carts created in the `within` window ending at `now`, newest first.
    pub async fn recent_orders(
        &self,
        within: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<OrderSummary>, StoreError> {
        let recent = self
            .created_since::<Cart>(Collection::Carts, now - within)
            .await?;
        Ok(recent
            .into_iter()
            .map(|(id, cart, stat)| OrderSummary {
                id,
                email: cart.email,
                items: cart.menu_items.len(),
                created_at: stat.created_at,
            })
            .collect())
    }

    pub async fn order(&self, id: &str) -> Result<Cart, StoreError> {
        Ok(self.docs.get::<Cart>(Collection::Carts, id.trim()).await?.value)
    }

    /// Users created in the `within` window ending at `now`, newest first.
    pub async fn recent_users(
        &self,
        within: Duration,
        now: DateTime<Utc>,
    ) -> Result<Vec<UserSummary>, StoreError> {
        let recent = self
            .created_since::<User>(Collection::Users, now - within)
            .await?;
        Ok(recent
            .into_iter()
            .map(|(_, user, stat)| UserSummary {
                name: user.full_name(),
                email: user.email,
                created_at: stat.created_at,
            })
            .collect())
    }

    /// Profile for `email`, without the password hash.
    pub async fn user(&self, email: &str) -> Result<UserProfile, StoreError> {
        let user = self
            .docs
            .get::<User>(Collection::Users, email.trim())
            .await?;
        Ok(user.value.into())
    }

    /// Documents in `collection` created at or after `since`. Stats are read
    /// concurrently; documents removed mid-scan are skipped.
    async fn created_since<T: DeserializeOwned>(
        &self,
        collection: Collection,
        since: DateTime<Utc>,
    ) -> Result<Vec<(String, T, DocumentStat)>, StoreError> {
        let ids = self.docs.ids(collection).await?;
        let stats = join_all(ids.iter().map(|id| self.docs.stat(collection, id))).await;

        let mut recent = Vec::new();
        for (id, stat) in ids.into_iter().zip(stats) {
            let stat = match stat {
                Ok(stat) => stat,
                Err(e) if e.is_not_found() => continue,
                Err(e) => return Err(e),
            };
            if stat.created_at < since {
                continue;
            }
            match self.docs.find::<T>(collection, &id).await? {
                Some(doc) => recent.push((id, doc.value, stat)),
                None => continue,
            }
        }
        recent.sort_by(|a, b| b.2.created_at.cmp(&a.2.created_at));
        tracing::debug!(collection = %collection, found = recent.len(), "recent documents");
        Ok(recent)
    }
}
