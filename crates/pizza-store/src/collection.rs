//! Named collections of documents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A document collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Collection {
    /// User accounts, keyed by email.
    Users,
    /// Session tokens, keyed by token id.
    Tokens,
    /// Menu reference data.
    Menu,
    /// Carts, keyed by the token id that created them.
    Carts,
}

impl Collection {
    /// Every collection, in a stable order.
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Tokens,
        Collection::Menu,
        Collection::Carts,
    ];

    /// Directory / namespace name of the collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Tokens => "tokens",
            Collection::Menu => "menu",
            Collection::Carts => "cart",
        }
    }

    /// Parse a collection name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == name)
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
