//! Session tokens.

use crate::AuthError;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Exact length of a token id.
pub const TOKEN_ID_LEN: usize = 20;

/// A 20-character alphanumeric token identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    /// Generate a random token id from `[A-Za-z0-9]`.
    pub fn generate() -> Self {
        use rand::distributions::Alphanumeric;
        use rand::Rng;

        let id: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_ID_LEN)
            .map(char::from)
            .collect();
        Self(id)
    }

    /// Accept a caller-supplied id if it has the right length.
    pub fn parse(id: &str) -> Result<Self, AuthError> {
        let id = id.trim();
        if id.chars().count() != TOKEN_ID_LEN {
            return Err(AuthError::InvalidRequest(format!(
                "token id must be {TOKEN_ID_LEN} characters"
            )));
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TokenId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A session token bound to one email.
///
/// Valid while `now < expires`. `expires` is stored as epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub email: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub expires: DateTime<Utc>,
}

impl Token {
    /// Create a token for `email` that expires `ttl` from `now`.
    pub fn issue(email: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            id: TokenId::generate(),
            email: email.into(),
            expires: expiry(now, ttl),
        }
    }

    /// Move the expiry to `ttl` after `now`.
    pub fn extend_from(&mut self, now: DateTime<Utc>, ttl: Duration) {
        self.expires = expiry(now, ttl);
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires
    }

    pub fn is_expired(&self) -> bool {
        !self.is_valid_at(Utc::now())
    }

    /// Check the token is live and bound to `email`.
    pub fn authorizes(&self, email: &str, now: DateTime<Utc>) -> bool {
        self.email == email && self.is_valid_at(now)
    }

    /// Seconds until expiry, zero once expired.
    pub fn time_to_expiry(&self) -> i64 {
        (self.expires - Utc::now()).num_seconds().max(0)
    }
}

fn expiry(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    (now + ttl).trunc_subsecs(3)
}
