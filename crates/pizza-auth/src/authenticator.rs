//! Token issuance and verification.

use crate::{AuthError, Email, PasswordHasher, Token, TokenId, User};
use chrono::{Duration, Utc};
use pizza_store::{Collection, Documents, StoreError};
use std::sync::Arc;

/// Token settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of a fresh or extended token.
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::hours(1),
        }
    }
}

/// Issues and validates session tokens.
///
/// A token authorizes exactly one email until its expiry. Expired tokens are
/// left in the store; nothing here collects them.
#[derive(Clone)]
pub struct TokenAuthenticator {
    docs: Documents,
    hasher: Arc<PasswordHasher>,
    config: AuthConfig,
}

impl TokenAuthenticator {
    pub fn new(docs: Documents, hasher: Arc<PasswordHasher>, config: AuthConfig) -> Self {
        Self {
            docs,
            hasher,
            config,
        }
    }

    pub fn hasher(&self) -> &PasswordHasher {
        &self.hasher
    }

    /// Exchange an email and password for a new token.
    pub async fn issue(&self, email: &str, password: &str) -> Result<Token, AuthError> {
        let email = Email::parse(email)?;
        if password.trim().is_empty() {
            return Err(AuthError::missing_fields(&["password"]));
        }

        let user = self
            .docs
            .find::<User>(Collection::Users, email.as_str())
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?
            .value;

        if !self.hasher.verify(password, &user.hashed_password) {
            tracing::warn!(email = %email, "token request with wrong password");
            return Err(AuthError::InvalidCredentials);
        }

        let token = Token::issue(email.as_str(), Utc::now(), self.config.token_ttl);
        match self
            .docs
            .insert(Collection::Tokens, token.id.as_str(), &token)
            .await
        {
            Ok(_) => {}
            Err(StoreError::AlreadyExists { .. }) => {
                return Err(AuthError::Internal("token id collision".to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(email = %email, expires = %token.expires, "token issued");
        Ok(token)
    }

    /// Fetch a token by id.
    pub async fn lookup(&self, id: &str) -> Result<Token, AuthError> {
        let id = TokenId::parse(id)?;
        self.docs
            .find::<Token>(Collection::Tokens, id.as_str())
            .await?
            .map(|v| v.value)
            .ok_or(AuthError::TokenNotFound)
    }

    /// Push a live token's expiry to one lifetime from now.
    ///
    /// An expired token is never revived and is left untouched.
    pub async fn extend(&self, id: &str, extend: bool) -> Result<Token, AuthError> {
        if !extend {
            return Err(AuthError::missing_fields(&["extend"]));
        }
        let id = TokenId::parse(id)?;

        let current = self
            .docs
            .find::<Token>(Collection::Tokens, id.as_str())
            .await?
            .ok_or(AuthError::TokenNotFound)?;

        let now = Utc::now();
        if !current.value.is_valid_at(now) {
            tracing::debug!(token = %id, "refusing to extend expired token");
            return Err(AuthError::TokenExpired);
        }

        let mut token = current.value;
        token.extend_from(now, self.config.token_ttl);
        self.docs
            .replace(Collection::Tokens, id.as_str(), &token, Some(current.version))
            .await?;

        tracing::info!(email = %token.email, expires = %token.expires, "token extended");
        Ok(token)
    }

    /// Delete a token.
    pub async fn revoke(&self, id: &str) -> Result<(), AuthError> {
        let id = TokenId::parse(id)?;
        match self.docs.remove(Collection::Tokens, id.as_str()).await {
            Ok(()) => {
                tracing::info!(token = %id, "token revoked");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(AuthError::TokenNotFound),
            Err(e) => Err(e.into()),
        }
    }

    /// Check that `id` names a live token bound to `email`.
    ///
    /// Never fails: any lookup problem counts as "not valid".
    pub async fn verify(&self, id: &str, email: &str) -> bool {
        let Ok(id) = TokenId::parse(id) else {
            return false;
        };
        match self.docs.find::<Token>(Collection::Tokens, id.as_str()).await {
            Ok(Some(token)) => token.value.authorizes(email.trim(), Utc::now()),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "token lookup failed during verification");
                false
            }
        }
    }

    /// Like [`verify`](Self::verify) but as a `Result` for `?` chains.
    pub async fn require(&self, id: Option<&str>, email: &str) -> Result<(), AuthError> {
        let id = id.unwrap_or_default();
        if self.verify(id, email).await {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }
}
