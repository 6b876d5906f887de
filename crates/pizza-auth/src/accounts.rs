//! User account operations.
//!
//! Everything except registration requires a token verified for the
//! account's email. Deleting a user leaves its tokens and carts in place.

use crate::{AuthError, Email, NewUser, TokenAuthenticator, User, UserProfile, UserUpdate};
use pizza_store::{Collection, Documents, StoreError, Versioned};

/// Registration and profile management.
#[derive(Clone)]
pub struct AccountService {
    docs: Documents,
    auth: TokenAuthenticator,
}

impl AccountService {
    pub fn new(docs: Documents, auth: TokenAuthenticator) -> Self {
        Self { docs, auth }
    }

    /// Create an account. The password is stored only as its hash.
    pub async fn register(&self, new_user: NewUser) -> Result<UserProfile, AuthError> {
        let email = new_user.validate()?;
        let user = User {
            first_name: new_user.first_name.trim().to_string(),
            last_name: new_user.last_name.trim().to_string(),
            email: email.to_string(),
            phone: new_user.phone.trim().to_string(),
            address: new_user.address.trim().to_string(),
            hashed_password: self.auth.hasher().hash(&new_user.password)?,
            tos_agreement: true,
        };

        match self.docs.insert(Collection::Users, email.as_str(), &user).await {
            Ok(_) => {}
            Err(StoreError::AlreadyExists { .. }) => {
                return Err(AuthError::UserAlreadyExists(email.to_string()))
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!(email = %email, "user registered");
        Ok(user.into())
    }

    /// Fetch the caller's profile.
    pub async fn profile(&self, token: Option<&str>, email: &str) -> Result<UserProfile, AuthError> {
        let email = Email::parse(email)?;
        self.auth.require(token, email.as_str()).await?;
        Ok(self.load(&email).await?.value.into())
    }

    /// Change the supplied fields of the caller's profile.
    pub async fn update(
        &self,
        token: Option<&str>,
        email: &str,
        update: UserUpdate,
    ) -> Result<UserProfile, AuthError> {
        let email = Email::parse(email)?;
        update.validate()?;
        self.auth.require(token, email.as_str()).await?;

        let current = self.load(&email).await?;
        let mut user = current.value;
        if let Some(first_name) = update.first_name {
            user.first_name = first_name.trim().to_string();
        }
        if let Some(last_name) = update.last_name {
            user.last_name = last_name.trim().to_string();
        }
        if let Some(phone) = update.phone {
            user.phone = phone.trim().to_string();
        }
        if let Some(address) = update.address {
            user.address = address.trim().to_string();
        }
        if let Some(password) = update.password {
            user.hashed_password = self.auth.hasher().hash(&password)?;
        }

        self.docs
            .replace(Collection::Users, email.as_str(), &user, Some(current.version))
            .await?;
        tracing::info!(email = %email, "user updated");
        Ok(user.into())
    }

    /// Delete the caller's account.
    pub async fn delete(&self, token: Option<&str>, email: &str) -> Result<(), AuthError> {
        let email = Email::parse(email)?;
        self.auth.require(token, email.as_str()).await?;

        match self.docs.remove(Collection::Users, email.as_str()).await {
            Ok(()) => {
                tracing::info!(email = %email, "user deleted");
                Ok(())
            }
            Err(e) if e.is_not_found() => Err(AuthError::UserNotFound(email.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    async fn load(&self, email: &Email) -> Result<Versioned<User>, AuthError> {
        self.docs
            .find::<User>(Collection::Users, email.as_str())
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))
    }
}
