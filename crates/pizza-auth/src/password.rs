//! Password hashing.
//!
//! Passwords are hashed with HMAC-SHA256 keyed by the deployment's hashing
//! secret and stored hex-encoded. The hash is deterministic so a stored value
//! can be checked by recomputing it.

use crate::AuthError;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Keyed password hasher.
#[derive(Clone)]
pub struct PasswordHasher {
    secret: SecretString,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl PasswordHasher {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self, password: &str) -> Result<HmacSha256, AuthError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| AuthError::Internal(format!("hmac key: {e}")))?;
        mac.update(password.as_bytes());
        Ok(mac)
    }

    /// Hash a password to a lowercase hex string.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        if password.is_empty() {
            return Err(AuthError::missing_fields(&["password"]));
        }
        let digest = self.mac(password)?.finalize().into_bytes();
        Ok(hex::encode(digest))
    }

    /// Check a password against a stored hex hash in constant time.
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        if password.is_empty() {
            return false;
        }
        let Ok(expected) = hex::decode(stored) else {
            return false;
        };
        match self.mac(password) {
            Ok(mac) => mac.verify_slice(&expected).is_ok(),
            Err(_) => false,
        }
    }
}
