//! User types.

use crate::AuthError;
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};

/// Required phone number length.
const PHONE_LEN: usize = 10;

/// A trimmed email address containing `@`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, AuthError> {
        let email = raw.trim();
        let valid = email
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
        if !valid {
            return Err(AuthError::missing_fields(&["email"]));
        }
        Ok(Self(email.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = AuthError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Email::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored user account, keyed by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub hashed_password: String,
    pub tos_agreement: bool,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A user with the password hash removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub tos_agreement: bool,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            phone: user.phone,
            address: user.address,
            tos_agreement: user.tos_agreement,
        }
    }
}

/// Registration payload.
///
/// Missing, null or wrongly typed fields deserialize to empty values and are
/// reported by [`NewUser::validate`] rather than by the decoder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewUser {
    #[serde(deserialize_with = "lenient")]
    pub first_name: String,
    #[serde(deserialize_with = "lenient")]
    pub last_name: String,
    #[serde(deserialize_with = "lenient")]
    pub email: String,
    #[serde(deserialize_with = "lenient")]
    pub phone: String,
    #[serde(deserialize_with = "lenient")]
    pub address: String,
    #[serde(deserialize_with = "lenient")]
    pub password: String,
    #[serde(deserialize_with = "lenient")]
    pub tos_agreement: bool,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

impl NewUser {
    /// Check every field, naming all that fail.
    pub fn validate(&self) -> Result<Email, AuthError> {
        let mut invalid = Vec::new();
        if self.first_name.trim().is_empty() {
            invalid.push("firstName");
        }
        if self.last_name.trim().is_empty() {
            invalid.push("lastName");
        }
        let email = Email::parse(&self.email).ok();
        if email.is_none() {
            invalid.push("email");
        }
        if !valid_phone(&self.phone) {
            invalid.push("phone");
        }
        if self.address.trim().is_empty() {
            invalid.push("address");
        }
        if self.password.trim().is_empty() {
            invalid.push("password");
        }
        if !self.tos_agreement {
            invalid.push("tosAgreement");
        }

        match email {
            Some(email) if invalid.is_empty() => Ok(email),
            _ => Err(AuthError::missing_fields(&invalid)),
        }
    }
}

/// Profile update payload. At least one field must be present.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub password: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.password.is_none()
    }

    pub fn validate(&self) -> Result<(), AuthError> {
        if self.is_empty() {
            return Err(AuthError::InvalidRequest("nothing to update".to_string()));
        }
        let mut invalid = Vec::new();
        let blank = |v: &Option<String>| v.as_deref().is_some_and(|s| s.trim().is_empty());
        if blank(&self.first_name) {
            invalid.push("firstName");
        }
        if blank(&self.last_name) {
            invalid.push("lastName");
        }
        if self.phone.as_deref().is_some_and(|p| !valid_phone(p)) {
            invalid.push("phone");
        }
        if blank(&self.address) {
            invalid.push("address");
        }
        if blank(&self.password) {
            invalid.push("password");
        }
        if invalid.is_empty() {
            Ok(())
        } else {
            Err(AuthError::missing_fields(&invalid))
        }
    }
}

fn valid_phone(phone: &str) -> bool {
    phone.trim().chars().count() == PHONE_LEN
}
