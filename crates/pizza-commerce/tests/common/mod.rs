#![allow(dead_code)]

use std::sync::Arc;

use pizza_auth::{AccountService, AuthConfig, NewUser, PasswordHasher, TokenAuthenticator};
use pizza_commerce::{CartManager, Menu, MenuItem, PaymentDetails};
use pizza_store::{DocumentStore, Documents, InMemoryStore};
use secrecy::SecretString;

pub const EMAIL: &str = "ada@example.com";
pub const PASSWORD: &str = "engine";

pub struct Harness {
    pub docs: Documents,
    pub auth: TokenAuthenticator,
    pub carts: CartManager,
    pub token: String,
}

pub fn menu() -> Menu {
    Menu::new([
        MenuItem::new("margherita", "tomato, mozzarella, basil", 800),
        MenuItem::new("pepperoni", "tomato, mozzarella, pepperoni", 950),
        MenuItem::new("veggie", "peppers, onion, olives", 900),
    ])
}

pub async fn harness() -> Harness {
    harness_with(Arc::new(InMemoryStore::new())).await
}

/// Register a user and log them in against `store`.
pub async fn harness_with(store: Arc<dyn DocumentStore>) -> Harness {
    let docs = Documents::new(store);
    let hasher = Arc::new(PasswordHasher::new(SecretString::from(
        "thisIsASecret".to_string(),
    )));
    let auth = TokenAuthenticator::new(docs.clone(), hasher, AuthConfig::default());
    let accounts = AccountService::new(docs.clone(), auth.clone());
    accounts
        .register(NewUser {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: EMAIL.into(),
            phone: "5550001111".into(),
            address: "12 St James's Square".into(),
            password: PASSWORD.into(),
            tos_agreement: true,
        })
        .await
        .unwrap();
    let token = auth.issue(EMAIL, PASSWORD).await.unwrap();
    let carts = CartManager::new(docs.clone(), auth.clone(), Arc::new(menu()));

    Harness {
        docs,
        auth,
        carts,
        token: token.id.as_str().to_string(),
    }
}

pub fn card() -> PaymentDetails {
    PaymentDetails {
        card_number: "4242424242424242".into(),
        expiration_month: 12,
        expiration_year: 2030,
        security_code: 123,
        zip_code: "560001".into(),
    }
}
