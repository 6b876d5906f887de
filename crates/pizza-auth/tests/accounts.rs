//! Account lifecycle through the public API.

use std::sync::Arc;

use pizza_auth::{
    AccountService, AuthConfig, AuthError, NewUser, PasswordHasher, TokenAuthenticator,
    UserUpdate,
};
use pizza_store::{Collection, DocumentStore, Documents, InMemoryStore};
use secrecy::SecretString;

struct Harness {
    store: Arc<InMemoryStore>,
    auth: TokenAuthenticator,
    accounts: AccountService,
}

fn harness() -> Harness {
    let store = Arc::new(InMemoryStore::new());
    let docs = Documents::new(store.clone());
    let hasher = Arc::new(PasswordHasher::new(SecretString::from(
        "thisIsASecret".to_string(),
    )));
    let auth = TokenAuthenticator::new(docs.clone(), hasher, AuthConfig::default());
    let accounts = AccountService::new(docs, auth.clone());
    Harness {
        store,
        auth,
        accounts,
    }
}

fn grace() -> NewUser {
    NewUser {
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@example.com".into(),
        phone: "5551234567".into(),
        address: "1 Compiler Way".into(),
        password: "cobol".into(),
        tos_agreement: true,
    }
}

#[tokio::test]
async fn test_register_then_login() {
    let h = harness();
    let profile = h.accounts.register(grace()).await.unwrap();
    assert_eq!(profile.email, "grace@example.com");

    let stored = h.store.read(Collection::Users, "grace@example.com").await.unwrap();
    assert_ne!(stored.body["hashedPassword"], "cobol");

    let token = h.auth.issue("grace@example.com", "cobol").await.unwrap();
    assert!(h.auth.verify(token.id.as_str(), "grace@example.com").await);
}

#[tokio::test]
async fn test_duplicate_registration() {
    let h = harness();
    h.accounts.register(grace()).await.unwrap();
    let err = h.accounts.register(grace()).await.unwrap_err();
    assert!(matches!(err, AuthError::UserAlreadyExists(_)));
}

#[tokio::test]
async fn test_profile_requires_matching_token() {
    let h = harness();
    h.accounts.register(grace()).await.unwrap();
    let token = h.auth.issue("grace@example.com", "cobol").await.unwrap();

    let profile = h
        .accounts
        .profile(Some(token.id.as_str()), "grace@example.com")
        .await
        .unwrap();
    assert_eq!(profile.first_name, "Grace");

    let err = h
        .accounts
        .profile(None, "grace@example.com")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Unauthorized));
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let h = harness();
    h.accounts.register(grace()).await.unwrap();
    let token = h.auth.issue("grace@example.com", "cobol").await.unwrap();

    let update = UserUpdate {
        address: Some("2 Navy Yard".into()),
        password: Some("fortran".into()),
        ..Default::default()
    };
    let profile = h
        .accounts
        .update(Some(token.id.as_str()), "grace@example.com", update)
        .await
        .unwrap();
    assert_eq!(profile.address, "2 Navy Yard");
    assert_eq!(profile.phone, "5551234567");

    assert!(h.auth.issue("grace@example.com", "fortran").await.is_ok());
    assert!(matches!(
        h.auth.issue("grace@example.com", "cobol").await,
        Err(AuthError::InvalidCredentials)
    ));
}

#[tokio::test]
async fn test_delete_leaves_tokens() {
    let h = harness();
    h.accounts.register(grace()).await.unwrap();
    let token = h.auth.issue("grace@example.com", "cobol").await.unwrap();

    h.accounts
        .delete(Some(token.id.as_str()), "grace@example.com")
        .await
        .unwrap();

    assert!(h
        .store
        .read(Collection::Users, "grace@example.com")
        .await
        .unwrap_err()
        .is_not_found());
    assert!(h.auth.lookup(token.id.as_str()).await.is_ok());
}
