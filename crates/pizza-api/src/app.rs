//! Service wiring.

use std::sync::Arc;

use pizza_auth::{AccountService, AuthConfig, PasswordHasher, TokenAuthenticator};
use pizza_commerce::{CartManager, CheckoutConfig, CheckoutOrchestrator, Menu};
use pizza_gateway::{
    ClientError, EmailClient, MailgunClient, PaymentGateway, StripeGateway, Unconfigured,
};
use pizza_store::{DocumentStore, Documents, FileStore, StoreError};
use thiserror::Error;

use crate::config::{AppConfig, ConfigError};

/// Errors raised while assembling the services.
#[derive(Error, Debug)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("could not load menu: {0}")]
    Menu(#[from] StoreError),

    #[error("could not build provider client: {0}")]
    Client(#[from] ClientError),
}

/// Every service a request handler can reach.
#[derive(Clone)]
pub struct Services {
    pub docs: Documents,
    pub auth: TokenAuthenticator,
    pub accounts: AccountService,
    pub carts: CartManager,
    pub checkout: CheckoutOrchestrator,
}

impl Services {
    pub fn builder(store: Arc<dyn DocumentStore>, hasher: PasswordHasher) -> ServicesBuilder {
        ServicesBuilder {
            docs: Documents::new(store),
            hasher: Arc::new(hasher),
            auth: AuthConfig::default(),
            checkout: CheckoutConfig::default(),
            menu: None,
        }
    }

    /// Build services from configuration: a file-backed store under the
    /// data directory, the menu loaded from it, and the Stripe and Mailgun
    /// clients. A provider without credentials (staging only) is replaced by
    /// [`Unconfigured`], which fails every checkout at that step.
    pub async fn from_config(config: &AppConfig) -> Result<Self, StartupError> {
        let payments: Arc<dyn PaymentGateway> = match config.stripe.clone() {
            Some(stripe) => Arc::new(StripeGateway::new(stripe)?),
            None => {
                tracing::warn!("STRIPE_SECRET_KEY not set; payments are disabled");
                Arc::new(Unconfigured::new("stripe"))
            }
        };
        let email: Arc<dyn EmailClient> = match config.mailgun.clone() {
            Some(mailgun) => Arc::new(MailgunClient::new(mailgun)?),
            None => {
                tracing::warn!("Mailgun is not configured; receipts are disabled");
                Arc::new(Unconfigured::new("mailgun"))
            }
        };

        let store = Arc::new(FileStore::new(config.data_dir.clone()));
        let services = Services::builder(store, PasswordHasher::new(config.hashing_secret.clone()))
            .auth_config(config.auth())
            .checkout_config(config.checkout())
            .load_menu()
            .await?
            .build(payments, email);

        tracing::info!(
            environment = %config.environment,
            data_dir = %config.data_dir.display(),
            menu_items = services.carts.menu().len(),
            "services ready"
        );
        Ok(services)
    }
}

/// Assembles [`Services`] around a store and a pair of providers.
pub struct ServicesBuilder {
    docs: Documents,
    hasher: Arc<PasswordHasher>,
    auth: AuthConfig,
    checkout: CheckoutConfig,
    menu: Option<Menu>,
}

impl ServicesBuilder {
    pub fn auth_config(mut self, config: AuthConfig) -> Self {
        self.auth = config;
        self
    }

    pub fn checkout_config(mut self, config: CheckoutConfig) -> Self {
        self.checkout = config;
        self
    }

    /// Use `menu` instead of the stored menu document.
    pub fn menu(mut self, menu: Menu) -> Self {
        self.menu = Some(menu);
        self
    }

    /// Read the menu document from the store.
    pub async fn load_menu(mut self) -> Result<Self, StoreError> {
        self.menu = Some(Menu::load(&self.docs).await?);
        Ok(self)
    }

    pub fn build(
        self,
        payments: Arc<dyn PaymentGateway>,
        email: Arc<dyn EmailClient>,
    ) -> Services {
        let auth = TokenAuthenticator::new(self.docs.clone(), self.hasher, self.auth);
        let accounts = AccountService::new(self.docs.clone(), auth.clone());
        let menu = Arc::new(self.menu.unwrap_or_default());
        let carts = CartManager::new(self.docs.clone(), auth.clone(), menu);
        let checkout = CheckoutOrchestrator::new(
            self.docs.clone(),
            auth.clone(),
            payments,
            email,
            self.checkout,
        );
        Services {
            docs: self.docs,
            auth,
            accounts,
            carts,
            checkout,
        }
    }
}
