//! Storefront state shared across components.

use std::sync::Arc;

use crate::account::{AccountClient, AccountService};
use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::session::SessionStore;
use crate::ui::LoginModal;

/// Root of the storefront: configuration, clients and stores.
///
/// Cheaply cloneable via `Arc`. Every component that needs the cart, the
/// session or the login modal gets them from here, so all of them observe
/// the same state.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: CartStore,
    session: SessionStore,
    login_modal: LoginModal,
}

impl Storefront {
    /// Create the storefront with the HTTP Account Service client.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be constructed.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let account = AccountClient::new(&config)?;
        Self::with_account_service(config, Arc::new(account))
    }

    /// Create the storefront over any [`AccountService`].
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog HTTP client cannot be constructed.
    pub fn with_account_service(
        config: StorefrontConfig,
        account: Arc<dyn AccountService>,
    ) -> Result<Self> {
        let catalog = CatalogClient::new(&config)?;
        let session = SessionStore::new(account, config.request_timeout);

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                cart: CartStore::new(),
                session,
                login_modal: LoginModal::new(),
            }),
        })
    }

    /// Resolve the startup session. Call once after construction.
    pub async fn start(&self) {
        self.inner.session.check_auth().await;
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    #[must_use]
    pub fn cart(&self) -> &CartStore {
        &self.inner.cart
    }

    #[must_use]
    pub fn session(&self) -> &SessionStore {
        &self.inner.session
    }

    #[must_use]
    pub fn login_modal(&self) -> &LoginModal {
        &self.inner.login_modal
    }
}
