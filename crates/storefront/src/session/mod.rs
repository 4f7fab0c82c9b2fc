//! Customer session store.
//!
//! Single source of truth for "who is the current customer". Every Account
//! Service result passes a role check before it is committed: an admin
//! identity is treated as a failed sign-in and never reaches the storefront.
//!
//! # States
//!
//! | Phase | `customer` | `is_loading` |
//! |---|---|---|
//! | `Unknown` | `None` | `true` |
//! | `Anonymous` | `None` | `false` |
//! | `Authenticated` | `Some` | `false` |
//!
//! `check_auth` moves `Unknown` to one of the other two exactly once.

mod error;

pub use error::AuthError;

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{info, instrument, warn};

use borzfuel_core::{Customer, Email, ProfileUpdate};

use crate::account::{AccountError, AccountService, RegisterRequest};
use crate::error::{clear_sentry_user, set_sentry_user};

/// Coarse session phase derived from [`SessionState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// The startup session check has not resolved yet.
    Unknown,
    /// No customer is signed in.
    Anonymous,
    /// A customer is signed in.
    Authenticated,
}

/// Snapshot of the customer session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    customer: Option<Customer>,
    is_loading: bool,
}

impl SessionState {
    const fn unknown() -> Self {
        Self {
            customer: None,
            is_loading: true,
        }
    }

    /// The signed-in customer, if any.
    #[must_use]
    pub const fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    /// Whether the startup session check is still pending.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.customer.is_some()
    }

    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        match (&self.customer, self.is_loading) {
            (Some(_), _) => SessionPhase::Authenticated,
            (None, true) => SessionPhase::Unknown,
            (None, false) => SessionPhase::Anonymous,
        }
    }
}

/// Shared handle to the customer session.
///
/// Clones share state. Only the store writes; readers take snapshots or
/// subscribe to changes.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

struct SessionStoreInner {
    account: Arc<dyn AccountService>,
    state: watch::Sender<SessionState>,
    request_timeout: Duration,
    checked: AtomicBool,
    /// Bumped on every logout; results of calls started under an older
    /// value are discarded.
    logouts: AtomicU64,
}

impl SessionStore {
    /// Create a store in the `Unknown` phase.
    ///
    /// Call [`check_auth`](Self::check_auth) once at startup to resolve it.
    #[must_use]
    pub fn new(account: Arc<dyn AccountService>, request_timeout: Duration) -> Self {
        let (state, _) = watch::channel(SessionState::unknown());
        Self {
            inner: Arc::new(SessionStoreInner {
                account,
                state,
                request_timeout,
                checked: AtomicBool::new(false),
                logouts: AtomicU64::new(0),
            }),
        }
    }

    /// Current state snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    /// The signed-in customer, if any.
    #[must_use]
    pub fn customer(&self) -> Option<Customer> {
        self.inner.state.borrow().customer.clone()
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.inner.state.borrow().is_logged_in()
    }

    /// Receive a notification on every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    /// Resolve the startup phase from the current session cookie.
    ///
    /// Runs at most once per store; later calls return immediately. Any
    /// outcome other than a customer session ends `Anonymous`, and failures
    /// are only logged.
    #[instrument(skip(self))]
    pub async fn check_auth(&self) {
        if self.inner.checked.swap(true, Ordering::SeqCst) {
            return;
        }
        let generation = self.logout_generation();

        let customer = match self.bounded(self.inner.account.current_user(), None).await {
            Ok(Some(user)) if user.is_customer() => Some(user),
            Ok(Some(user)) => {
                info!(role = %user.role, "Session belongs to a non-customer, staying anonymous");
                None
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Auth check failed");
                None
            }
        };

        let customer = customer.filter(|_| {
            let current = self.logout_generation() == generation;
            if !current {
                info!("Logged out during the auth check, discarding its session");
            }
            current
        });

        if let Some(customer) = &customer {
            set_sentry_user(&customer.id, Some(customer.email.as_str()));
            info!(email = %customer.email, "Customer session restored");
        }

        self.inner.state.send_modify(|state| {
            // A sign-in that finished while the check was in flight wins.
            if state.customer.is_none() {
                state.customer = customer;
            }
            state.is_loading = false;
        });
    }

    /// Sign in with email and password.
    ///
    /// Succeeds only if the Account Service accepts the credentials and the
    /// user is a customer.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidEmail`] if the email is malformed (no request sent)
    /// - [`AuthError::InvalidCredentials`] on 401/403
    /// - [`AuthError::WrongRole`] if the user is not a customer
    /// - [`AuthError::Timeout`], [`AuthError::Network`], [`AuthError::Rejected`]
    ///   for transport failures
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &SecretString) -> Result<Customer, AuthError> {
        let email = Email::parse(email)?;

        let user = self
            .bounded(
                self.inner.account.login(&email, password),
                Some(AuthError::InvalidCredentials),
            )
            .await
            .inspect_err(|e| warn!(error = %e, "Login failed"))?;

        let customer = self.commit(user)?;
        info!(email = %customer.email, "Customer logged in");
        Ok(customer)
    }

    /// Create a customer account and sign in as it.
    ///
    /// The request is always sent with the customer role.
    ///
    /// # Errors
    ///
    /// Same classification as [`login`](Self::login), except that a 401/403
    /// is reported as [`AuthError::Rejected`].
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<Customer, AuthError> {
        let user = self
            .bounded(self.inner.account.register(request), None)
            .await
            .inspect_err(|e| warn!(error = %e, "Registration failed"))?;

        let customer = self.commit(user)?;
        info!(email = %customer.email, "Customer registered");
        Ok(customer)
    }

    /// Sign out.
    ///
    /// The remote call is best effort; local state is always cleared.
    #[instrument(skip(self))]
    pub async fn logout(&self) {
        self.inner.logouts.fetch_add(1, Ordering::SeqCst);

        if let Err(e) = self.bounded(self.inner.account.logout(), None).await {
            warn!(error = %e, "Logout error");
        }

        self.inner.state.send_modify(|state| {
            state.customer = None;
            state.is_loading = false;
        });
        clear_sentry_user();
        info!("Customer logged out");
    }

    /// Update the signed-in customer's profile.
    ///
    /// On success the cached customer is replaced by the server's document;
    /// on failure nothing changes. A result that arrives after the customer
    /// signed out is dropped.
    ///
    /// # Errors
    ///
    /// - [`AuthError::NotAuthenticated`] if nobody is signed in (no request
    ///   sent), the server no longer accepts the session, or the customer
    ///   signed out while the request was in flight
    /// - [`AuthError::WrongRole`] if the returned document is not a customer
    /// - transport failures as for [`login`](Self::login)
    #[instrument(skip(self, update))]
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Customer, AuthError> {
        let Some(current) = self.customer() else {
            return Err(AuthError::NotAuthenticated);
        };
        let generation = self.logout_generation();

        let user = self
            .bounded(
                self.inner.account.update_user(&current.id, update),
                Some(AuthError::NotAuthenticated),
            )
            .await
            .inspect_err(|e| warn!(error = %e, "Profile update failed"))?;

        if !user.is_customer() || user.id != current.id {
            warn!(role = %user.role, "Profile update returned a different account");
            return Err(AuthError::WrongRole(user.role));
        }

        let committed = self.inner.state.send_if_modified(|state| {
            let signed_in = self.logout_generation() == generation
                && state.customer.as_ref().is_some_and(|c| c.id == current.id);
            if signed_in {
                state.customer = Some(user.clone());
            }
            signed_in
        });
        if !committed {
            warn!("Customer signed out during the profile update");
            return Err(AuthError::NotAuthenticated);
        }
        info!("Profile updated");
        Ok(user)
    }

    fn logout_generation(&self) -> u64 {
        self.inner.logouts.load(Ordering::SeqCst)
    }

    /// Commit an authenticated user if, and only if, they are a customer.
    fn commit(&self, user: Customer) -> Result<Customer, AuthError> {
        if !user.is_customer() {
            warn!(role = %user.role, "Login failed: user is not a customer");
            return Err(AuthError::WrongRole(user.role));
        }

        set_sentry_user(&user.id, Some(user.email.as_str()));
        self.inner.state.send_modify(|state| {
            state.customer = Some(user.clone());
            state.is_loading = false;
        });
        Ok(user)
    }

    /// Run a remote call under the configured timeout and classify failures.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, AccountError>>,
        unauthorized: Option<AuthError>,
    ) -> Result<T, AuthError> {
        match tokio::time::timeout(self.inner.request_timeout, call).await {
            Ok(result) => result.map_err(|e| AuthError::from_account(e, unauthorized)),
            Err(_) => Err(AuthError::Timeout),
        }
    }
}
