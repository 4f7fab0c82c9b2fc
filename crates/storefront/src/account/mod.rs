//! Account Service client.
//!
//! The Account Service is the CMS's user-authentication REST API. Sessions
//! are cookie based: the client keeps a cookie jar so the session cookie set
//! by `login` is sent on every later call.
//!
//! | Operation | Endpoint |
//! |---|---|
//! | Session check | `GET /api/users/me` |
//! | Login | `POST /api/users/login` |
//! | Register | `POST /api/users` |
//! | Logout | `POST /api/users/logout` |
//! | Profile update | `PATCH /api/users/{id}` |

mod error;
#[cfg(test)]
pub(crate) mod mock;

pub use error::AccountError;

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};
use url::Url;

use borzfuel_core::{Customer, CustomerId, CustomerRole, Email, ProfileUpdate};

use crate::config::StorefrontConfig;

/// Details for a new customer account.
///
/// There is no role field: every registration is sent as a customer.
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: Email,
    pub password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub marketing_consent: bool,
}

/// Remote user-authentication operations.
///
/// Implemented over HTTP by [`AccountClient`]; the session store only sees
/// this trait.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// The user behind the current session cookie, if any.
    async fn current_user(&self) -> Result<Option<Customer>, AccountError>;

    /// Authenticate with email and password, establishing a session.
    async fn login(&self, email: &Email, password: &SecretString)
    -> Result<Customer, AccountError>;

    /// Create a customer account.
    async fn register(&self, request: &RegisterRequest) -> Result<Customer, AccountError>;

    /// End the current session.
    async fn logout(&self) -> Result<(), AccountError>;

    /// Apply a partial update to a user document.
    async fn update_user(
        &self,
        id: &CustomerId,
        update: &ProfileUpdate,
    ) -> Result<Customer, AccountError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterBody<'a> {
    email: &'a str,
    password: &'a str,
    first_name: &'a str,
    last_name: &'a str,
    marketing_consent: bool,
    role: CustomerRole,
}

impl<'a> From<&'a RegisterRequest> for RegisterBody<'a> {
    fn from(request: &'a RegisterRequest) -> Self {
        Self {
            email: request.email.as_str(),
            password: request.password.expose_secret(),
            first_name: &request.first_name,
            last_name: &request.last_name,
            marketing_consent: request.marketing_consent,
            role: CustomerRole::Customer,
        }
    }
}

/// `{ user: ... }` envelope used by `me` and `login`.
#[derive(Debug, Deserialize)]
struct UserEnvelope {
    #[serde(default)]
    user: Option<Customer>,
}

/// `{ doc: ... }` envelope used by create and update.
#[derive(Debug, Deserialize)]
struct DocEnvelope {
    #[serde(default)]
    doc: Option<Customer>,
}

/// CMS error bodies carry either `message` or `errors[].message`.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    message: String,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        self.message.or_else(|| {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Account Client
// ─────────────────────────────────────────────────────────────────────────────

/// HTTP client for the Account Service.
///
/// Cheap to clone; clones share the cookie jar and so the session.
#[derive(Clone)]
pub struct AccountClient {
    inner: Arc<AccountClientInner>,
}

struct AccountClientInner {
    client: reqwest::Client,
    base_url: Url,
}

impl AccountClient {
    /// Create a client with its own cookie jar.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &StorefrontConfig) -> Result<Self, AccountError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(AccountClientInner {
                client,
                base_url: config.cms_url.clone(),
            }),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AccountError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Send a request and decode a success body.
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AccountError> {
        let body = self.send_raw(request).await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Send a request and return the raw success body, turning non-2xx into
    /// [`AccountError::Status`].
    async fn send_raw(&self, request: reqwest::RequestBuilder) -> Result<String, AccountError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .unwrap_or_default()
                .into_message();
            debug!(status = %status, message = ?message, "Account Service rejected request");
            return Err(AccountError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl AccountService for AccountClient {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<Option<Customer>, AccountError> {
        let url = self.endpoint("api/users/me")?;
        let envelope: UserEnvelope = self.send(self.inner.client.get(url)).await?;
        Ok(envelope.user)
    }

    #[instrument(skip(self, password), fields(email = %email))]
    async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<Customer, AccountError> {
        let url = self.endpoint("api/users/login")?;
        let body = LoginBody {
            email: email.as_str(),
            password: password.expose_secret(),
        };
        let envelope: UserEnvelope = self.send(self.inner.client.post(url).json(&body)).await?;
        envelope.user.ok_or(AccountError::MissingDocument("user"))
    }

    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn register(&self, request: &RegisterRequest) -> Result<Customer, AccountError> {
        let url = self.endpoint("api/users")?;
        let body = RegisterBody::from(request);
        let envelope: DocEnvelope = self.send(self.inner.client.post(url).json(&body)).await?;
        envelope.doc.ok_or(AccountError::MissingDocument("doc"))
    }

    #[instrument(skip(self))]
    async fn logout(&self) -> Result<(), AccountError> {
        let url = self.endpoint("api/users/logout")?;
        self.send_raw(self.inner.client.post(url)).await?;
        Ok(())
    }

    #[instrument(skip(self, update))]
    async fn update_user(
        &self,
        id: &CustomerId,
        update: &ProfileUpdate,
    ) -> Result<Customer, AccountError> {
        let url = self.endpoint(&format!("api/users/{id}"))?;
        let envelope: DocEnvelope = self
            .send(self.inner.client.patch(url).json(update))
            .await?;
        envelope.doc.ok_or(AccountError::MissingDocument("doc"))
    }
}
