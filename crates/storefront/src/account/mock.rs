//! In-memory Account Service for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::SecretString;

use borzfuel_core::{Customer, CustomerId, CustomerRole, Email, ProfileUpdate};

use super::{AccountError, AccountService, RegisterRequest};

/// A canned reply for the next call.
pub enum Reply {
    User(Option<Customer>),
    Status(u16),
    Ok,
    /// Sleep before answering with the inner reply.
    Delayed(Duration, Box<Self>),
}

/// Replays queued replies in order and records every call.
#[derive(Default)]
pub struct MockAccountService {
    replies: Mutex<VecDeque<Reply>>,
    calls: Mutex<Vec<String>>,
    registered: Mutex<Vec<String>>,
    updates: Mutex<Vec<(CustomerId, ProfileUpdate)>>,
}

impl MockAccountService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        let mock = Self::new();
        mock.replies.lock().unwrap_or_else(|e| e.into_inner()).extend(replies);
        mock
    }

    /// Names of the operations invoked so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Emails sent to `register`.
    pub fn registered(&self) -> Vec<String> {
        self.registered.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn updates(&self) -> Vec<(CustomerId, ProfileUpdate)> {
        self.updates.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    async fn next(&self, call: &str) -> Reply {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call.to_string());
        let mut reply = self
            .replies
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or(Reply::Status(500));
        loop {
            match reply {
                Reply::Delayed(delay, inner) => {
                    tokio::time::sleep(delay).await;
                    reply = *inner;
                }
                other => return other,
            }
        }
    }

    async fn next_user(&self, call: &str) -> Result<Option<Customer>, AccountError> {
        match self.next(call).await {
            Reply::User(user) => Ok(user),
            Reply::Ok => Ok(None),
            Reply::Status(status) => Err(AccountError::Status {
                status,
                message: None,
            }),
            Reply::Delayed(..) => unreachable!("delays are unwrapped in next()"),
        }
    }
}

pub fn customer(id: &str, email: &str) -> Customer {
    Customer {
        id: CustomerId::new(id),
        email: Email::parse(email).unwrap_or_else(|e| panic!("bad test email {email}: {e}")),
        role: CustomerRole::Customer,
        first_name: Some("Ola".to_string()),
        last_name: Some("Nordmann".to_string()),
        marketing_consent: Some(false),
        customer_status: None,
    }
}

pub fn admin(id: &str, email: &str) -> Customer {
    Customer {
        role: CustomerRole::Admin,
        ..customer(id, email)
    }
}

#[async_trait]
impl AccountService for MockAccountService {
    async fn current_user(&self) -> Result<Option<Customer>, AccountError> {
        self.next_user("me").await
    }

    async fn login(
        &self,
        _email: &Email,
        _password: &SecretString,
    ) -> Result<Customer, AccountError> {
        self.next_user("login")
            .await?
            .ok_or(AccountError::MissingDocument("user"))
    }

    async fn register(&self, request: &RegisterRequest) -> Result<Customer, AccountError> {
        self.registered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request.email.to_string());
        self.next_user("register")
            .await?
            .ok_or(AccountError::MissingDocument("doc"))
    }

    async fn logout(&self) -> Result<(), AccountError> {
        self.next_user("logout").await.map(|_| ())
    }

    async fn update_user(
        &self,
        id: &CustomerId,
        update: &ProfileUpdate,
    ) -> Result<Customer, AccountError> {
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((id.clone(), update.clone()));
        self.next_user("update")
            .await?
            .ok_or(AccountError::MissingDocument("doc"))
    }
}
