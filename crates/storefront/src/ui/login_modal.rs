//! Sign-in / sign-up modal controller.
//!
//! Any part of the storefront holding a [`LoginModal`] handle can open it;
//! the component that renders the modal subscribes to its state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use borzfuel_core::Customer;

use super::forms::{LoginForm, RegisterForm};
use crate::error::{Error, Result};
use crate::session::{AuthError, SessionStore};

/// Shown for any failed sign-in, whatever the cause.
pub const LOGIN_FAILED: &str = "Invalid email or password";

/// Shown when the Account Service refuses a registration.
pub const REGISTER_FAILED: &str = "Registration failed. Please try again.";

/// Which form the modal shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalMode {
    #[default]
    SignIn,
    SignUp,
}

/// Observable modal state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginModalState {
    pub is_open: bool,
    pub mode: ModalMode,
    pub error: Option<String>,
    pub is_submitting: bool,
}

/// Shared handle to the login modal.
#[derive(Clone)]
pub struct LoginModal {
    inner: Arc<watch::Sender<LoginModalState>>,
}

impl Default for LoginModal {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginModal {
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(LoginModalState::default());
        Self {
            inner: Arc::new(state),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> LoginModalState {
        self.inner.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoginModalState> {
        self.inner.subscribe()
    }

    /// Open on the sign-in form.
    pub fn open(&self) {
        self.open_in(ModalMode::SignIn);
    }

    /// Open on the sign-up form.
    pub fn open_register(&self) {
        self.open_in(ModalMode::SignUp);
    }

    fn open_in(&self, mode: ModalMode) {
        debug!(?mode, "Opening login modal");
        self.inner.send_modify(|state| {
            state.is_open = true;
            state.mode = mode;
            state.error = None;
        });
    }

    pub fn close(&self) {
        debug!("Closing login modal");
        self.inner.send_modify(|state| {
            state.is_open = false;
            state.error = None;
        });
    }

    /// Switch between the forms, clearing any error.
    pub fn switch_mode(&self, mode: ModalMode) {
        self.inner.send_modify(|state| {
            state.mode = mode;
            state.error = None;
        });
    }

    /// Submit the sign-in form.
    ///
    /// Closes the modal on success. On failure the modal stays open showing
    /// [`LOGIN_FAILED`].
    ///
    /// # Errors
    ///
    /// Returns the session store's [`AuthError`].
    #[instrument(skip(self, session, form))]
    pub async fn submit_login(
        &self,
        session: &SessionStore,
        form: &LoginForm,
    ) -> std::result::Result<Customer, AuthError> {
        self.begin_submit();
        let result = session.login(&form.email, &form.password).await;
        self.finish_submit(result.as_ref().map(|_| ()).map_err(|_| LOGIN_FAILED));
        result
    }

    /// Submit the sign-up form.
    ///
    /// The form is validated first; a validation failure shows its own
    /// message and no request is made. A remote failure shows
    /// [`REGISTER_FAILED`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Form`] or [`Error::Auth`].
    #[instrument(skip(self, session, form))]
    pub async fn submit_register(
        &self,
        session: &SessionStore,
        form: &RegisterForm,
    ) -> Result<Customer> {
        self.begin_submit();

        let request = match form.validate() {
            Ok(request) => request,
            Err(e) => {
                let message = e.to_string();
                self.finish_submit(Err(message.as_str()));
                return Err(Error::Form(e));
            }
        };

        let result = session.register(&request).await;
        self.finish_submit(result.as_ref().map(|_| ()).map_err(|_| REGISTER_FAILED));
        Ok(result?)
    }

    fn begin_submit(&self) {
        self.inner.send_modify(|state| {
            state.is_submitting = true;
            state.error = None;
        });
    }

    fn finish_submit(&self, outcome: std::result::Result<(), &str>) {
        self.inner.send_modify(|state| {
            state.is_submitting = false;
            match outcome {
                Ok(()) => {
                    state.is_open = false;
                    state.error = None;
                }
                Err(message) => state.error = Some(message.to_string()),
            }
        });
    }
}
