//! Customer account area.
//!
//! Every account page is gated on the session: it waits while the startup
//! check is pending and sends anonymous visitors back to the home page.

use tracing::instrument;

use borzfuel_core::{Customer, Email, ProfileUpdate};

use crate::session::{AuthError, SessionState, SessionStore};

/// What an account page should render for the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountAccess {
    /// Session check still running; show a loading indicator.
    Pending,
    /// Nobody is signed in; redirect to `/`.
    RedirectHome,
    /// Render the page for this customer.
    Granted(Customer),
}

impl From<&SessionState> for AccountAccess {
    fn from(state: &SessionState) -> Self {
        match (state.customer(), state.is_loading()) {
            (_, true) => Self::Pending,
            (Some(customer), false) => Self::Granted(customer.clone()),
            (None, false) => Self::RedirectHome,
        }
    }
}

/// Outcome of the last profile save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileMessage {
    Saved,
    Failed,
}

impl ProfileMessage {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Saved => "Profile updated successfully!",
            Self::Failed => "Failed to update profile. Please try again.",
        }
    }

    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Editable profile form, seeded from the signed-in customer.
///
/// The email is shown but cannot be edited.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub marketing_consent: bool,
    email: Email,
    saved: Customer,
    is_editing: bool,
    is_saving: bool,
    message: Option<ProfileMessage>,
}

impl ProfileForm {
    #[must_use]
    pub fn new(customer: &Customer) -> Self {
        Self {
            first_name: customer.first_name.clone().unwrap_or_default(),
            last_name: customer.last_name.clone().unwrap_or_default(),
            marketing_consent: customer.marketing_consent.unwrap_or(false),
            email: customer.email.clone(),
            saved: customer.clone(),
            is_editing: false,
            is_saving: false,
            message: None,
        }
    }

    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.is_editing
    }

    #[must_use]
    pub const fn is_saving(&self) -> bool {
        self.is_saving
    }

    #[must_use]
    pub const fn message(&self) -> Option<ProfileMessage> {
        self.message
    }

    pub const fn start_editing(&mut self) {
        self.is_editing = true;
    }

    /// Discard edits and leave edit mode.
    pub fn cancel(&mut self) {
        *self = Self::new(&self.saved);
    }

    pub const fn dismiss_message(&mut self) {
        self.message = None;
    }

    fn update(&self) -> ProfileUpdate {
        ProfileUpdate {
            first_name: Some(self.first_name.trim().to_string()),
            last_name: Some(self.last_name.trim().to_string()),
            marketing_consent: Some(self.marketing_consent),
        }
    }

    /// Save the form through the session store.
    ///
    /// On success the form is reseeded from the saved customer and leaves
    /// edit mode; on failure the edits are kept.
    ///
    /// # Errors
    ///
    /// Returns the session store's [`AuthError`].
    #[instrument(skip(self, session))]
    pub async fn save(&mut self, session: &SessionStore) -> Result<Customer, AuthError> {
        self.is_saving = true;
        self.message = None;

        let result = session.update_profile(&self.update()).await;
        match &result {
            Ok(customer) => {
                *self = Self::new(customer);
                self.message = Some(ProfileMessage::Saved);
            }
            Err(_) => {
                self.is_saving = false;
                self.message = Some(ProfileMessage::Failed);
            }
        }
        result
    }
}
