//! Sign-in and sign-up form input.

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use borzfuel_core::{Email, EmailError};

use crate::account::RegisterRequest;

/// Shortest password accepted at sign-up.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Form input rejected before any request is made.
///
/// The display text is what the form shows the customer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    #[error("Please enter a valid email address")]
    InvalidEmail(#[from] EmailError),
}

/// Sign-in form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: SecretString::from(password.into()),
        }
    }
}

/// Sign-up form.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub marketing_consent: bool,
}

impl RegisterForm {
    /// Check the form and build the registration request.
    ///
    /// Checks run in order: matching passwords, password length, email.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormError`] found.
    pub fn validate(&self) -> Result<RegisterRequest, FormError> {
        let password = self.password.expose_secret();
        if password != self.confirm_password.expose_secret() {
            return Err(FormError::PasswordMismatch);
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(FormError::PasswordTooShort {
                min: MIN_PASSWORD_LENGTH,
            });
        }
        let email = Email::parse(&self.email)?;

        Ok(RegisterRequest {
            email,
            password: self.password.clone(),
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            marketing_consent: self.marketing_consent,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(email: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            email: email.to_string(),
            password: SecretString::from(password),
            confirm_password: SecretString::from(confirm),
            first_name: " Kari ".to_string(),
            last_name: "Nordmann".to_string(),
            marketing_consent: true,
        }
    }

    #[test]
    fn test_valid_form() {
        let request = form("kari@example.no", "hemmelig", "hemmelig")
            .validate()
            .unwrap();
        assert_eq!(request.email.as_str(), "kari@example.no");
        assert_eq!(request.first_name, "Kari");
        assert!(request.marketing_consent);
    }

    #[test]
    fn test_mismatch_checked_first() {
        let err = form("not-an-email", "abc", "abd").validate().unwrap_err();
        assert_eq!(err, FormError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_short_password() {
        let err = form("kari@example.no", "abc12", "abc12").validate().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_exactly_min_length_accepted() {
        assert!(form("kari@example.no", "abc123", "abc123").validate().is_ok());
    }

    #[test]
    fn test_invalid_email() {
        let err = form("kari.example.no", "hemmelig", "hemmelig")
            .validate()
            .unwrap_err();
        assert!(matches!(err, FormError::InvalidEmail(_)));
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }
}
