//! Customer session error types.

use thiserror::Error;

use borzfuel_core::{CustomerRole, EmailError};

use crate::account::AccountError;

/// Why a session operation did not succeed.
///
/// Every variant is an ordinary outcome: callers render a message and the
/// customer can try again.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email was malformed; no request was sent.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong email or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The Account Service authenticated a user who is not a customer.
    #[error("account has role {0}, not customer")]
    WrongRole(CustomerRole),

    /// The operation needs a signed-in customer.
    #[error("not signed in")]
    NotAuthenticated,

    /// The Account Service refused the request.
    #[error("request rejected ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or a generic one.
        message: String,
    },

    /// The request did not complete within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// Transport or decoding failure.
    #[error("account service unavailable: {0}")]
    Network(#[source] AccountError),
}

impl AuthError {
    /// Classify a transport error.
    ///
    /// A 401/403 becomes `unauthorized` when given, otherwise it is reported
    /// as [`AuthError::Rejected`] like any other status.
    pub(crate) fn from_account(err: AccountError, unauthorized: Option<Self>) -> Self {
        if err.is_unauthorized()
            && let Some(unauthorized) = unauthorized
        {
            return unauthorized;
        }
        if err.is_timeout() {
            return Self::Timeout;
        }
        match err {
            AccountError::Status { status, message } => Self::Rejected {
                status,
                message: message.unwrap_or_else(|| "request failed".to_string()),
            },
            other => Self::Network(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_status_maps_to_given_error() {
        let err = AuthError::from_account(
            AccountError::Status {
                status: 401,
                message: None,
            },
            Some(AuthError::InvalidCredentials),
        );
        assert!(matches!(err, AuthError::InvalidCredentials));

        let err = AuthError::from_account(
            AccountError::Status {
                status: 403,
                message: None,
            },
            Some(AuthError::NotAuthenticated),
        );
        assert!(matches!(err, AuthError::NotAuthenticated));

        let err = AuthError::from_account(
            AccountError::Status {
                status: 403,
                message: Some("Forbidden".to_string()),
            },
            None,
        );
        assert!(matches!(err, AuthError::Rejected { status: 403, .. }));
    }

    #[test]
    fn test_other_status_is_rejected_with_message() {
        let err = AuthError::from_account(
            AccountError::Status {
                status: 400,
                message: Some("A user with the given email is already registered.".to_string()),
            },
            Some(AuthError::InvalidCredentials),
        );
        assert_eq!(
            err.to_string(),
            "request rejected (400): A user with the given email is already registered."
        );
    }

    #[test]
    fn test_missing_document_is_network_error() {
        let err = AuthError::from_account(
            AccountError::MissingDocument("user"),
            None,
        );
        assert!(matches!(err, AuthError::Network(_)));
    }
}
