//! Crate-level error type and Sentry helpers.
//!
//! Store operations never fail across their boundary except through their own
//! result types ([`AuthError`], [`FormError`]). [`Error`] gathers everything a
//! host application can hit while wiring the storefront together.

use thiserror::Error;

use crate::account::AccountError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::session::AuthError;
use crate::ui::FormError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Account Service client could not be built or called.
    #[error("Account error: {0}")]
    Account(#[from] AccountError),

    /// A session operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Catalog request failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Form input was rejected before any request was made.
    #[error("{0}")]
    Form(#[from] FormError),
}

/// Result type alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Set the Sentry user context for the signed-in customer.
///
/// Call this after a customer session is established to associate errors
/// with the customer.
pub fn set_sentry_user(user_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the customer.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Add a breadcrumb for a storefront action.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::from(FormError::PasswordMismatch);
        assert_eq!(err.to_string(), "Passwords do not match");
    }

    #[test]
    fn test_sentry_helpers_without_client() {
        // Without an initialized client these are no-ops and must not panic.
        set_sentry_user(&"42", Some("ola@example.no"));
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "p1")]));
        clear_sentry_user();
    }
}
