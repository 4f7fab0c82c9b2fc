//! Customer documents as returned by the Account Service.

use serde::{Deserialize, Serialize};

use crate::types::{CustomerId, CustomerRole, CustomerStatus, Email};

/// A user document from the CMS `users` collection.
///
/// The storefront only keeps documents whose `role` is
/// [`CustomerRole::Customer`]; the role is carried so that the session layer
/// can check it before committing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub email: Email,
    pub role: CustomerRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_consent: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_status: Option<CustomerStatus>,
}

impl Customer {
    /// Whether this document may populate a storefront session.
    #[must_use]
    pub const fn is_customer(&self) -> bool {
        self.role.is_customer()
    }

    /// Full name when known, otherwise the email address.
    #[must_use]
    pub fn display_name(&self) -> String {
        let first = self.first_name.as_deref().unwrap_or("").trim();
        let last = self.last_name.as_deref().unwrap_or("").trim();
        match (first.is_empty(), last.is_empty()) {
            (true, true) => self.email.to_string(),
            (false, true) => first.to_owned(),
            (true, false) => last.to_owned(),
            (false, false) => format!("{first} {last}"),
        }
    }

    /// Account standing, treating a missing value as active.
    #[must_use]
    pub fn status(&self) -> CustomerStatus {
        self.customer_status.unwrap_or_default()
    }
}

/// Partial update of a customer's own profile.
///
/// Has no `role` or `customerStatus` field; neither can be changed from the
/// storefront.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marketing_consent: Option<bool>,
}

impl ProfileUpdate {
    /// Whether the update carries no fields at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.last_name.is_none() && self.marketing_consent.is_none()
    }
}
