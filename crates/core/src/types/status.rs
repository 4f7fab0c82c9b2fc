//! Role and status enums for CMS documents.

use serde::{Deserialize, Serialize};

/// Role of a user document in the CMS `users` collection.
///
/// Admins and customers share one auth collection; the storefront only ever
/// represents customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerRole {
    /// Site administrator with access to the CMS admin panel.
    Admin,
    /// Shop customer.
    Customer,
}

impl CustomerRole {
    /// Whether this role may populate a storefront customer session.
    #[must_use]
    pub const fn is_customer(self) -> bool {
        matches!(self, Self::Customer)
    }
}

impl std::fmt::Display for CustomerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "admin"),
            Self::Customer => write!(f, "customer"),
        }
    }
}

/// Account standing of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
    Banned,
}

impl std::fmt::Display for CustomerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Banned => write!(f, "Banned"),
        }
    }
}

/// Publication status of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    Draft,
    Published,
    Archived,
}
