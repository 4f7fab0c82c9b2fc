//! Subcommand implementations.

pub mod account;
pub mod catalog;
pub mod quote;

use thiserror::Error;

use borzfuel_storefront::catalog::CatalogError;
use borzfuel_storefront::session::AuthError;
use borzfuel_storefront::ui::FormError;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Storefront(#[from] borzfuel_storefront::Error),

    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error("{0}")]
    Form(#[from] FormError),

    /// `update-profile` was given nothing to change.
    #[error("Nothing to update; pass --first-name, --last-name or --marketing-consent")]
    EmptyUpdate,

    /// A quote item did not name a published product.
    #[error("Unknown product: {0}")]
    UnknownProduct(String),

    /// A quote item was not `slug` or `slug=quantity`.
    #[error("Invalid item `{0}`: expected slug or slug=quantity")]
    InvalidItem(String),
}
