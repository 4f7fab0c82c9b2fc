//! BorzFuel storefront library.
//!
//! Client-side state for the BorzFuel storefront: the shopping cart, the
//! customer session backed by the CMS Account Service, the login modal and
//! account pages, and a cached reader for the CMS catalog.
//!
//! [`Storefront`](state::Storefront) ties these together; build it from a
//! [`StorefrontConfig`](config::StorefrontConfig) and call `start()` once.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod account;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod telemetry;
pub mod ui;

pub use error::{Error, Result};
pub use state::Storefront;
