//! BorzFuel Core - Shared types library.
//!
//! This crate provides the types shared by the BorzFuel components:
//! - `storefront` - Cart, customer session, and catalog clients
//! - `cli` - Command-line tools for exercising the storefront against the CMS
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O,
//! no HTTP clients. The cart reducer lives here because it is a pure function
//! of its previous state and an action.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, roles, customers, catalog documents
//! - [`cart`] - Cart line items, cart state, and the cart reducer

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{CartAction, CartImage, CartItem, CartProduct, CartState, FREE_SHIPPING_THRESHOLD};
pub use types::*;
