//! Core types for BorzFuel.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod catalog;
pub mod customer;
pub mod email;
pub mod id;
pub mod price;
pub mod status;

pub use catalog::{
    Benefit, BenefitIcon, Feature, FeatureColor, FeatureIcon, Ingredient, IngredientCategory,
    MediaImage, Product,
};
pub use customer::{Customer, ProfileUpdate};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use status::*;
