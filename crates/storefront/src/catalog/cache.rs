//! Cache types for catalog responses.

use std::sync::Arc;

use borzfuel_core::{Benefit, Ingredient, Product};

/// Cache key for catalog collections and globals.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CacheKey {
    Products,
    Benefits,
    Ingredients,
    Global(Global),
}

/// CMS global documents used for site chrome.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum Global {
    Header,
    Footer,
}

impl Global {
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Footer => "footer",
        }
    }
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Arc<[Product]>),
    Benefits(Arc<[Benefit]>),
    Ingredients(Arc<[Ingredient]>),
    Global(Arc<serde_json::Value>),
}
