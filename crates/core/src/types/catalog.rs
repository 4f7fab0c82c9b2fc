//! Catalog documents from the CMS `products`, `benefits`, and `ingredients`
//! collections.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::types::{BenefitId, IngredientId, ProductId, ProductStatus};

/// An uploaded media reference, populated by the CMS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaImage {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

/// A product as published by the CMS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub slug: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub short_description: Option<String>,
    /// Unpopulated relations come back as bare IDs; only populated images
    /// are kept.
    #[serde(default, deserialize_with = "populated_only")]
    pub image: Option<MediaImage>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub in_stock: Option<bool>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default, deserialize_with = "populated_list")]
    pub ingredients: Vec<Ingredient>,
    #[serde(default, deserialize_with = "populated_list")]
    pub benefits: Vec<Benefit>,
}

impl Product {
    /// Percentage saved against the compare-at price, rounded to the nearest
    /// whole percent.
    ///
    /// `None` when there is no compare-at price or it is not above the price.
    #[must_use]
    pub fn discount_percent(&self) -> Option<u32> {
        let compare = self.compare_at_price?;
        if compare <= self.price || compare.is_zero() {
            return None;
        }
        let percent = (compare - self.price) / compare * Decimal::ONE_HUNDRED;
        percent
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
    }

    /// Whether the product can be added to a cart.
    #[must_use]
    pub fn is_purchasable(&self) -> bool {
        self.status == ProductStatus::Published && self.in_stock.unwrap_or(true)
    }
}

/// A selling point shown on the buy section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<String>,
    pub icon: FeatureIcon,
    pub text: String,
    pub color: FeatureColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureIcon {
    Truck,
    Shield,
    Clock,
    Award,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureColor {
    Green,
    Blue,
    Yellow,
    Red,
}

/// A product benefit card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Benefit {
    pub id: BenefitId,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub highlight: Option<String>,
    pub icon: BenefitIcon,
    #[serde(default)]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitIcon {
    Zap,
    Target,
    Battery,
    Brain,
    Shield,
    Award,
}

/// One line of the formula panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub amount: String,
    pub benefit: String,
    pub category: IngredientCategory,
    #[serde(default)]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientCategory {
    Pump,
    Endurance,
    Energy,
    Focus,
    Cognitive,
    Strength,
}

/// Accept a populated relation object; treat a bare ID (or anything else
/// that does not parse) as absent.
fn populated_only<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

/// Keep the populated entries of a relation list and drop bare IDs.
fn populated_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let values = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect())
}
