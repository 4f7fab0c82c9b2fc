//! Cart line items, cart state, and the cart reducer.
//!
//! [`CartState::apply`] is the only way to change a cart. Totals are
//! recomputed from the full item list after every change, so they cannot
//! drift from the items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{MediaImage, Price, Product, ProductId};

/// Free shipping threshold advertised on the buy section, in dollars.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(75, 0, 0, false, 0);

/// Image shown next to a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartImage {
    pub url: String,
    pub alt: String,
}

impl From<&MediaImage> for CartImage {
    fn from(image: &MediaImage) -> Self {
        Self {
            url: image.url.clone(),
            alt: image.alt.clone(),
        }
    }
}

/// The product half of a cart line: everything except the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartProduct {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    pub image: Option<CartImage>,
}

impl CartProduct {
    /// A cart product without an image.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
        }
    }
}

impl From<&Product> for CartProduct {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price,
            image: product.image.as_ref().map(CartImage::from),
        }
    }
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price.
    pub price: Decimal,
    /// Always at least 1.
    pub quantity: u32,
    pub image: Option<CartImage>,
}

impl CartItem {
    fn from_product(product: CartProduct, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            quantity,
            image: product.image,
        }
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Intents a cart accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add `quantity` of a product, merging with an existing line.
    Add { product: CartProduct, quantity: u32 },
    /// Drop the line for a product.
    Remove(ProductId),
    /// Set a line's quantity; zero or below removes the line. Quantities
    /// above `u32::MAX` are ignored.
    UpdateQuantity { id: ProductId, quantity: i64 },
    /// Back to the initial state.
    Clear,
    Toggle,
    Open,
    Close,
}

/// Cart contents, sidebar visibility, and derived totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartState {
    items: Vec<CartItem>,
    is_open: bool,
    total_items: u64,
    total_price: Decimal,
}

impl Default for CartState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            is_open: false,
            total_items: 0,
            total_price: Decimal::ZERO,
        }
    }
}

impl CartState {
    /// An empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up the line for a product.
    #[must_use]
    pub fn item(&self, id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.is_open
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Sum of all line totals.
    #[must_use]
    pub const fn total_price(&self) -> Decimal {
        self.total_price
    }

    /// Total formatted for display.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        Price::usd(self.total_price).to_string()
    }

    /// Whether the cart total reaches the free shipping threshold.
    #[must_use]
    pub fn qualifies_for_free_shipping(&self) -> bool {
        self.total_price >= FREE_SHIPPING_THRESHOLD
    }

    /// Apply an action and return the next state.
    #[must_use]
    pub fn reduce(mut self, action: CartAction) -> Self {
        self.apply(action);
        self
    }

    /// Apply an action in place.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add { product, quantity } => {
                if quantity == 0 {
                    return;
                }
                match self.items.iter_mut().find(|item| item.id == product.id) {
                    Some(existing) => {
                        existing.quantity = existing.quantity.saturating_add(quantity);
                    }
                    None => self.items.push(CartItem::from_product(product, quantity)),
                }
                self.recompute_totals();
            }
            CartAction::Remove(id) => {
                self.items.retain(|item| item.id != id);
                self.recompute_totals();
            }
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    self.apply(CartAction::Remove(id));
                    return;
                }
                let Ok(quantity) = u32::try_from(quantity) else {
                    return;
                };
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    item.quantity = quantity;
                }
                self.recompute_totals();
            }
            CartAction::Clear => *self = Self::default(),
            CartAction::Toggle => self.is_open = !self.is_open,
            CartAction::Open => self.is_open = true,
            CartAction::Close => self.is_open = false,
        }
    }

    fn recompute_totals(&mut self) {
        self.total_items = self
            .items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum();
        self.total_price = self.items.iter().map(CartItem::line_total).sum();
    }
}
