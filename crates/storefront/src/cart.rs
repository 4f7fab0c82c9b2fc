//! Shopping cart store.
//!
//! Wraps the [`CartState`] reducer from `borzfuel-core` in a shared handle.
//! Every mutation is applied in call order and published to subscribers
//! before the method returns.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, instrument};

use borzfuel_core::{CartAction, CartProduct, CartState, ProductId};

use crate::error::add_breadcrumb;

/// Shared handle to the shopping cart.
///
/// Clones share the same cart.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<watch::Sender<CartState>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Create an empty, closed cart.
    #[must_use]
    pub fn new() -> Self {
        let (state, _) = watch::channel(CartState::new());
        Self {
            inner: Arc::new(state),
        }
    }

    /// Current cart snapshot.
    #[must_use]
    pub fn snapshot(&self) -> CartState {
        self.inner.borrow().clone()
    }

    /// Receive a notification on every cart mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.inner.subscribe()
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// A quantity of zero leaves the cart untouched.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&self, product: CartProduct, quantity: u32) {
        if quantity == 0 {
            return;
        }
        add_breadcrumb(
            "cart",
            "Added to cart",
            Some(&[("product_id", product.id.as_str())]),
        );
        self.dispatch(CartAction::Add { product, quantity });
    }

    /// Add a single unit of `product`.
    pub fn add_one(&self, product: CartProduct) {
        self.add_to_cart(product, 1);
    }

    /// Remove the line for `id`, if present.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn remove_from_cart(&self, id: &ProductId) {
        add_breadcrumb(
            "cart",
            "Removed from cart",
            Some(&[("product_id", id.as_str())]),
        );
        self.dispatch(CartAction::Remove(id.clone()));
    }

    /// Set the quantity of the line for `id`.
    ///
    /// Zero or a negative quantity removes the line.
    #[instrument(skip(self), fields(product_id = %id))]
    pub fn update_quantity(&self, id: &ProductId, quantity: i64) {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.clone(),
            quantity,
        });
    }

    /// Empty the cart and close the sidebar.
    #[instrument(skip(self))]
    pub fn clear_cart(&self) {
        add_breadcrumb("cart", "Cleared cart", None);
        self.dispatch(CartAction::Clear);
    }

    pub fn toggle_cart(&self) {
        self.dispatch(CartAction::Toggle);
    }

    pub fn open_cart(&self) {
        self.dispatch(CartAction::Open);
    }

    pub fn close_cart(&self) {
        self.dispatch(CartAction::Close);
    }

    fn dispatch(&self, action: CartAction) {
        debug!(?action, "Cart action");
        self.inner.send_modify(|state| state.apply(action));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn savage() -> CartProduct {
        CartProduct::new("1", "Savage Formula", Decimal::new(4999, 2))
    }

    fn calm() -> CartProduct {
        CartProduct::new("2", "Calm Formula", Decimal::new(2500, 2))
    }

    #[test]
    fn test_add_merges_lines() {
        let cart = CartStore::new();
        cart.add_one(savage());
        cart.add_to_cart(savage(), 2);

        let state = cart.snapshot();
        assert_eq!(state.items().len(), 1);
        assert_eq!(state.total_items(), 3);
        assert_eq!(state.total_price(), Decimal::new(14997, 2));
    }

    #[test]
    fn test_add_zero_is_noop() {
        let cart = CartStore::new();
        let mut rx = cart.subscribe();
        cart.add_to_cart(savage(), 0);

        assert!(cart.snapshot().is_empty());
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn test_update_quantity_non_positive_removes() {
        let cart = CartStore::new();
        cart.add_one(savage());
        cart.add_one(calm());

        cart.update_quantity(&ProductId::new("1"), -3);
        let state = cart.snapshot();
        assert!(state.item(&ProductId::new("1")).is_none());
        assert_eq!(state.total_price(), Decimal::new(2500, 2));

        cart.update_quantity(&ProductId::new("2"), 4);
        assert_eq!(cart.snapshot().total_items(), 4);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let cart = CartStore::new();
        cart.add_one(savage());
        cart.remove_from_cart(&ProductId::new("404"));
        assert_eq!(cart.snapshot().total_items(), 1);
    }

    #[test]
    fn test_clear_closes_sidebar() {
        let cart = CartStore::new();
        cart.add_one(savage());
        cart.open_cart();
        cart.clear_cart();

        let state = cart.snapshot();
        assert!(state.is_empty());
        assert!(!state.is_open());
        assert_eq!(state.total_price(), Decimal::ZERO);
    }

    #[test]
    fn test_sidebar_visibility() {
        let cart = CartStore::new();
        cart.toggle_cart();
        assert!(cart.snapshot().is_open());
        cart.toggle_cart();
        assert!(!cart.snapshot().is_open());
        cart.open_cart();
        cart.open_cart();
        assert!(cart.snapshot().is_open());
        cart.close_cart();
        assert!(!cart.snapshot().is_open());
    }

    #[test]
    fn test_subscribers_observe_mutations() {
        let cart = CartStore::new();
        let mut rx = cart.subscribe();

        cart.add_one(savage());
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_items(), 1);

        cart.update_quantity(&ProductId::new("1"), 5);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().total_items(), 5);
    }

    #[test]
    fn test_clones_share_cart() {
        let cart = CartStore::new();
        let other = cart.clone();
        other.add_one(calm());
        assert_eq!(cart.snapshot().total_items(), 1);
    }
}
