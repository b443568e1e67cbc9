//! Cart state snapshot
//!
//! The service owns one mutable snapshot behind a lock; consumers only ever
//! see clones. Derived values are recomputed from the item list on every
//! read and never cached separately.

use freshcart_domain::{CartId, CartItem};
use rust_decimal::Decimal;

/// A point-in-time view of the cart
#[derive(Debug, Clone, Default)]
pub struct CartSnapshot {
    /// Item lines, in the order the last reconciliation returned them
    pub items: Vec<CartItem>,
    /// The resolved cart, or `None` while signed out / before first resolve
    pub cart_id: Option<CartId>,
    /// Whether a reconciliation fetch is in flight
    pub loading: bool,
}

impl CartSnapshot {
    /// Total units across all items
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line subtotals; an unresolved product contributes zero
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_subtotal).sum()
    }

    /// Whether the cart has no items
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The item referencing `product_id`, if present
    #[must_use]
    pub fn item_for_product(
        &self,
        product_id: freshcart_domain::ProductId,
    ) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use freshcart_domain::{Cart, Product, ProductId, UserId};
    use pretty_assertions::assert_eq;

    #[test]
    fn derived_values_over_mixed_items() {
        let cart = Cart::for_user(UserId::new());
        let priced = Product::new("Paneer", "paneer", Decimal::new(10000, 2), 10);
        let snapshot = CartSnapshot {
            items: vec![
                CartItem::new(cart.id, priced.id, 2).with_product(priced),
                // joined product missing: counts toward item_count, not subtotal
                CartItem::new(cart.id, ProductId::new(), 1),
            ],
            cart_id: Some(cart.id),
            loading: false,
        };

        assert_eq!(snapshot.item_count(), 3);
        assert_eq!(snapshot.subtotal(), Decimal::new(20000, 2));
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn empty_snapshot_is_zeroed() {
        let snapshot = CartSnapshot::default();
        assert_eq!(snapshot.item_count(), 0);
        assert_eq!(snapshot.subtotal(), Decimal::ZERO);
        assert!(snapshot.is_empty());
    }
}
