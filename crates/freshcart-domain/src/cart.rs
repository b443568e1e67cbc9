//! Cart entities
//!
//! A cart is the per-user container; cart items are its (product, quantity)
//! lines. Two invariants hold for stored rows:
//! - `quantity >= 1` — a zero quantity means the row is deleted, never stored
//! - at most one item per distinct product (duplicate adds merge quantities)

use crate::ids::{CartId, CartItemId, ProductId, UserId};
use crate::product::Product;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A user's cart container
///
/// Created lazily on the first cart-mutating action and never deleted by the
/// client; removing every item leaves an empty container behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart identifier
    pub id: CartId,
    /// Owning user; `None` for anonymous carts, which this client does not
    /// address
    #[serde(default)]
    pub user_id: Option<UserId>,
    /// Alternative anonymous-session key allowed by the schema
    #[serde(default)]
    pub session_id: Option<String>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Row update time
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    /// Create a new cart owned by the given user
    #[must_use]
    pub fn for_user(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: CartId::new(),
            user_id: Some(user_id),
            session_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// One product line in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Item row identifier
    pub id: CartItemId,
    /// Owning cart
    pub cart_id: CartId,
    /// Referenced product
    pub product_id: ProductId,
    /// Units of the product; `>= 1` for every stored row
    pub quantity: u32,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Row update time
    pub updated_at: DateTime<Utc>,
    /// Denormalized product snapshot joined at read time. `None` when the
    /// join did not resolve; aggregates treat an unresolved product as
    /// contributing zero.
    #[serde(default)]
    pub product: Option<Product>,
}

impl CartItem {
    /// Create a new item row
    #[must_use]
    pub fn new(cart_id: CartId, product_id: ProductId, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            id: CartItemId::new(),
            cart_id,
            product_id,
            quantity,
            created_at: now,
            updated_at: now,
            product: None,
        }
    }

    /// With the joined product snapshot attached
    #[inline]
    #[must_use]
    pub fn with_product(mut self, product: Product) -> Self {
        self.product = Some(product);
        self
    }

    /// Price contribution of this line: unit price times quantity, zero when
    /// the product reference did not resolve
    #[must_use]
    pub fn line_subtotal(&self) -> Decimal {
        match &self.product {
            Some(product) => product.price * Decimal::from(self.quantity),
            None => Decimal::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_subtotal_multiplies_price_by_quantity() {
        let product = Product::new("Butter", "butter", Decimal::new(25000, 2), 10);
        let cart = Cart::for_user(UserId::new());
        let item = CartItem::new(cart.id, product.id, 3).with_product(product);

        assert_eq!(item.line_subtotal(), Decimal::new(75000, 2));
    }

    #[test]
    fn unresolved_product_contributes_zero() {
        let cart = Cart::for_user(UserId::new());
        let item = CartItem::new(cart.id, ProductId::new(), 4);

        assert_eq!(item.line_subtotal(), Decimal::ZERO);
    }

    #[test]
    fn cart_for_user_sets_owner() {
        let user = UserId::new();
        let cart = Cart::for_user(user);

        assert_eq!(cart.user_id, Some(user));
        assert!(cart.session_id.is_none());
    }
}
