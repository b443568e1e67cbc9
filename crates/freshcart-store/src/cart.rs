//! Cart store contract
//!
//! The seven row-level operations the cart synchronization service needs.
//! Every call is request/response and independently fallible; the store
//! itself guarantees nothing across calls.

use crate::error::StoreError;
use async_trait::async_trait;
use freshcart_domain::{Cart, CartId, CartItem, CartItemId, ProductId, UserId};
#[cfg(feature = "mocks")]
use mockall::automock;

/// Remote cart and cart-item rows keyed by user identity
#[cfg_attr(feature = "mocks", automock)]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Find the cart owned by `user`, if one exists
    async fn find_cart(&self, user: UserId) -> Result<Option<Cart>, StoreError>;

    /// Create a cart owned by `user`
    async fn create_cart(&self, user: UserId) -> Result<Cart, StoreError>;

    /// List all items of `cart`, each joined with its product snapshot.
    /// Order is stable per fetch but otherwise unspecified.
    async fn list_items(&self, cart: CartId) -> Result<Vec<CartItem>, StoreError>;

    /// Insert a new item row
    async fn insert_item(
        &self,
        cart: CartId,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), StoreError>;

    /// Set the quantity of an existing item row
    async fn update_item_quantity(
        &self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<(), StoreError>;

    /// Delete one item row
    async fn delete_item(&self, item: CartItemId) -> Result<(), StoreError>;

    /// Delete every item row belonging to `cart`
    async fn delete_items(&self, cart: CartId) -> Result<(), StoreError>;
}
