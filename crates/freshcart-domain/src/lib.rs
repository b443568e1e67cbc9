//! FreshCart domain model
//!
//! Defines the entities shared by the storefront client:
//! - Strongly-typed identifiers for users, products, categories, and carts
//! - Catalog entities (products, categories, images)
//! - Cart entities (carts, cart items) and their quantity invariants
//!
//! All monetary amounts are [`rust_decimal::Decimal`]; floating point never
//! touches a price.

#![warn(unreachable_pub)]

pub mod cart;
pub mod category;
pub mod ids;
pub mod product;

pub use cart::{Cart, CartItem};
pub use category::Category;
pub use ids::{CartId, CartItemId, CategoryId, ProductId, UserId};
pub use product::{Product, ProductImage};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
