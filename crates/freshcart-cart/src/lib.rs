//! FreshCart cart synchronization service
//!
//! Keeps a locally readable view of the signed-in user's shopping cart
//! consistent with the remote cart store:
//! - Full-refresh reconciliation: the visible item list is always the result
//!   of one authoritative remote read, never a hand-rolled local merge
//! - Mutations (add/update/remove/clear) with stock ceilings, serialized per
//!   service instance so duplicate adds merge instead of racing
//! - Session epochs: reconciliations started under a previous identity are
//!   discarded on arrival instead of overwriting newer state
//! - Every mutation outcome surfaces as a transient user notice; no failure
//!   escapes as a panic
//!
//! # Example
//!
//! ```rust,ignore
//! use freshcart_cart::{CartService, DiscardNotices};
//! use std::sync::Arc;
//!
//! # async fn example(identity: Arc<dyn freshcart_store::IdentityProvider>,
//! #                  store: Arc<dyn freshcart_store::CartStore>) {
//! let cart = Arc::new(CartService::new(identity, store, Arc::new(DiscardNotices)));
//! let watcher = cart.spawn_identity_watcher();
//! println!("{} items", cart.item_count());
//! # drop(watcher);
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod notice;
pub mod service;
pub mod state;

pub use error::CartError;
pub use notice::{messages, DiscardNotices, Notice, NoticeSink, Severity};
pub use service::CartService;
pub use state::CartSnapshot;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the cart service
    pub use crate::{CartError, CartService, CartSnapshot, Notice, NoticeSink, Severity};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
