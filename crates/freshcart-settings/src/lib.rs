//! FreshCart settings resolver
//!
//! The backend keeps storefront configuration as flat key/value rows.
//! This crate folds them into a typed [`StoreSettings`] object over known
//! defaults, caches the result with a TTL, and provides the money helpers
//! the storefront derives from configuration (price formatting, shipping
//! fees, order totals).

#![warn(unreachable_pub)]

pub mod model;
pub mod resolver;

pub use model::StoreSettings;
pub use resolver::SettingsResolver;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
