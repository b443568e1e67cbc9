//! FreshCart remote store boundary
//!
//! Everything the client core needs from the managed backend, behind
//! object-safe async traits:
//! - [`CartStore`] — cart and cart-item rows keyed by user identity
//! - [`ProductCatalog`] — filtered/sorted product and category reads
//! - [`SettingsStore`] — the flat key/value configuration table
//! - [`IdentityProvider`] — the current signed-in identity plus change
//!   notification
//!
//! [`PostgrestStore`] implements the three data traits over a PostgREST-style
//! REST surface; [`AuthSession`] is a channel-backed identity handle for
//! embedding and tests. Enable the `mocks` feature to get generated mock
//! implementations of the traits for dependent crates' tests.

#![warn(unreachable_pub)]

pub mod cart;
pub mod catalog;
pub mod error;
pub mod identity;
pub mod postgrest;
pub mod settings;

pub use cart::CartStore;
pub use catalog::{CategoryQuery, CategorySort, ProductCatalog, ProductQuery, ProductSort};
pub use error::StoreError;
pub use identity::{AuthSession, IdentityProvider};
pub use postgrest::{PostgrestConfig, PostgrestStore};
pub use settings::{SettingRow, SettingsStore};

#[cfg(feature = "mocks")]
pub use cart::MockCartStore;
#[cfg(feature = "mocks")]
pub use catalog::MockProductCatalog;
#[cfg(feature = "mocks")]
pub use settings::MockSettingsStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
