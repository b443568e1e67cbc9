//! Testing utilities for the FreshCart workspace
//!
//! Shared fixtures, an in-memory backend implementing the store traits, and
//! a recording notice sink.

#![allow(missing_docs)]

pub mod memory;

pub use memory::InMemoryBackend;

use freshcart_cart::{Notice, NoticeSink};
use freshcart_domain::Product;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Build a product fixture with a decimal price string, e.g. `"40.00"`
pub fn product_fixture(name: &str, price: &str, stock: u32) -> Product {
    let slug = name.to_lowercase().replace(' ', "-");
    Product::new(name, slug, Decimal::from_str(price).unwrap(), stock)
}

/// Notice sink that records everything it receives
#[derive(Default)]
pub struct RecordingNotices {
    received: Mutex<Vec<Notice>>,
}

impl RecordingNotices {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded notices, oldest first
    pub fn all(&self) -> Vec<Notice> {
        self.received.lock().clone()
    }

    /// Just the message texts, oldest first
    pub fn messages(&self) -> Vec<&'static str> {
        self.received.lock().iter().map(|n| n.message).collect()
    }

    pub fn clear(&self) {
        self.received.lock().clear();
    }
}

impl NoticeSink for RecordingNotices {
    fn notify(&self, notice: Notice) {
        self.received.lock().push(notice);
    }
}

/// Install a fmt subscriber honoring `RUST_LOG`; safe to call repeatedly
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
