//! Settings table contract
//!
//! The backend keeps storefront configuration as flat key/value rows; values
//! are raw JSON and may be double-encoded strings. Typing them is the
//! settings resolver's job, not the store's.

use crate::error::StoreError;
use async_trait::async_trait;
#[cfg(feature = "mocks")]
use mockall::automock;
use serde::{Deserialize, Serialize};

/// One key/value configuration row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingRow {
    /// Setting key, e.g. `store_name`
    pub key: String,
    /// Raw JSON value as stored
    pub value: serde_json::Value,
}

impl SettingRow {
    /// Create a row from a key and raw value
    #[inline]
    #[must_use]
    pub fn new(key: impl Into<String>, value: serde_json::Value) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Read access to the settings table
#[cfg_attr(feature = "mocks", automock)]
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load every settings row
    async fn load_settings(&self) -> Result<Vec<SettingRow>, StoreError>;
}
