//! Cached settings resolution
//!
//! Settings change rarely; the resolver serves a cached snapshot for five
//! minutes before re-reading the table. A failed load is logged and answered
//! with the defaults without caching them, so the next read retries.

use crate::model::StoreSettings;
use freshcart_store::{SettingsStore, StoreError};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::sync::Arc;
use std::time::Duration;

/// How long a resolved snapshot stays fresh
const SETTINGS_TTL: Duration = Duration::from_secs(5 * 60);

static DEFAULTS: Lazy<Arc<StoreSettings>> = Lazy::new(|| Arc::new(StoreSettings::default()));

/// Read-only, cached view of the settings table
#[derive(Clone)]
pub struct SettingsResolver {
    store: Arc<dyn SettingsStore>,
    cache: Cache<(), Arc<StoreSettings>>,
}

impl std::fmt::Debug for SettingsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsResolver")
            .field("cached", &self.cache.contains_key(&()))
            .finish_non_exhaustive()
    }
}

impl SettingsResolver {
    /// Create a resolver with the default five-minute TTL
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_ttl(store, SETTINGS_TTL)
    }

    /// Create a resolver with a specific TTL
    #[must_use]
    pub fn with_ttl(store: Arc<dyn SettingsStore>, ttl: Duration) -> Self {
        Self {
            store,
            cache: Cache::builder().max_capacity(1).time_to_live(ttl).build(),
        }
    }

    /// The current settings snapshot
    ///
    /// Never fails: a load error falls back to [`StoreSettings::default`].
    pub async fn current(&self) -> Arc<StoreSettings> {
        let store = Arc::clone(&self.store);
        let load = async move {
            let rows = store.load_settings().await?;
            Ok::<_, StoreError>(Arc::new(StoreSettings::from_rows(&rows)))
        };

        match self.cache.try_get_with((), load).await {
            Ok(settings) => settings,
            Err(error) => {
                tracing::warn!(%error, "settings load failed; serving defaults");
                Arc::clone(&DEFAULTS)
            }
        }
    }

    /// Drop the cached snapshot so the next read hits the store
    pub async fn invalidate(&self) {
        self.cache.invalidate(&()).await;
    }
}
