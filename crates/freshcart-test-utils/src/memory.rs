//! In-memory backend
//!
//! Implements every store trait against process-local tables so scenario
//! tests can run the real service logic without a network. Supports
//! counting remote calls, simulating outages, and holding item reads in
//! flight to exercise stale-session handling.

use async_trait::async_trait;
use dashmap::DashMap;
use freshcart_domain::{
    Cart, CartId, CartItem, CartItemId, Category, CategoryId, Product, ProductId, UserId,
};
use freshcart_store::{
    CartStore, CategoryQuery, CategorySort, ProductCatalog, ProductQuery, ProductSort, SettingRow,
    SettingsStore, StoreError,
};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Process-local implementation of the FreshCart store traits
#[derive(Default)]
pub struct InMemoryBackend {
    products: DashMap<ProductId, Product>,
    carts: DashMap<UserId, Cart>,
    items: Mutex<Vec<CartItem>>,
    categories: Mutex<Vec<Category>>,
    settings: Mutex<Vec<SettingRow>>,
    remote_calls: AtomicU64,
    offline: AtomicBool,
    gate: Arc<AsyncMutex<()>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a product so cart items can join against it
    pub fn stock_product(&self, product: Product) {
        self.products.insert(product.id, product);
    }

    pub fn add_category(&self, category: Category) {
        self.categories.lock().push(category);
    }

    pub fn put_setting(&self, row: SettingRow) {
        self.settings.lock().push(row);
    }

    /// Number of store operations served so far
    pub fn remote_calls(&self) -> u64 {
        self.remote_calls.load(Ordering::Acquire)
    }

    /// Simulate an outage: every operation fails until switched back on
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Release);
    }

    /// Hold every subsequent item read in flight until the guard is dropped
    pub async fn hold_item_reads(&self) -> OwnedMutexGuard<()> {
        Arc::clone(&self.gate).lock_owned().await
    }

    /// Raw item rows for one cart, in insertion order
    pub fn item_rows(&self, cart: CartId) -> Vec<CartItem> {
        self.items
            .lock()
            .iter()
            .filter(|item| item.cart_id == cart)
            .cloned()
            .collect()
    }

    fn begin_op(&self) -> Result<(), StoreError> {
        self.remote_calls.fetch_add(1, Ordering::AcqRel);
        if self.offline.load(Ordering::Acquire) {
            Err(StoreError::Unavailable("simulated outage".to_string()))
        } else {
            Ok(())
        }
    }

    fn join_product(&self, mut item: CartItem) -> CartItem {
        item.product = self
            .products
            .get(&item.product_id)
            .map(|entry| entry.value().clone());
        item
    }
}

#[async_trait]
impl CartStore for InMemoryBackend {
    async fn find_cart(&self, user: UserId) -> Result<Option<Cart>, StoreError> {
        self.begin_op()?;
        Ok(self.carts.get(&user).map(|entry| entry.value().clone()))
    }

    async fn create_cart(&self, user: UserId) -> Result<Cart, StoreError> {
        self.begin_op()?;
        let cart = Cart::for_user(user);
        self.carts.insert(user, cart.clone());
        Ok(cart)
    }

    async fn list_items(&self, cart: CartId) -> Result<Vec<CartItem>, StoreError> {
        self.begin_op()?;
        let _pass = self.gate.lock().await;
        let rows: Vec<CartItem> = self.item_rows(cart);
        Ok(rows.into_iter().map(|item| self.join_product(item)).collect())
    }

    async fn insert_item(
        &self,
        cart: CartId,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        self.begin_op()?;
        self.items.lock().push(CartItem::new(cart, product, quantity));
        Ok(())
    }

    async fn update_item_quantity(
        &self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        self.begin_op()?;
        // filter-by-id semantics: updating zero rows is not an error
        if let Some(row) = self.items.lock().iter_mut().find(|row| row.id == item) {
            row.quantity = quantity;
            row.updated_at = chrono::Utc::now();
        }
        Ok(())
    }

    async fn delete_item(&self, item: CartItemId) -> Result<(), StoreError> {
        self.begin_op()?;
        self.items.lock().retain(|row| row.id != item);
        Ok(())
    }

    async fn delete_items(&self, cart: CartId) -> Result<(), StoreError> {
        self.begin_op()?;
        self.items.lock().retain(|row| row.cart_id != cart);
        Ok(())
    }
}

#[async_trait]
impl ProductCatalog for InMemoryBackend {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        self.begin_op()?;

        let mut rows: Vec<Product> = self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|p| p.is_active)
            .filter(|p| query.min_price.map_or(true, |min| p.price >= min))
            .filter(|p| query.max_price.map_or(true, |max| p.price <= max))
            .filter(|p| {
                query.search.as_deref().map_or(true, |term| {
                    let term = term.to_lowercase();
                    p.name.to_lowercase().contains(&term)
                        || p.description
                            .as_deref()
                            .is_some_and(|d| d.to_lowercase().contains(&term))
                })
            })
            .filter(|p| query.category.map_or(true, |c| p.category_id == Some(c)))
            .filter(|p| !query.featured_only || p.is_featured)
            .filter(|p| !query.organic_only || p.is_organic)
            .collect();

        match query.sort {
            ProductSort::Newest => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ProductSort::PriceLowToHigh => rows.sort_by(|a, b| a.price.cmp(&b.price)),
            ProductSort::PriceHighToLow => rows.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        }

        let offset = query.offset.unwrap_or(0) as usize;
        let rows: Vec<Product> = rows.into_iter().skip(offset).collect();
        match query.limit {
            Some(limit) => Ok(rows.into_iter().take(limit as usize).collect()),
            None => Ok(rows),
        }
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        self.begin_op()?;
        Ok(self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .find(|p| p.slug == slug && p.is_active))
    }

    async fn related_products(
        &self,
        category: CategoryId,
        exclude: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, StoreError> {
        self.begin_op()?;
        Ok(self
            .products
            .iter()
            .map(|entry| entry.value().clone())
            .filter(|p| p.is_active && p.category_id == Some(category) && p.id != exclude)
            .take(limit as usize)
            .collect())
    }

    async fn list_categories(&self, query: &CategoryQuery) -> Result<Vec<Category>, StoreError> {
        self.begin_op()?;
        let mut rows: Vec<Category> = self
            .categories
            .lock()
            .iter()
            .filter(|c| c.is_active)
            .filter(|c| !query.top_level_only || c.is_top_level())
            .cloned()
            .collect();
        match query.sort {
            CategorySort::SortOrder => rows.sort_by_key(|c| c.sort_order),
            CategorySort::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        Ok(rows)
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        self.begin_op()?;
        Ok(self
            .categories
            .lock()
            .iter()
            .find(|c| c.slug == slug && c.is_active)
            .cloned())
    }
}

#[async_trait]
impl SettingsStore for InMemoryBackend {
    async fn load_settings(&self) -> Result<Vec<SettingRow>, StoreError> {
        self.begin_op()?;
        Ok(self.settings.lock().clone())
    }
}
