//! PostgREST adapter
//!
//! Implements the data-store traits over a PostgREST-style REST surface
//! (one route per table, horizontal filters in the query string, embedded
//! resources via `select=`). Each trait method maps to exactly one request.

use crate::cart::CartStore;
use crate::catalog::{CategoryQuery, ProductCatalog, ProductQuery, PRODUCT_SELECT};
use crate::error::StoreError;
use crate::settings::{SettingRow, SettingsStore};
use async_trait::async_trait;
use freshcart_domain::{Cart, CartId, CartItem, CartItemId, Category, CategoryId, Product, ProductId, UserId};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Connection parameters for a PostgREST endpoint
#[derive(Debug, Clone)]
pub struct PostgrestConfig {
    /// Base URL of the backend, e.g. `https://abc.example.co`
    pub base_url: String,
    /// API key, sent as both `apikey` and bearer token
    pub api_key: String,
}

impl PostgrestConfig {
    /// Create a config from a base URL and API key
    #[inline]
    #[must_use]
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

/// PostgREST-backed implementation of the data-store traits
#[derive(Debug, Clone)]
pub struct PostgrestStore {
    http: reqwest::Client,
    rest_url: String,
}

impl PostgrestStore {
    /// Create a store from connection parameters
    ///
    /// # Errors
    /// - `StoreError::Config` if the API key cannot be sent as a header
    /// - `StoreError::Transport` if the HTTP client cannot be constructed
    pub fn new(config: &PostgrestConfig) -> Result<Self, StoreError> {
        let mut headers = HeaderMap::new();

        let api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| StoreError::Config("API key is not a valid header value".to_string()))?;
        headers.insert(HeaderName::from_static("apikey"), api_key);

        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| StoreError::Config("API key is not a valid header value".to_string()))?;
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            http,
            rest_url: format!("{}/rest/v1", config.base_url.trim_end_matches('/')),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{table}", self.rest_url)
    }

    async fn successful_body(response: reqwest::Response) -> Result<String, StoreError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            Ok(body)
        } else {
            tracing::debug!(status = status.as_u16(), "store request rejected");
            Err(StoreError::Api {
                status: status.as_u16(),
                message: body,
            })
        }
    }

    async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let response = self
            .http
            .get(self.table_url(table))
            .query(params)
            .send()
            .await?;
        let body = Self::successful_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn select_first<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Option<T>, StoreError> {
        let mut rows = self.select_rows(table, params).await?;
        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows.swap_remove(0)))
        }
    }

    /// Insert a row and decode the created representation
    async fn insert_returning<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<T, StoreError> {
        let response = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        let text = Self::successful_body(response).await?;
        let mut rows: Vec<T> = serde_json::from_str(&text)?;
        if rows.is_empty() {
            Err(StoreError::MissingRow)
        } else {
            Ok(rows.swap_remove(0))
        }
    }

    /// Insert a row, discarding the representation
    async fn insert_minimal<B: Serialize + Sync>(
        &self,
        table: &str,
        body: &B,
    ) -> Result<(), StoreError> {
        let response = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=minimal")
            .json(body)
            .send()
            .await?;
        Self::successful_body(response).await?;
        Ok(())
    }

    async fn update_rows<B: Serialize + Sync>(
        &self,
        table: &str,
        params: &[(&str, String)],
        body: &B,
    ) -> Result<(), StoreError> {
        let response = self
            .http
            .patch(self.table_url(table))
            .query(params)
            .json(body)
            .send()
            .await?;
        Self::successful_body(response).await?;
        Ok(())
    }

    async fn delete_rows(&self, table: &str, params: &[(&str, String)]) -> Result<(), StoreError> {
        let response = self
            .http
            .delete(self.table_url(table))
            .query(params)
            .send()
            .await?;
        Self::successful_body(response).await?;
        Ok(())
    }
}

#[async_trait]
impl CartStore for PostgrestStore {
    async fn find_cart(&self, user: UserId) -> Result<Option<Cart>, StoreError> {
        let params = [
            ("select", "*".to_string()),
            ("user_id", format!("eq.{user}")),
            ("limit", "1".to_string()),
        ];
        self.select_first("carts", &params).await
    }

    async fn create_cart(&self, user: UserId) -> Result<Cart, StoreError> {
        let body = serde_json::json!({ "user_id": user });
        self.insert_returning("carts", &body).await
    }

    async fn list_items(&self, cart: CartId) -> Result<Vec<CartItem>, StoreError> {
        let params = [
            ("select", "*,product:products(*)".to_string()),
            ("cart_id", format!("eq.{cart}")),
            ("order", "created_at.asc".to_string()),
        ];
        self.select_rows("cart_items", &params).await
    }

    async fn insert_item(
        &self,
        cart: CartId,
        product: ProductId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let body = serde_json::json!({
            "cart_id": cart,
            "product_id": product,
            "quantity": quantity,
        });
        self.insert_minimal("cart_items", &body).await
    }

    async fn update_item_quantity(
        &self,
        item: CartItemId,
        quantity: u32,
    ) -> Result<(), StoreError> {
        let params = [("id", format!("eq.{item}"))];
        let body = serde_json::json!({ "quantity": quantity });
        self.update_rows("cart_items", &params, &body).await
    }

    async fn delete_item(&self, item: CartItemId) -> Result<(), StoreError> {
        let params = [("id", format!("eq.{item}"))];
        self.delete_rows("cart_items", &params).await
    }

    async fn delete_items(&self, cart: CartId) -> Result<(), StoreError> {
        let params = [("cart_id", format!("eq.{cart}"))];
        self.delete_rows("cart_items", &params).await
    }
}

#[async_trait]
impl ProductCatalog for PostgrestStore {
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError> {
        self.select_rows("products", &query.to_params()).await
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError> {
        let params = [
            ("select", PRODUCT_SELECT.to_string()),
            ("slug", format!("eq.{slug}")),
            ("is_active", "eq.true".to_string()),
            ("limit", "1".to_string()),
        ];
        self.select_first("products", &params).await
    }

    async fn related_products(
        &self,
        category: CategoryId,
        exclude: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, StoreError> {
        let params = [
            ("select", PRODUCT_SELECT.to_string()),
            ("category_id", format!("eq.{category}")),
            ("id", format!("neq.{exclude}")),
            ("is_active", "eq.true".to_string()),
            ("limit", limit.to_string()),
        ];
        self.select_rows("products", &params).await
    }

    async fn list_categories(&self, query: &CategoryQuery) -> Result<Vec<Category>, StoreError> {
        self.select_rows("categories", &query.to_params()).await
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError> {
        let params = [
            ("select", "*".to_string()),
            ("slug", format!("eq.{slug}")),
            ("is_active", "eq.true".to_string()),
            ("limit", "1".to_string()),
        ];
        self.select_first("categories", &params).await
    }
}

#[async_trait]
impl SettingsStore for PostgrestStore {
    async fn load_settings(&self) -> Result<Vec<SettingRow>, StoreError> {
        let params = [("select", "*".to_string())];
        self.select_rows("settings", &params).await
    }
}
