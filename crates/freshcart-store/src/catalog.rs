//! Product catalog contract and query builders
//!
//! Catalog reads are stateless: the presentation layer builds a query, the
//! store answers it, nothing is synchronized. Query construction is a pure
//! step producing PostgREST-style parameter lists so it can be tested
//! without a network.

use crate::error::StoreError;
use async_trait::async_trait;
use freshcart_domain::{Category, CategoryId, Product, ProductId};
#[cfg(feature = "mocks")]
use mockall::automock;
use rust_decimal::Decimal;

/// Embedded-resource selection for product reads
pub(crate) const PRODUCT_SELECT: &str = "*,category:categories(*),images:product_images(*)";

/// Sort orders for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSort {
    /// Most recently created first
    #[default]
    Newest,
    /// Cheapest first
    PriceLowToHigh,
    /// Most expensive first
    PriceHighToLow,
    /// Alphabetical by name
    Name,
}

impl ProductSort {
    /// The `order=` parameter value for this sort
    #[inline]
    #[must_use]
    pub fn order_param(self) -> &'static str {
        match self {
            Self::Newest => "created_at.desc",
            Self::PriceLowToHigh => "price.asc",
            Self::PriceHighToLow => "price.desc",
            Self::Name => "name.asc",
        }
    }
}

/// Filter, sort, and page parameters for a product listing
///
/// Active-only filtering is always applied; a storefront never lists
/// deactivated products.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    /// Substring to match against name or description
    pub search: Option<String>,
    /// Restrict to one category
    pub category: Option<CategoryId>,
    /// Only featured products
    pub featured_only: bool,
    /// Only organic products
    pub organic_only: bool,
    /// Inclusive lower price bound
    pub min_price: Option<Decimal>,
    /// Inclusive upper price bound
    pub max_price: Option<Decimal>,
    /// Sort order
    pub sort: ProductSort,
    /// Maximum number of rows
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl ProductQuery {
    /// Create an unfiltered query (newest first)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With a name/description search term
    #[inline]
    #[must_use]
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Restricted to one category
    #[inline]
    #[must_use]
    pub fn in_category(mut self, category: CategoryId) -> Self {
        self.category = Some(category);
        self
    }

    /// Featured products only
    #[inline]
    #[must_use]
    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Organic products only
    #[inline]
    #[must_use]
    pub fn organic(mut self) -> Self {
        self.organic_only = true;
        self
    }

    /// With an inclusive price range
    #[inline]
    #[must_use]
    pub fn priced_between(mut self, min: Decimal, max: Decimal) -> Self {
        self.min_price = Some(min);
        self.max_price = Some(max);
        self
    }

    /// With a sort order
    #[inline]
    #[must_use]
    pub fn sorted_by(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    /// With a row limit
    #[inline]
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// With a row offset
    #[inline]
    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Compile to PostgREST query parameters
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("select", PRODUCT_SELECT.to_string()),
            ("is_active", "eq.true".to_string()),
        ];

        if let Some(min) = self.min_price {
            params.push(("price", format!("gte.{min}")));
        }
        if let Some(max) = self.max_price {
            params.push(("price", format!("lte.{max}")));
        }
        if let Some(term) = &self.search {
            params.push((
                "or",
                format!("(name.ilike.*{term}*,description.ilike.*{term}*)"),
            ));
        }
        if let Some(category) = self.category {
            params.push(("category_id", format!("eq.{category}")));
        }
        if self.featured_only {
            params.push(("is_featured", "eq.true".to_string()));
        }
        if self.organic_only {
            params.push(("is_organic", "eq.true".to_string()));
        }

        params.push(("order", self.sort.order_param().to_string()));

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }

        params
    }
}

/// Sort orders for category listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategorySort {
    /// By the curated `sort_order` column
    #[default]
    SortOrder,
    /// Alphabetical by name
    Name,
}

impl CategorySort {
    /// The `order=` parameter value for this sort
    #[inline]
    #[must_use]
    pub fn order_param(self) -> &'static str {
        match self {
            Self::SortOrder => "sort_order.asc",
            Self::Name => "name.asc",
        }
    }
}

/// Filter and sort parameters for a category listing
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryQuery {
    /// Only categories without a parent
    pub top_level_only: bool,
    /// Sort order
    pub sort: CategorySort,
}

impl CategoryQuery {
    /// Create an unfiltered query sorted by the curated order
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Top-level categories only
    #[inline]
    #[must_use]
    pub fn top_level(mut self) -> Self {
        self.top_level_only = true;
        self
    }

    /// With a sort order
    #[inline]
    #[must_use]
    pub fn sorted_by(mut self, sort: CategorySort) -> Self {
        self.sort = sort;
        self
    }

    /// Compile to PostgREST query parameters
    #[must_use]
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("is_active", "eq.true".to_string()),
        ];
        if self.top_level_only {
            params.push(("parent_id", "is.null".to_string()));
        }
        params.push(("order", self.sort.order_param().to_string()));
        params
    }
}

/// Read access to products and categories
#[cfg_attr(feature = "mocks", automock)]
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// List products matching `query`
    async fn list_products(&self, query: &ProductQuery) -> Result<Vec<Product>, StoreError>;

    /// Fetch one active product by its slug, with category and images joined
    async fn product_by_slug(&self, slug: &str) -> Result<Option<Product>, StoreError>;

    /// List up to `limit` active products sharing a category, excluding the
    /// product they are related to
    async fn related_products(
        &self,
        category: CategoryId,
        exclude: ProductId,
        limit: u32,
    ) -> Result<Vec<Product>, StoreError>;

    /// List categories matching `query`
    async fn list_categories(&self, query: &CategoryQuery) -> Result<Vec<Category>, StoreError>;

    /// Fetch one active category by its slug
    async fn category_by_slug(&self, slug: &str) -> Result<Option<Category>, StoreError>;
}
