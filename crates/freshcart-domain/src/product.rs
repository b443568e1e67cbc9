//! Catalog product entities
//!
//! Products are read-only from the client's perspective: they arrive as
//! joined snapshots from the remote catalog and are never mutated locally.
//! Stock quantity is the hard ceiling for cart mutations.

use crate::category::Category;
use crate::ids::{CategoryId, ProductId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A product in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Long description
    #[serde(default)]
    pub description: Option<String>,
    /// Short description for cards
    #[serde(default)]
    pub short_description: Option<String>,
    /// Unit price
    pub price: Decimal,
    /// Pre-discount price, if the product is on offer
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    /// Stock keeping unit
    #[serde(default)]
    pub sku: Option<String>,
    /// Units currently in stock
    pub stock_quantity: u32,
    /// Stock level below which the product counts as running low
    #[serde(default)]
    pub low_stock_threshold: Option<u32>,
    /// Owning category, if assigned
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Brand name
    #[serde(default)]
    pub brand: Option<String>,
    /// Whether the product is visible in the storefront
    pub is_active: bool,
    /// Whether the product is featured on the landing page
    pub is_featured: bool,
    /// Whether the product is certified organic
    pub is_organic: bool,
    /// Free-form tags
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Row update time
    pub updated_at: DateTime<Utc>,
    /// Joined category record, when the query embedded it
    #[serde(default)]
    pub category: Option<Category>,
    /// Joined image records, when the query embedded them
    #[serde(default)]
    pub images: Vec<ProductImage>,
}

impl Product {
    /// Create a new product with the given essentials
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        slug: impl Into<String>,
        price: Decimal,
        stock_quantity: u32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            short_description: None,
            price,
            compare_at_price: None,
            sku: None,
            stock_quantity,
            low_stock_threshold: None,
            category_id: None,
            brand: None,
            is_active: true,
            is_featured: false,
            is_organic: false,
            tags: None,
            created_at: now,
            updated_at: now,
            category: None,
            images: Vec::new(),
        }
    }

    /// With a category assignment
    #[inline]
    #[must_use]
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// With a pre-discount price
    #[inline]
    #[must_use]
    pub fn with_compare_at_price(mut self, compare_at_price: Decimal) -> Self {
        self.compare_at_price = Some(compare_at_price);
        self
    }

    /// Mark the product as featured
    #[inline]
    #[must_use]
    pub fn featured(mut self) -> Self {
        self.is_featured = true;
        self
    }

    /// Mark the product as organic
    #[inline]
    #[must_use]
    pub fn organic(mut self) -> Self {
        self.is_organic = true;
        self
    }

    /// Whether at least one unit is in stock
    #[inline]
    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock_quantity > 0
    }

    /// Whether the stock level has fallen to or below the low-stock threshold
    #[inline]
    #[must_use]
    pub fn is_low_stock(&self) -> bool {
        self.low_stock_threshold
            .is_some_and(|threshold| self.stock_quantity <= threshold)
    }

    /// Whether the product is currently discounted
    #[inline]
    #[must_use]
    pub fn is_discounted(&self) -> bool {
        self.compare_at_price
            .is_some_and(|original| original > self.price)
    }

    /// The primary image, falling back to the first by sort order
    #[must_use]
    pub fn primary_image(&self) -> Option<&ProductImage> {
        self.images
            .iter()
            .find(|image| image.is_primary)
            .or_else(|| self.images.iter().min_by_key(|image| image.sort_order))
    }
}

/// An image attached to a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image identifier
    pub id: uuid::Uuid,
    /// Owning product
    pub product_id: ProductId,
    /// Public URL
    pub url: String,
    /// Alternative text
    #[serde(default)]
    pub alt_text: Option<String>,
    /// Position among the product's images
    pub sort_order: i32,
    /// Whether this is the primary image
    pub is_primary: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn image(product_id: ProductId, sort_order: i32, is_primary: bool) -> ProductImage {
        ProductImage {
            id: uuid::Uuid::new_v4(),
            product_id,
            url: format!("https://cdn.example/{sort_order}.webp"),
            alt_text: None,
            sort_order,
            is_primary,
        }
    }

    #[test]
    fn stock_helpers() {
        let mut product = Product::new("Bananas", "bananas", Decimal::new(4000, 2), 3);
        assert!(product.in_stock());
        assert!(!product.is_low_stock());

        product.low_stock_threshold = Some(5);
        assert!(product.is_low_stock());

        product.stock_quantity = 0;
        assert!(!product.in_stock());
    }

    #[test]
    fn discount_detection() {
        let product = Product::new("Mangoes", "mangoes", Decimal::new(12000, 2), 10)
            .with_compare_at_price(Decimal::new(15000, 2));
        assert!(product.is_discounted());

        let flat = Product::new("Rice", "rice", Decimal::new(9000, 2), 10)
            .with_compare_at_price(Decimal::new(9000, 2));
        assert!(!flat.is_discounted());
    }

    #[test]
    fn primary_image_prefers_flag_then_sort_order() {
        let mut product = Product::new("Milk", "milk", Decimal::new(6000, 2), 8);
        assert!(product.primary_image().is_none());

        product.images = vec![
            image(product.id, 2, false),
            image(product.id, 1, false),
            image(product.id, 3, true),
        ];
        assert_eq!(product.primary_image().map(|i| i.sort_order), Some(3));

        product.images = vec![image(product.id, 2, false), image(product.id, 1, false)];
        assert_eq!(product.primary_image().map(|i| i.sort_order), Some(1));
    }

    #[test]
    fn product_row_deserializes_without_joins() {
        let json = r#"{
            "id": "4f8a9e9e-8a3f-4dd8-8f5e-1f2a3b4c5d6e",
            "name": "Apples",
            "slug": "apples",
            "price": 120.5,
            "stock_quantity": 7,
            "is_active": true,
            "is_featured": false,
            "is_organic": true,
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-02T10:00:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Apples");
        assert_eq!(product.stock_quantity, 7);
        assert!(product.category.is_none());
        assert!(product.images.is_empty());
    }
}
