//! Catalog category entities

use crate::ids::CategoryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category, optionally nested under a parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// URL slug
    pub slug: String,
    /// Description shown on the category page
    #[serde(default)]
    pub description: Option<String>,
    /// Banner/tile image URL
    #[serde(default)]
    pub image_url: Option<String>,
    /// Parent category, if nested
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    /// Position among sibling categories
    pub sort_order: i32,
    /// Whether the category is visible in the storefront
    pub is_active: bool,
    /// Row creation time
    pub created_at: DateTime<Utc>,
    /// Row update time
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new top-level category
    #[must_use]
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            name: name.into(),
            slug: slug.into(),
            description: None,
            image_url: None,
            parent_id: None,
            sort_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// With a parent category
    #[inline]
    #[must_use]
    pub fn with_parent(mut self, parent_id: CategoryId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    /// With an explicit sort order
    #[inline]
    #[must_use]
    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Whether this category has no parent
    #[inline]
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}
