/// Shared data structures for the catalog state
///
/// These structs represent the data model that flows between
/// the persistence layer and the UI layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single product in the catalog
///
/// Serialized with camelCase field names to match the persisted
/// snapshot layout on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier, stable for the product's lifetime.
    /// Uniqueness is assumed, not enforced by the store.
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub discount_percentage: f64,
    pub rating: f64,
    pub stock: u32,
    pub brand: String,
    pub category: String,
    /// Primary image reference shown in grid views
    pub thumbnail: String,
    /// Ordered gallery of image references
    pub images: Vec<String>,
    /// Derived from the liked set; recomputed whenever products are replaced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_liked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_at: Option<DateTime<Utc>>,
}

/// Fields supplied by the add-product form
///
/// Everything else on a new Product (id, timestamps, the zeroed
/// rating/discount/stock) is filled in by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFormData {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub brand: String,
    pub category: String,
    pub thumbnail: String,
}

/// Partial update merged into an existing product by `update_product`.
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub discount_percentage: Option<f64>,
    pub rating: Option<f64>,
    pub stock: Option<u32>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub thumbnail: Option<String>,
    pub images: Option<Vec<String>>,
}

/// Which subset of products the derived view returns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterType {
    /// Every product, in insertion order
    #[default]
    All,
    /// Only products in the liked set
    Favorites,
}
