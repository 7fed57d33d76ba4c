//! Product Model Module
//!
//! The catalog's domain entity plus the cache-key conventions its service
//! follows. Keys are convention-based: `product:<id>` for single entities
//! and a fixed name for the full collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// == Key Conventions ==
/// Cache key holding the full product collection.
pub const PRODUCTS_COLLECTION_KEY: &str = "products";

/// Builds the cache key for a single product.
pub fn product_key(id: Uuid) -> String {
    format!("product:{}", id)
}

// == Product ==
/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Optional free-text description; omitted from cache payloads when absent
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Creates a new product with a fresh id and the current timestamp.
    pub fn new(name: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description,
            price,
            created_at: Utc::now(),
        }
    }
}

// == Product Draft ==
/// The fields supplied by a caller creating a product.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
}
