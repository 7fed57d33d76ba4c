//! Request DTOs for the catalog API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::catalog::ProductDraft;

/// Request body for creating a product (POST /products)
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductRequest {
    /// Product display name
    pub name: String,
    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price
    pub price: f64,
}

impl CreateProductRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.is_empty() {
            return Some("Name cannot be empty".to_string());
        }
        if self.name.len() > 256 {
            return Some("Name exceeds maximum length of 256 characters".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Some("Price must be a non-negative number".to_string());
        }
        None
    }

    /// Converts the request into a domain draft.
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}
