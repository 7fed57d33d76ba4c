//! Catalog Module
//!
//! The illustrative cache-aside consumer: a product catalog whose service
//! caches single-entity and collection lookups and invalidates affected
//! keys on writes.

mod product;
mod repository;
mod service;

// Re-export public types
pub use product::{product_key, Product, ProductDraft, PRODUCTS_COLLECTION_KEY};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
