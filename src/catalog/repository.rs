//! Product Repository Module
//!
//! The persistence collaborator behind the catalog's cache-aside reads.
//! The trait is the only contract; the in-memory implementation backs the
//! binary and the tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::catalog::Product;

// == Repository Trait ==
/// Authoritative product storage.
///
/// Methods return `anyhow::Result` so implementations are free to use any
/// error type; the cache layer propagates failures without interpreting
/// them.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persists a product.
    async fn insert(&self, product: Product) -> anyhow::Result<()>;

    /// Looks up a product by id.
    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Product>>;

    /// Returns all products, oldest first.
    async fn all(&self) -> anyhow::Result<Vec<Product>>;
}

// == In-Memory Repository ==
/// HashMap-backed repository for the demo binary and tests.
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> anyhow::Result<()> {
        let mut products = self.products.write().await;
        products.insert(product.id, product);
        Ok(())
    }

    async fn find(&self, id: Uuid) -> anyhow::Result<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn all(&self) -> anyhow::Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut all: Vec<Product> = products.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }
}
