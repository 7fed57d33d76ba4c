//! Product Service Module
//!
//! The illustrative cache-aside consumer: single-entity and collection
//! reads go through the façade, and every write explicitly removes the
//! cache keys it can invalidate. There is no automatic dependency tracking
//! between keys; the removal is a convention this service upholds.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::cache::{CacheAside, CacheEntryPolicy};
use crate::catalog::{product_key, Product, ProductDraft, ProductRepository, PRODUCTS_COLLECTION_KEY};
use crate::error::{CacheError, Result};

// == Product Service ==
/// Catalog service caching single-entity and collection lookups.
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
    cache: CacheAside,
    /// Policy for the cached collection; shorter-lived than single entities
    collection_policy: CacheEntryPolicy,
}

impl ProductService {
    // == Constructor ==
    /// Creates a service over the given repository and cache façade.
    pub fn new(
        repo: Arc<dyn ProductRepository>,
        cache: CacheAside,
        collection_policy: CacheEntryPolicy,
    ) -> Self {
        Self {
            repo,
            cache,
            collection_policy,
        }
    }

    // == Add ==
    /// Creates a product and invalidates the collection key.
    ///
    /// The new entity itself is not pre-warmed into the cache; the next
    /// read populates it.
    pub async fn add(&self, draft: ProductDraft) -> Result<Product> {
        let product = Product::new(draft.name, draft.description, draft.price);

        self.repo
            .insert(product.clone())
            .await
            .map_err(CacheError::Repository)?;

        // A new product invalidates the cached collection
        info!("invalidating cache for key: {}", PRODUCTS_COLLECTION_KEY);
        self.cache.remove(PRODUCTS_COLLECTION_KEY).await?;

        Ok(product)
    }

    // == Get ==
    /// Fetches a single product, cache first.
    ///
    /// The lookup caches `Option<Product>`, so a repository miss is never
    /// written to the cache and surfaces as [`CacheError::NotFound`].
    pub async fn get(&self, id: Uuid) -> Result<Product> {
        let key = product_key(id);
        info!("fetching data for key: {} from cache", key);

        let repo = Arc::clone(&self.repo);
        let miss_key = key.clone();
        let found: Option<Product> = self
            .cache
            .get_or_set(
                &key,
                move || async move {
                    info!("cache miss, fetching data for key: {} from repository", miss_key);
                    repo.find(id).await
                },
                None,
            )
            .await?;

        found.ok_or(CacheError::NotFound(key))
    }

    // == List ==
    /// Fetches the full product collection, cache first.
    ///
    /// An empty repository yields an empty list that is not cached; this is
    /// the accepted cost of treating the type's empty value as a miss.
    pub async fn list(&self) -> Result<Vec<Product>> {
        info!("fetching data for key: {} from cache", PRODUCTS_COLLECTION_KEY);

        let repo = Arc::clone(&self.repo);
        self.cache
            .get_or_set(
                PRODUCTS_COLLECTION_KEY,
                move || async move {
                    info!(
                        "cache miss, fetching data for key: {} from repository",
                        PRODUCTS_COLLECTION_KEY
                    );
                    repo.all().await
                },
                Some(self.collection_policy),
            )
            .await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::InMemoryProductRepository;
    use crate::store::{ByteStore, MemoryStore};

    fn test_service() -> (ProductService, Arc<MemoryStore>, Arc<InMemoryProductRepository>) {
        let store = Arc::new(MemoryStore::new());
        let repo = Arc::new(InMemoryProductRepository::new());
        let cache = CacheAside::new(store.clone());
        let service = ProductService::new(repo.clone(), cache, CacheEntryPolicy::default());
        (service, store, repo)
    }

    fn draft(name: &str) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            description: None,
            price: 9.99,
        }
    }

    #[tokio::test]
    async fn test_get_populates_entity_key() {
        let (service, store, _) = test_service();

        let product = service.add(draft("widget")).await.unwrap();
        let fetched = service.get(product.id).await.unwrap();
        assert_eq!(fetched, product);

        let cached = store.get(&product_key(product.id)).await.unwrap();
        assert!(cached.is_some());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found_and_not_cached() {
        let (service, store, _) = test_service();
        let id = Uuid::new_v4();

        let result = service.get(id).await;
        assert!(matches!(result, Err(CacheError::NotFound(_))));

        let cached = store.get(&product_key(id)).await.unwrap();
        assert!(cached.is_none());
    }

    #[tokio::test]
    async fn test_get_serves_from_cache_after_repository_delete() {
        // A second read is served from the cache even when the repository
        // no longer holds the entity: invalidation is explicit, not tracked
        let (service, store, _) = test_service();

        let product = service.add(draft("widget")).await.unwrap();
        service.get(product.id).await.unwrap();

        // Same store, empty repository: the entity now lives only in cache
        let orphaned = ProductService::new(
            Arc::new(InMemoryProductRepository::new()),
            CacheAside::new(store),
            CacheEntryPolicy::default(),
        );

        let fetched = orphaned.get(product.id).await.unwrap();
        assert_eq!(fetched, product);
    }

    #[tokio::test]
    async fn test_add_invalidates_collection_key() {
        let (service, store, _) = test_service();

        service.add(draft("first")).await.unwrap();
        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(store.get(PRODUCTS_COLLECTION_KEY).await.unwrap().is_some());

        service.add(draft("second")).await.unwrap();
        assert!(store.get(PRODUCTS_COLLECTION_KEY).await.unwrap().is_none());

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 2);
    }

    #[tokio::test]
    async fn test_list_empty_catalog_not_cached() {
        let (service, store, _) = test_service();

        let listed = service.list().await.unwrap();
        assert!(listed.is_empty());
        assert!(store.get(PRODUCTS_COLLECTION_KEY).await.unwrap().is_none());
    }
}
