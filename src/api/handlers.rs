//! API Handlers
//!
//! HTTP request handlers for the catalog endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::cache::CacheAside;
use crate::catalog::{InMemoryProductRepository, Product, ProductService};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{CreateProductRequest, HealthResponse};
use crate::store::MemoryStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache-aside consumer service
    pub products: ProductService,
}

impl AppState {
    /// Creates a new AppState over the given service.
    pub fn new(products: ProductService) -> Self {
        Self { products }
    }

    /// Wires the full stack from configuration.
    ///
    /// Returns the state together with the store so the caller can spawn
    /// the expiry sweeper over it.
    pub fn from_config(config: &Config) -> (Self, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::with_default_policy(store.clone(), config.default_policy());
        let repo = Arc::new(InMemoryProductRepository::new());
        let products = ProductService::new(repo, cache, config.collection_policy());
        (Self::new(products), store)
    }
}

/// Handler for POST /products
///
/// Creates a product and invalidates the cached collection.
pub async fn create_product_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let product = state.products.add(req.into_draft()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Handler for GET /products
///
/// Returns the full collection, cache first.
pub async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = state.products.list().await?;
    Ok(Json(products))
}

/// Handler for GET /products/:id
///
/// Returns a single product, cache first; 404 when unknown.
pub async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>> {
    let product = state.products.get(id).await?;
    Ok(Json(product))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
