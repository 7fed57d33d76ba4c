//! Cache Aside - A typed cache-aside layer over a byte-oriented store
//!
//! Provides typed serialization, sliding/absolute expiration policies, and
//! the get-or-compute-then-populate protocol, plus an illustrative
//! product-catalog consumer.

pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheAside, CacheEntryPolicy};
pub use config::Config;
pub use error::CacheError;
pub use store::{ByteStore, MemoryStore};
pub use tasks::spawn_sweep_task;
