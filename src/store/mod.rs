//! Store Module
//!
//! The byte-oriented store abstraction the cache-aside façade is built on,
//! plus an in-process implementation used by the binary and the tests.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::cache::CacheEntryPolicy;
use crate::error::Result;

// == Byte Store Trait ==
/// A byte-keyed, byte-valued store with TTL support.
///
/// This is the boundary to the external distributed cache: implementations
/// own entry lifetime entirely and must honor sliding and absolute
/// expiration simultaneously per entry (the entry expires at whichever
/// bound is hit first).
///
/// Transport failures surface as [`crate::error::CacheError::StoreUnavailable`]
/// and must never be reported as a miss.
#[async_trait]
pub trait ByteStore: Send + Sync {
    /// Reads the bytes stored under `key`, or `None` when absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Writes `bytes` under `key` with the given expiration policy,
    /// replacing any previous entry.
    async fn set(&self, key: &str, bytes: Vec<u8>, policy: &CacheEntryPolicy) -> Result<()>;

    /// Removes the entry under `key`. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<()>;
}
