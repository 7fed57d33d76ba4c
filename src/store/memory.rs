//! In-Memory Store Module
//!
//! An in-process [`ByteStore`] with sliding and absolute expiration,
//! standing in for the external distributed cache in the binary and in
//! tests. Expired entries are dropped lazily on read and proactively by
//! [`MemoryStore::sweep_expired`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::CacheEntryPolicy;
use crate::error::Result;
use crate::store::ByteStore;

// == Stored Entry ==
/// A byte payload plus the expiration bookkeeping derived from its policy.
#[derive(Debug)]
struct StoredEntry {
    /// The stored payload
    bytes: Vec<u8>,
    /// Most recent access, start of the sliding window
    last_access: Instant,
    /// Sliding window length, None = no sliding bound
    sliding: Option<Duration>,
    /// Fixed expiry instant, None = no absolute bound
    absolute_deadline: Option<Instant>,
}

impl StoredEntry {
    fn new(bytes: Vec<u8>, policy: &CacheEntryPolicy, now: Instant) -> Self {
        Self {
            bytes,
            last_access: now,
            sliding: policy.sliding_expiration,
            absolute_deadline: policy.absolute_expiration.map(|d| now + d),
        }
    }

    /// An entry is expired once either bound has been reached.
    fn is_expired(&self, now: Instant) -> bool {
        if let Some(deadline) = self.absolute_deadline {
            if now >= deadline {
                return true;
            }
        }
        if let Some(window) = self.sliding {
            if now >= self.last_access + window {
                return true;
            }
        }
        false
    }

    /// Restarts the sliding window. The absolute deadline is unaffected.
    fn touch(&mut self, now: Instant) {
        self.last_access = now;
    }
}

// == Memory Store ==
/// Thread-safe in-memory byte store with per-entry TTL.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredEntry>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Sweep Expired ==
    /// Removes all expired entries.
    ///
    /// Returns the number of entries removed.
    pub async fn sweep_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        let expired_keys: Vec<String> = entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            entries.remove(key);
        }

        expired_keys.len()
    }

    // == Length ==
    /// Returns the current number of entries, including any not yet swept.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ByteStore for MemoryStore {
    /// Reads a live entry and refreshes its sliding window.
    ///
    /// An expired entry is removed and reported as a miss.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let now = Instant::now();
        // Write lock: a read refreshes the sliding window
        let mut entries = self.entries.write().await;

        let expired = matches!(entries.get(key), Some(entry) if entry.is_expired(now));
        if expired {
            entries.remove(key);
            return Ok(None);
        }

        match entries.get_mut(key) {
            Some(entry) => {
                entry.touch(now);
                Ok(Some(entry.bytes.clone()))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, bytes: Vec<u8>, policy: &CacheEntryPolicy) -> Result<()> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), StoredEntry::new(bytes, policy, now));
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}
