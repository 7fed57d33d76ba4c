//! Cache-Aside Façade Module
//!
//! Typed operations over the byte-oriented store: `set`, `try_get`,
//! `get_or_set` and `remove`. The façade holds no entry state and no locks;
//! the store is the sole owner of entry lifetime. Every store interaction
//! and the caller-supplied fallback are awaited in sequence, and every
//! failure is surfaced unchanged.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::{codec, CacheEntryPolicy, MAX_KEY_LENGTH};
use crate::error::{CacheError, Result};
use crate::store::ByteStore;

// == Cache Aside ==
/// Typed cache-aside layer over a [`ByteStore`].
///
/// Values are stored in the codec's text encoding; the expiration policy
/// defaults to sliding 30 minutes / absolute 1 hour unless overridden per
/// call or at construction.
///
/// Concurrent `get_or_set` calls racing on the same key are not serialized:
/// each miss may invoke its own computation and write the same key, and the
/// last writer's value wins in the store.
#[derive(Clone)]
pub struct CacheAside {
    /// The injected byte-oriented store
    store: Arc<dyn ByteStore>,
    /// Policy substituted when the caller supplies none
    default_policy: CacheEntryPolicy,
}

impl CacheAside {
    // == Constructors ==
    /// Creates a façade over `store` with the standard default policy.
    pub fn new(store: Arc<dyn ByteStore>) -> Self {
        Self {
            store,
            default_policy: CacheEntryPolicy::default(),
        }
    }

    /// Creates a façade over `store` with a custom default policy.
    pub fn with_default_policy(store: Arc<dyn ByteStore>, policy: CacheEntryPolicy) -> Self {
        Self {
            store,
            default_policy: policy,
        }
    }

    // == Set ==
    /// Encodes `value` and writes it under `key`.
    ///
    /// Substitutes the default policy when `policy` is `None`. Store-level
    /// failures propagate unchanged; no retry is attempted.
    pub async fn set<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        policy: Option<CacheEntryPolicy>,
    ) -> Result<()> {
        validate_key(key)?;
        let bytes = codec::encode(value)?;
        let policy = policy.unwrap_or(self.default_policy);
        self.store.set(key, bytes, &policy).await
    }

    // == Try Get ==
    /// Reads and decodes the value under `key`.
    ///
    /// Returns `Ok(None)` on a legitimate miss, with no decode attempt.
    /// Malformed cache content surfaces as [`CacheError::Decode`] and a
    /// store failure as an `Err`; neither is ever reported as a miss.
    pub async fn try_get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        validate_key(key)?;
        match self.store.get(key).await? {
            None => {
                debug!("cache miss for key: {}", key);
                Ok(None)
            }
            Some(bytes) => {
                let value = codec::decode(&bytes)?;
                debug!("cache hit for key: {}", key);
                Ok(Some(value))
            }
        }
    }

    // == Get Or Set ==
    /// Returns the cached value under `key`, computing and populating it on
    /// a miss.
    ///
    /// A decoded value equal to `T::default()` is treated as a miss, so an
    /// empty or zero sentinel never short-circuits the computation. When the
    /// computation itself yields the default value, nothing is written:
    /// "not found" is never cached as an entry. Callers that must cache a
    /// legitimately empty value wrap it in `Option` (a `Some` is never the
    /// default).
    ///
    /// Computation failures propagate as [`CacheError::Compute`] with
    /// nothing written.
    pub async fn get_or_set<T, F, Fut>(
        &self,
        key: &str,
        compute: F,
        policy: Option<CacheEntryPolicy>,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Default + PartialEq + Send,
        F: FnOnce() -> Fut,
        Fut: Future<Output = anyhow::Result<T>> + Send,
    {
        if let Some(cached) = self.try_get::<T>(key).await? {
            if cached != T::default() {
                return Ok(cached);
            }
        }

        let value = compute().await.map_err(CacheError::Compute)?;

        if value != T::default() {
            self.set(key, &value, policy).await?;
        }

        Ok(value)
    }

    // == Remove ==
    /// Removes the entry under `key` (explicit invalidation).
    pub async fn remove(&self, key: &str) -> Result<()> {
        validate_key(key)?;
        self.store.remove(key).await
    }
}

// == Key Validation ==
/// Keys are opaque, caller-constructed strings; only non-empty and a
/// maximum length are enforced here.
fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(CacheError::InvalidKey("key cannot be empty".to_string()));
    }
    if key.len() > MAX_KEY_LENGTH {
        return Err(CacheError::InvalidKey(format!(
            "key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        )));
    }
    Ok(())
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_cache() -> CacheAside {
        CacheAside::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_set_then_try_get_scalar() {
        let cache = test_cache();

        cache.set("k", &42i32, None).await.unwrap();

        let value: Option<i32> = cache.try_get("k").await.unwrap();
        assert_eq!(value, Some(42));
    }

    #[tokio::test]
    async fn test_try_get_missing_key() {
        let cache = test_cache();

        let value: Option<i32> = cache.try_get("never_written").await.unwrap();
        assert_eq!(value, None);
    }

    #[tokio::test]
    async fn test_try_get_malformed_bytes_is_decode_error() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());

        store
            .set("bad", b"not json {{{".to_vec(), &CacheEntryPolicy::default())
            .await
            .unwrap();

        let result: Result<Option<i32>> = cache.try_get("bad").await;
        assert!(matches!(result, Err(CacheError::Decode(_))));
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let cache = test_cache();

        let result = cache.set("", &1i32, None).await;
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));

        let result: Result<Option<i32>> = cache.try_get("").await;
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_oversized_key_rejected() {
        let cache = test_cache();
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let result = cache.set(&long_key, &1i32, None).await;
        assert!(matches!(result, Err(CacheError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_get_or_set_populates_on_miss() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());

        let value = cache
            .get_or_set("missing", || async { Ok(7i32) }, None)
            .await
            .unwrap();
        assert_eq!(value, 7);

        // The store now holds the encoded value
        assert!(store.get("missing").await.unwrap().is_some());
        let cached: Option<i32> = cache.try_get("missing").await.unwrap();
        assert_eq!(cached, Some(7));
    }

    #[tokio::test]
    async fn test_get_or_set_hit_skips_compute() {
        let cache = test_cache();
        cache.set("k", &99i32, None).await.unwrap();

        let calls = AtomicUsize::new(0);
        let value = cache
            .get_or_set(
                "k",
                || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(1i32)
                },
                None,
            )
            .await
            .unwrap();

        assert_eq!(value, 99);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_get_or_set_computes_once_across_calls() {
        let cache = test_cache();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_set(
                    "counted",
                    || async {
                        calls.fetch_add(1, Ordering::SeqCst);
                        Ok(5i32)
                    },
                    None,
                )
                .await
                .unwrap();
            assert_eq!(value, 5);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_set_default_result_not_cached() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());

        let value: Vec<i32> = cache
            .get_or_set("empty", || async { Ok(Vec::new()) }, None)
            .await
            .unwrap();
        assert!(value.is_empty());

        // Nothing was written: a later try_get is still a miss
        assert!(store.is_empty().await);
        let cached: Option<Vec<i32>> = cache.try_get("empty").await.unwrap();
        assert_eq!(cached, None);
    }

    #[tokio::test]
    async fn test_get_or_set_some_empty_is_cached() {
        // Wrapping in Option makes an empty collection cacheable
        let cache = test_cache();

        let value: Option<Vec<i32>> = cache
            .get_or_set("wrapped", || async { Ok(Some(Vec::new())) }, None)
            .await
            .unwrap();
        assert_eq!(value, Some(Vec::new()));

        let cached: Option<Option<Vec<i32>>> = cache.try_get("wrapped").await.unwrap();
        assert_eq!(cached, Some(Some(Vec::new())));
    }

    #[tokio::test]
    async fn test_get_or_set_default_sentinel_entry_recomputes() {
        // An entry decoding to the default value is treated as a miss
        let cache = test_cache();
        cache.set("zero", &0i32, None).await.unwrap();

        let value = cache
            .get_or_set("zero", || async { Ok(8i32) }, None)
            .await
            .unwrap();
        assert_eq!(value, 8);

        let cached: Option<i32> = cache.try_get("zero").await.unwrap();
        assert_eq!(cached, Some(8));
    }

    #[tokio::test]
    async fn test_get_or_set_compute_failure_propagates() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());

        let result: Result<i32> = cache
            .get_or_set(
                "failing",
                || async { Err(anyhow::anyhow!("database down")) },
                None,
            )
            .await;

        assert!(matches!(result, Err(CacheError::Compute(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_invalidates_entry() {
        let cache = test_cache();

        cache.set("k", &1i32, None).await.unwrap();
        cache.remove("k").await.unwrap();

        let cached: Option<i32> = cache.try_get("k").await.unwrap();
        assert_eq!(cached, None);
    }

    #[tokio::test]
    async fn test_per_call_policy_overrides_default() {
        let store = Arc::new(MemoryStore::new());
        let cache = CacheAside::new(store.clone());
        let short = CacheEntryPolicy::new()
            .with_absolute_expiration(std::time::Duration::from_millis(50));

        cache.set("brief", &1i32, Some(short)).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;

        let cached: Option<i32> = cache.try_get("brief").await.unwrap();
        assert_eq!(cached, None);
    }
}
