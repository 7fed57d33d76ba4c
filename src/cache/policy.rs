//! Cache Entry Policy Module
//!
//! Defines the expiration policy attached to every cache entry.

use std::time::Duration;

// == Default Expirations ==
/// Default sliding expiration applied when the caller supplies no policy.
pub const DEFAULT_SLIDING_EXPIRATION: Duration = Duration::from_secs(30 * 60);

/// Default absolute expiration applied when the caller supplies no policy.
pub const DEFAULT_ABSOLUTE_EXPIRATION: Duration = Duration::from_secs(60 * 60);

// == Cache Entry Policy ==
/// Expiration policy for a single cache entry.
///
/// An entry expires at whichever bound is hit first: the sliding window
/// resets on every read, the absolute bound is fixed at creation time.
/// At least one bound should be set for a bounded-lifetime entry; a policy
/// with neither set never expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheEntryPolicy {
    /// Entry lifetime measured from the most recent access
    pub sliding_expiration: Option<Duration>,
    /// Entry lifetime measured from creation, regardless of access
    pub absolute_expiration: Option<Duration>,
}

impl CacheEntryPolicy {
    // == Constructor ==
    /// Creates a policy with no expiration bounds set.
    pub fn new() -> Self {
        Self {
            sliding_expiration: None,
            absolute_expiration: None,
        }
    }

    // == Builders ==
    /// Sets the sliding expiration window.
    pub fn with_sliding_expiration(mut self, duration: Duration) -> Self {
        self.sliding_expiration = Some(duration);
        self
    }

    /// Sets the absolute expiration bound.
    pub fn with_absolute_expiration(mut self, duration: Duration) -> Self {
        self.absolute_expiration = Some(duration);
        self
    }

    // == Is Unbounded ==
    /// Returns true when neither expiration bound is set.
    pub fn is_unbounded(&self) -> bool {
        self.sliding_expiration.is_none() && self.absolute_expiration.is_none()
    }
}

impl Default for CacheEntryPolicy {
    /// The default policy: sliding 30 minutes, absolute 1 hour.
    fn default() -> Self {
        Self {
            sliding_expiration: Some(DEFAULT_SLIDING_EXPIRATION),
            absolute_expiration: Some(DEFAULT_ABSOLUTE_EXPIRATION),
        }
    }
}
